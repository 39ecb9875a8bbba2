pub mod name_normalizer;
pub mod schema_graph;
pub mod schema_resolver;
pub mod spec_to_ir;

pub use schema_graph::{SchemaGraph, SchemaId};
pub use schema_resolver::{FALLBACK_TYPE, TypeResolver, escape_single_quoted};
pub use spec_to_ir::transform;
