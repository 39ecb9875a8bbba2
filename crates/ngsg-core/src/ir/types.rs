use std::fmt;

use indexmap::IndexSet;

use super::operations::ServiceDefinition;
use super::schemas::TypeDefinition;

/// Everything the load phase produces: generator-ready, read-only.
#[derive(Debug, Clone)]
pub struct ApiIr {
    pub info: IrInfo,
    pub types: Vec<TypeDefinition>,
    pub services: Vec<ServiceDefinition>,
}

impl ApiIr {
    /// Names of every materialized type, in document order.
    pub fn type_names(&self) -> IndexSet<String> {
        self.types.iter().map(|t| t.name.clone()).collect()
    }
}

/// API metadata.
#[derive(Debug, Clone, Default)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
