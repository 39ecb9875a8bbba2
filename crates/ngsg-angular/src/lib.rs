pub mod emitters;
pub mod error;
pub mod generator;

pub use error::EmitError;
pub use generator::{AngularGenerator, AngularOptions};
