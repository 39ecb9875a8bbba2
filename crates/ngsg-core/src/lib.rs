pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod pipeline;
pub mod transform;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative to the output root, `/`-separated.
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from the loaded definitions.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        ir: &ir::ApiIr,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
