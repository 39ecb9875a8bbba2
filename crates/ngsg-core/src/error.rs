use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported Swagger version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("dangling schema reference: {0}")]
    Dangling(String),

    #[error("schema node missing: {0}")]
    MissingNode(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("transform failed: {0}")]
    Other(String),
}

/// A fatal failure of one pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch source document: {0}")]
    Fetch(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("code generation failed: {0}")]
    Generate(String),

    #[error("failed to write output: {0}")]
    Output(String),
}

impl From<ParseError> for PipelineError {
    fn from(err: ParseError) -> Self {
        PipelineError::Transform(TransformError::Parse(err))
    }
}
