pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::SwaggerSpec;

/// Parse a Swagger document from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a Swagger document, picking JSON or YAML by its first character.
pub fn from_str(input: &str) -> Result<SwaggerSpec, ParseError> {
    let input = input.trim_start_matches('\u{feff}');
    if input.trim_start().starts_with('{') {
        from_json(input)
    } else {
        from_yaml(input)
    }
}

fn validate_version(spec: &SwaggerSpec) -> Result<(), ParseError> {
    if !spec.swagger.starts_with("2.") {
        return Err(ParseError::UnsupportedVersion(spec.swagger.clone()));
    }
    Ok(())
}
