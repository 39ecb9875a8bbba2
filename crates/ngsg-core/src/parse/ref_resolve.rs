use indexmap::IndexMap;

use super::operation::{Operation, PathItem};
use super::parameter::{Parameter, ParameterOrRef};
use super::response::{Response, ResponseOrRef};
use super::spec::SwaggerSpec;
use crate::error::ResolveError;

/// Inlines `#/parameters/…` and `#/responses/…` references.
///
/// Schema references (`#/definitions/…`) are left in place: they carry
/// identity and are tied to their targets by the schema graph.
pub struct RefResolver<'a> {
    parameters: &'a IndexMap<String, Parameter>,
    responses: &'a IndexMap<String, Response>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a SwaggerSpec) -> Self {
        Self {
            parameters: &spec.parameters,
            responses: &spec.responses,
        }
    }

    /// Resolve path-level parameters of one path item.
    pub fn resolve_path_item(&self, item: &PathItem) -> Result<Vec<Parameter>, ResolveError> {
        item.parameters
            .iter()
            .map(|p| self.resolve_parameter(p))
            .collect()
    }

    /// Resolve every parameter of one operation.
    pub fn resolve_operation_parameters(
        &self,
        op: &Operation,
    ) -> Result<Vec<Parameter>, ResolveError> {
        op.parameters
            .iter()
            .map(|p| self.resolve_parameter(p))
            .collect()
    }

    pub fn resolve_parameter(&self, param: &ParameterOrRef) -> Result<Parameter, ResolveError> {
        match param {
            ParameterOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "parameters")?;
                self.parameters
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
            ParameterOrRef::Parameter(p) => Ok(p.as_ref().clone()),
        }
    }

    pub fn resolve_response(&self, resp: &ResponseOrRef) -> Result<Response, ResolveError> {
        match resp {
            ResponseOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "responses")?;
                self.responses
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
            ResponseOrRef::Response(r) => Ok(r.clone()),
        }
    }
}

/// Parse a `$ref` path like `#/definitions/Foo` and extract the name.
pub fn parse_ref_name(ref_path: &str, expected_section: &str) -> Result<String, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(unescape_pointer(name))
}

/// JSON-pointer unescaping: `~1` is `/`, `~0` is `~`.
fn unescape_pointer(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
