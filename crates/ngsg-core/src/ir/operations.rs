use std::str::FromStr;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// Lowercase verb, which is also the `HttpClient` method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }

    /// Verbs whose `HttpClient` call requires a body argument.
    pub fn requires_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "put" => Ok(HttpMethod::Put),
            "post" => Ok(HttpMethod::Post),
            "delete" => Ok(HttpMethod::Delete),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "patch" => Ok(HttpMethod::Patch),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

/// One client class: every operation sharing a tag.
#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    /// The operation tag, `Unknown` when absent.
    pub name: String,
    /// Valid identifier derived from `name`, used for class and file names.
    pub identifier: String,
    /// Document order.
    pub methods: Vec<MethodDefinition>,
}

impl ServiceDefinition {
    /// Every type expression referenced by a parameter or return type.
    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().flat_map(MethodDefinition::referenced_types)
    }
}

/// One operation rendered as a client method.
#[derive(Debug, Clone)]
pub struct MethodDefinition {
    pub tag: String,
    pub http_method: HttpMethod,
    /// Raw templated path, e.g. `/pet/{petId}`.
    pub url: String,
    pub name: String,
    pub description: Option<String>,
    pub return_type: String,
    pub is_form_data: bool,
    /// Declaration order; see [`MethodDefinition::ordered_parameters`].
    pub parameters: Vec<ParameterDefinition>,
}

impl MethodDefinition {
    /// Parameters in call order: those without a default first, then
    /// required before optional within each group. The sort is stable.
    pub fn ordered_parameters(&self) -> Vec<&ParameterDefinition> {
        let mut ordered: Vec<&ParameterDefinition> = self.parameters.iter().collect();
        ordered.sort_by_key(|p| (p.default_value.is_some(), p.is_optional));
        ordered
    }

    pub fn has_kind(&self, kind: ParameterKind) -> bool {
        self.parameters.iter().any(|p| p.kind == kind)
    }

    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .map(|p| p.type_expr.as_str())
            .chain(std::iter::once(self.return_type.as_str()))
    }
}

/// Where a parameter's value is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Path,
    Query,
    Header,
    Body,
    FormData,
}

/// A resolved operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    pub name: String,
    pub kind: ParameterKind,
    pub type_expr: String,
    /// Not required, or explicitly nullable.
    pub is_optional: bool,
    pub default_value: Option<serde_json::Value>,
    pub description: Option<String>,
}

impl ParameterDefinition {
    pub fn is_array(&self) -> bool {
        self.type_expr.ends_with("[]")
    }
}
