use ngsg_core::ir::ParameterDefinition;
use ngsg_core::transform::name_normalizer::{is_identifier, normalize_name};

/// A parameter as it appears in a generated method.
#[derive(Debug, Clone, Copy)]
pub struct ParameterModel<'a> {
    pub definition: &'a ParameterDefinition,
}

impl<'a> ParameterModel<'a> {
    pub fn new(definition: &'a ParameterDefinition) -> Self {
        Self { definition }
    }

    /// The wire name, used for placeholders, query keys and form fields.
    pub fn name(&self) -> &'a str {
        &self.definition.name
    }

    /// The TypeScript variable. Wire names that are not identifiers
    /// (e.g. `X-Request-Id`) are camel-cased.
    pub fn variable(&self) -> String {
        variable_name(&self.definition.name)
    }

    /// `name[?]: Type[ = default]`
    pub fn token(&self) -> String {
        let param = self.definition;
        let mut token = self.variable();
        if param.is_optional && param.default_value.is_none() {
            token.push('?');
        }
        token.push_str(": ");
        token.push_str(&param.type_expr);
        if let Some(default) = &param.default_value {
            token.push_str(" = ");
            token.push_str(&literal(default));
        }
        token
    }
}

/// Locals declared inside every generated method body.
const METHOD_LOCALS: [&str; 4] = ["url", "queryList", "formData", "item"];

/// Reserved words and strict-mode restricted names.
const RESERVED_WORDS: [&str; 48] = [
    "arguments", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends",
    "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
    "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

/// Variable name for a wire name. Names taken by the language or by the
/// method body get a trailing `_`.
pub fn variable_name(name: &str) -> String {
    let variable = if is_identifier(name) {
        name.to_string()
    } else {
        normalize_name(name).camel_case
    };
    if METHOD_LOCALS.contains(&variable.as_str()) || RESERVED_WORDS.contains(&variable.as_str()) {
        format!("{variable}_")
    } else {
        variable
    }
}

/// Serialize a default value as a TypeScript literal.
pub fn literal(value: &serde_json::Value) -> String {
    value.to_string()
}
