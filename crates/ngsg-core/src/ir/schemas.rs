/// A named data type materialized from a non-enumeration definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Resolved supertype expressions.
    pub extends: Vec<String>,
    /// Ordered; the first property seen under a name wins.
    pub properties: Vec<PropertyDefinition>,
    pub shape: TypeShape,
}

/// How a type definition is declared.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    /// `export interface Name { ... }`
    Interface,
    /// `export type Name = <expr>;` for array and scalar definitions.
    Alias(String),
}

impl TypeDefinition {
    /// Every type expression this definition references.
    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        let alias = match &self.shape {
            TypeShape::Alias(target) => Some(target.as_str()),
            TypeShape::Interface => None,
        };
        self.properties
            .iter()
            .map(|p| p.type_expr.as_str())
            .chain(self.extends.iter().map(String::as_str))
            .chain(alias)
    }
}

/// A property on a type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub name: String,
    pub description: Option<String>,
    pub type_expr: String,
    pub required: bool,
}
