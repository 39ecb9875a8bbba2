use std::collections::HashMap;

use indexmap::IndexMap;

use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::ref_resolve::parse_ref_name;
use crate::parse::schema::{Schema, SchemaType};

/// Identity of one interned schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(usize);

/// The value kind a schema node declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// No `type` given.
    None,
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    File,
    Null,
}

impl SchemaKind {
    fn from_type(schema_type: Option<SchemaType>) -> Self {
        match schema_type {
            None => SchemaKind::None,
            Some(SchemaType::String) => SchemaKind::String,
            Some(SchemaType::Number) => SchemaKind::Number,
            Some(SchemaType::Integer) => SchemaKind::Integer,
            Some(SchemaType::Boolean) => SchemaKind::Boolean,
            Some(SchemaType::Array) => SchemaKind::Array,
            Some(SchemaType::Object) => SchemaKind::Object,
            Some(SchemaType::File) => SchemaKind::File,
            Some(SchemaType::Null) => SchemaKind::Null,
        }
    }

    /// Lowercase type keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            SchemaKind::None => "none",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
            SchemaKind::File => "file",
            SchemaKind::Null => "null",
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            SchemaKind::String | SchemaKind::Number | SchemaKind::Integer | SchemaKind::Boolean
        )
    }
}

/// Target of a `$ref` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Definition(SchemaId),
    /// The reference names no definition of this document.
    Dangling(String),
}

/// Whether a node is a plain schema or a parameter wrapping one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOrigin {
    Schema,
    /// Body parameters wrap their payload schema; other locations carry
    /// their own kind and leave `schema` empty.
    Parameter { schema: Option<SchemaId> },
}

/// One interned schema node.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub reference: Option<Reference>,
    pub origin: NodeOrigin,
    pub item: Option<SchemaId>,
    pub properties: IndexMap<String, SchemaId>,
    pub required: Vec<String>,
    pub all_of: Vec<SchemaId>,
    pub one_of: Vec<SchemaId>,
    pub any_of: Vec<SchemaId>,
    pub enumeration: Vec<serde_json::Value>,
    pub description: Option<String>,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            reference: None,
            origin: NodeOrigin::Schema,
            item: None,
            properties: IndexMap::new(),
            required: Vec::new(),
            all_of: Vec::new(),
            one_of: Vec::new(),
            any_of: Vec::new(),
            enumeration: Vec::new(),
            description: None,
        }
    }

    pub fn is_enumeration(&self) -> bool {
        !self.enumeration.is_empty()
    }
}

/// Arena of every schema node in a document.
///
/// Definitions are interned first, each under an id reserved before any
/// node is built, so `$ref` targets resolve regardless of declaration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    nodes: Vec<SchemaNode>,
    definitions: IndexMap<String, SchemaId>,
    definition_names: HashMap<SchemaId, String>,
}

impl SchemaGraph {
    /// Intern every named definition, in document order.
    pub fn from_definitions(definitions: &IndexMap<String, Schema>) -> Self {
        let mut graph = SchemaGraph::default();

        for name in definitions.keys() {
            let id = graph.push(SchemaNode::new(SchemaKind::None));
            graph.definitions.insert(name.clone(), id);
            graph.definition_names.insert(id, name.clone());
        }

        for (name, schema) in definitions {
            let node = graph.build_node(schema);
            if let Some(&id) = graph.definitions.get(name) {
                graph.nodes[id.0] = node;
            }
        }

        graph
    }

    /// Intern an inline schema.
    pub fn intern(&mut self, schema: &Schema) -> SchemaId {
        let node = self.build_node(schema);
        self.push(node)
    }

    /// Intern a parameter as a wrapper node.
    pub fn intern_parameter(&mut self, param: &Parameter) -> SchemaId {
        let node = if param.location == ParameterLocation::Body {
            let schema = param.schema.as_ref().map(|s| self.intern(s));
            SchemaNode {
                origin: NodeOrigin::Parameter { schema },
                description: param.description.clone(),
                ..SchemaNode::new(SchemaKind::None)
            }
        } else {
            let item = param.items.as_deref().map(|s| self.intern(s));
            SchemaNode {
                origin: NodeOrigin::Parameter { schema: None },
                item,
                enumeration: param.enum_values.clone(),
                description: param.description.clone(),
                ..SchemaNode::new(SchemaKind::from_type(param.param_type))
            }
        };
        self.push(node)
    }

    /// Add a fully built node.
    pub fn push(&mut self, node: SchemaNode) -> SchemaId {
        let id = SchemaId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: SchemaId) -> Option<&SchemaNode> {
        self.nodes.get(id.0)
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, id: SchemaId) -> Option<&mut SchemaNode> {
        self.nodes.get_mut(id.0)
    }

    /// Named definitions in document order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, SchemaId)> {
        self.definitions.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn definition(&self, name: &str) -> Option<SchemaId> {
        self.definitions.get(name).copied()
    }

    /// Name of the top-level definition whose node *is* `id`.
    pub fn definition_name(&self, id: SchemaId) -> Option<&str> {
        self.definition_names.get(&id).map(String::as_str)
    }

    /// Enumeration definitions are inlined at each use and never get a
    /// generated type of their own.
    pub fn is_enumeration_definition(&self, id: SchemaId) -> bool {
        self.definition_names.contains_key(&id) && self.node(id).is_some_and(|n| n.is_enumeration())
    }

    /// `definition_name`, restricted to definitions that become types.
    pub fn materialized_name(&self, id: SchemaId) -> Option<&str> {
        if self.is_enumeration_definition(id) {
            None
        } else {
            self.definition_name(id)
        }
    }

    fn build_node(&mut self, schema: &Schema) -> SchemaNode {
        let reference = schema.ref_path.as_ref().map(|path| {
            parse_ref_name(path, "definitions")
                .ok()
                .and_then(|name| self.definitions.get(&name).copied())
                .map(Reference::Definition)
                .unwrap_or_else(|| Reference::Dangling(path.clone()))
        });

        let kind = match schema.schema_type {
            None if !schema.properties.is_empty() => SchemaKind::Object,
            None if schema.items.is_some() => SchemaKind::Array,
            other => SchemaKind::from_type(other),
        };

        let item = schema.items.as_deref().map(|s| self.intern(s));
        let properties = schema
            .properties
            .iter()
            .map(|(name, prop)| (name.clone(), self.intern(prop)))
            .collect();
        let all_of = schema.all_of.iter().map(|s| self.intern(s)).collect();
        let one_of = schema.one_of.iter().map(|s| self.intern(s)).collect();
        let any_of = schema.any_of.iter().map(|s| self.intern(s)).collect();

        SchemaNode {
            kind,
            reference,
            origin: NodeOrigin::Schema,
            item,
            properties,
            required: schema.required.clone(),
            all_of,
            one_of,
            any_of,
            enumeration: schema.enum_values.clone(),
            description: schema.description.clone(),
        }
    }
}
