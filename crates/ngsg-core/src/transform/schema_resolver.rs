use std::collections::HashSet;

use log::debug;

use crate::error::ResolveError;

use super::schema_graph::{NodeOrigin, Reference, SchemaGraph, SchemaId, SchemaKind, SchemaNode};

/// Type used whenever a schema cannot be resolved.
pub const FALLBACK_TYPE: &str = "any";

/// Maps schema nodes of a finished [`SchemaGraph`] to TypeScript type expressions.
///
/// Resolution never fails: any error is logged and replaced with [`FALLBACK_TYPE`].
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'g> {
    graph: &'g SchemaGraph,
}

impl<'g> TypeResolver<'g> {
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g SchemaGraph {
        self.graph
    }

    /// Resolve one node to a type expression.
    pub fn resolve(&self, id: SchemaId) -> String {
        self.resolve_guarded(Some(id), &mut HashSet::new())
    }

    /// Like [`TypeResolver::resolve`], for an optional node.
    pub fn resolve_opt(&self, id: Option<SchemaId>) -> String {
        self.resolve_guarded(id, &mut HashSet::new())
    }

    fn resolve_guarded(&self, id: Option<SchemaId>, visiting: &mut HashSet<SchemaId>) -> String {
        let result = id
            .ok_or_else(|| ResolveError::MissingNode("absent schema".to_string()))
            .and_then(|id| self.try_resolve(id, visiting));
        match result {
            Ok(expr) => expr,
            Err(err) => {
                debug!("falling back to `{FALLBACK_TYPE}`: {err}");
                FALLBACK_TYPE.to_string()
            }
        }
    }

    fn try_resolve(
        &self,
        id: SchemaId,
        visiting: &mut HashSet<SchemaId>,
    ) -> Result<String, ResolveError> {
        let node = self
            .graph
            .node(id)
            .ok_or_else(|| ResolveError::MissingNode(format!("{id:?}")))?;

        // Cycle: name the definition instead of expanding it again.
        if !visiting.insert(id) {
            return Ok(self
                .graph
                .materialized_name(id)
                .unwrap_or(FALLBACK_TYPE)
                .to_string());
        }
        let result = self.resolve_node(id, node, visiting);
        visiting.remove(&id);
        result
    }

    fn resolve_node(
        &self,
        id: SchemaId,
        node: &SchemaNode,
        visiting: &mut HashSet<SchemaId>,
    ) -> Result<String, ResolveError> {
        if node.kind == SchemaKind::Array {
            let item = self.resolve_guarded(node.item, visiting);
            // Unions and intersections bind looser than `[]`.
            return Ok(if item.contains(' ') {
                format!("({item})[]")
            } else {
                format!("{item}[]")
            });
        }

        if node.reference.is_none() && node.kind != SchemaKind::None {
            return Ok(match node.kind {
                SchemaKind::Integer => "number".to_string(),
                SchemaKind::String if node.is_enumeration() => enumeration_union(node),
                SchemaKind::Object => self
                    .graph
                    .materialized_name(id)
                    .unwrap_or("object")
                    .to_string(),
                other => other.keyword().to_string(),
            });
        }

        match &node.reference {
            Some(Reference::Definition(target)) if self.graph.is_enumeration_definition(*target) => {
                return Ok(self.resolve_guarded(Some(*target), visiting));
            }
            Some(Reference::Definition(target)) => {
                return self
                    .graph
                    .definition_name(*target)
                    .map(String::from)
                    .ok_or_else(|| ResolveError::MissingNode(format!("{target:?}")));
            }
            Some(Reference::Dangling(path)) => {
                return Err(ResolveError::Dangling(path.clone()));
            }
            None => {}
        }

        if let NodeOrigin::Parameter { schema } = node.origin {
            return Ok(self.resolve_guarded(schema, visiting));
        }

        self.resolve_combinators(node, visiting)
    }

    fn resolve_combinators(
        &self,
        node: &SchemaNode,
        visiting: &mut HashSet<SchemaId>,
    ) -> Result<String, ResolveError> {
        let mut fragment: Option<String> = None;

        if !node.one_of.is_empty() {
            fragment = Some(self.join(&node.one_of, " | ", visiting));
        }
        if !node.any_of.is_empty() {
            let any_of = self.join(&node.any_of, " | ", visiting);
            fragment = Some(match fragment {
                Some(prev) => format!("({prev}) | {any_of}"),
                None => any_of,
            });
        }
        if !node.all_of.is_empty() {
            let all_of = self.join(&node.all_of, " & ", visiting);
            fragment = Some(match fragment {
                Some(prev) => format!("({prev}) & {all_of}"),
                None => all_of,
            });
        }

        fragment.ok_or_else(|| {
            ResolveError::MissingNode("schema has no type, reference or combinator".to_string())
        })
    }

    fn join(&self, members: &[SchemaId], separator: &str, visiting: &mut HashSet<SchemaId>) -> String {
        members
            .iter()
            .map(|member| self.resolve_guarded(Some(*member), visiting))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Escape text for a single-quoted TypeScript string literal.
pub fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `'a' | 'b'`, in declaration order.
fn enumeration_union(node: &SchemaNode) -> String {
    node.enumeration
        .iter()
        .map(|value| match value {
            serde_json::Value::String(s) => format!("'{}'", escape_single_quoted(s)),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
