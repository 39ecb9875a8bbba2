use indexmap::IndexMap;

use super::operations::{MethodDefinition, ServiceDefinition};
use crate::transform::name_normalizer::{is_identifier, normalize_name};

/// Tag used for operations that declare none.
pub const UNKNOWN_TAG: &str = "Unknown";

/// Group methods into services by tag, in first-seen tag order.
pub fn group_by_tag(methods: Vec<MethodDefinition>) -> Vec<ServiceDefinition> {
    let mut groups: IndexMap<String, Vec<MethodDefinition>> = IndexMap::new();

    for method in methods {
        groups.entry(method.tag.clone()).or_default().push(method);
    }

    groups
        .into_iter()
        .map(|(name, methods)| ServiceDefinition {
            identifier: service_identifier(&name),
            name,
            methods,
        })
        .collect()
}

/// A tag is used verbatim when it is already a valid identifier.
/// e.g. "pet" → "pet", "pet store" → "PetStore"
fn service_identifier(tag: &str) -> String {
    if is_identifier(tag) {
        tag.to_string()
    } else {
        normalize_name(tag).pascal_case
    }
}
