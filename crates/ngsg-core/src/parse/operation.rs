use std::fmt;

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::parameter::ParameterOrRef;
use super::response::ResponseOrRef;

/// HTTP verbs a Swagger 2.0 path item may declare.
pub const HTTP_VERBS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

/// A path item: shared parameters plus operations keyed by lowercase HTTP
/// verb, in the order the document declares them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(flatten)]
    pub operations: IndexMap<String, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a Swagger path item")
            }

            fn visit_map<A>(self, mut map: A) -> Result<PathItem, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut item = PathItem::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "parameters" {
                        item.parameters = map.next_value()?;
                    } else if HTTP_VERBS.contains(&key.as_str()) {
                        let operation: Operation = map.next_value()?;
                        item.operations.insert(key, operation);
                    } else {
                        // `$ref` path items and `x-` extensions
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(item)
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}
