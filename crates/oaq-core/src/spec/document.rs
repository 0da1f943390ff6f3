use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::operation::PathItem;
use super::schema::SchemaOrRef;

/// A security requirement: map of scheme name → required scopes. Presence is
/// all this system inspects; the scheme itself is never dereferenced.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Components object holding the reusable named schemas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaOrRef>,
}

/// Top-level OpenAPI 3.x document. Built once at startup and read-only for
/// the process lifetime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(default)]
    pub openapi: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,

    #[serde(
        default,
        deserialize_with = "lenient_paths",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

impl ApiDocument {
    /// Total number of (path, method) operations.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations().count()).sum()
    }

    /// Number of named schemas under components.
    pub fn schema_count(&self) -> usize {
        self.components.as_ref().map_or(0, |c| c.schemas.len())
    }
}

/// A path entry whose value is not an object-shaped path item is skipped,
/// never a load failure.
fn lenient_paths<'de, D>(deserializer: D) -> Result<IndexMap<String, PathItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    let mut paths = IndexMap::with_capacity(raw.len());
    for (route, value) in raw {
        match serde_json::from_value::<PathItem>(value) {
            Ok(item) => {
                paths.insert(route, item);
            }
            Err(err) => log::warn!("skipping malformed path item {route}: {err}"),
        }
    }
    Ok(paths)
}
