pub mod document;
pub mod operation;
pub mod schema;

pub use document::{ApiDocument, Components, Info, SecurityRequirement};
pub use operation::{HttpMethod, MediaType, Operation, Parameter, PathItem, RequestBody, Response};
pub use schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};

use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Parse an OpenAPI document from JSON. JSON is the only supported format.
pub fn from_json(input: &str) -> Result<ApiDocument, LoadError> {
    let doc: ApiDocument = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Load an OpenAPI document from a JSON file on disk. The document is built
/// once and treated as read-only afterwards.
pub fn load_document(path: &Path) -> Result<ApiDocument, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    from_json(&content)
}

fn validate_version(doc: &ApiDocument) -> Result<(), LoadError> {
    if !doc.openapi.starts_with("3.") {
        return Err(LoadError::UnsupportedVersion(doc.openapi.clone()));
    }
    Ok(())
}
