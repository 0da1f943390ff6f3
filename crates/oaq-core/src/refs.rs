//! Schema reference handling. Only `#/components/schemas/<Name>` pointers
//! are ever dereferenced; anything else resolves to "not found".

use crate::spec::{ApiDocument, Operation, Schema, SchemaOrRef};

pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// The trailing name segment of a components-schema ref, used for display
/// and name lookups.
pub fn schema_ref_name(ref_path: &str) -> Option<&str> {
    if !ref_path.starts_with(SCHEMA_REF_PREFIX) {
        return None;
    }
    ref_path.rsplit('/').next()
}

/// Resolve a ref against the document's named schemas. A ref that points at
/// another ref is left unresolved.
pub fn resolve_schema_ref<'a>(doc: &'a ApiDocument, ref_path: &str) -> Option<&'a Schema> {
    let name = schema_ref_name(ref_path)?;
    match doc.components.as_ref()?.schemas.get(name)? {
        SchemaOrRef::Schema(schema) => Some(schema),
        SchemaOrRef::Ref { .. } => None,
    }
}

/// Collect the schema refs an operation mentions in its request body content
/// and its parameters, deduplicated in first-seen order. The ranker and the
/// resolver share this rule.
pub fn collect_schema_refs(op: &Operation) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    let mut push = |ref_path: &str| {
        if ref_path.starts_with(SCHEMA_REF_PREFIX) && !refs.iter().any(|r| r == ref_path) {
            refs.push(ref_path.to_string());
        }
    };

    if let Some(body) = &op.request_body {
        for media in body.content.values() {
            if let Some(SchemaOrRef::Ref { ref_path }) = &media.schema {
                push(ref_path);
            }
        }
    }
    for param in &op.parameters {
        if let Some(SchemaOrRef::Ref { ref_path }) = &param.schema {
            push(ref_path);
        }
    }
    refs
}
