//! Resolve a chosen (route, method) pair back into its operation and the
//! developer-facing artifacts for it. Lookup failures are values, never
//! panics: callers present them as ordinary outcomes.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::ResolveError;
use crate::refs::{collect_schema_refs, resolve_schema_ref, schema_ref_name};
use crate::sample::sample_from_schema;
use crate::spec::{ApiDocument, HttpMethod, Operation, Schema, SchemaOrRef};

/// Placeholder host used in synthesized commands.
const COMMAND_HOST: &str = "http://<HOST>";

/// Look up an operation, tolerating trailing-slash variance: `/foo` and
/// `/foo/` are equivalent, first structural match in document order wins.
pub fn find_operation<'a>(
    doc: &'a ApiDocument,
    route: &str,
    method: HttpMethod,
) -> Option<&'a Operation> {
    let item = match doc.paths.get(route) {
        Some(item) => Some(item),
        None => {
            let wanted = route.trim_end_matches('/');
            doc.paths
                .iter()
                .find_map(|(path, item)| (path.trim_end_matches('/') == wanted).then_some(item))
        }
    }?;
    item.operation(method)
}

/// The descriptive artifact for one resolved operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSummary {
    pub route: String,
    pub method: HttpMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    pub schema_refs: Vec<String>,
}

pub fn operation_summary(
    doc: &ApiDocument,
    route: &str,
    method: HttpMethod,
) -> Result<OperationSummary, ResolveError> {
    let op = find_operation(doc, route, method).ok_or(ResolveError::OperationNotFound)?;
    Ok(OperationSummary {
        route: route.to_string(),
        method,
        summary: op.summary.clone(),
        description: op.description.clone(),
        operation_id: op.operation_id.clone(),
        schema_refs: collect_schema_refs(op),
    })
}

/// The named schemas an operation references. Unresolvable refs stay in
/// `refs` but contribute nothing to `schemas`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaBundle {
    pub schemas: IndexMap<String, Schema>,
    pub refs: Vec<String>,
}

pub fn operation_schemas(
    doc: &ApiDocument,
    route: &str,
    method: HttpMethod,
) -> Result<SchemaBundle, ResolveError> {
    let op = find_operation(doc, route, method).ok_or(ResolveError::OperationNotFound)?;
    let refs = collect_schema_refs(op);
    let mut schemas = IndexMap::new();
    for ref_path in &refs {
        if let (Some(name), Some(schema)) =
            (schema_ref_name(ref_path), resolve_schema_ref(doc, ref_path))
        {
            schemas.insert(name.to_string(), schema.clone());
        }
    }
    Ok(SchemaBundle { schemas, refs })
}

/// A generated example request body for one media type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePayload {
    pub content_type: String,
    pub sample: Value,
    pub schema_ref: Option<String>,
}

/// Sample the first request-body media type whose schema is inline or whose
/// ref resolves. A media type without a schema yields a null sample.
pub fn operation_sample(
    doc: &ApiDocument,
    route: &str,
    method: HttpMethod,
) -> Result<SamplePayload, ResolveError> {
    let op = find_operation(doc, route, method).ok_or(ResolveError::OperationNotFound)?;
    if let Some(body) = &op.request_body {
        for (content_type, media) in &body.content {
            match &media.schema {
                Some(SchemaOrRef::Ref { ref_path }) => {
                    if let Some(schema) = resolve_schema_ref(doc, ref_path) {
                        return Ok(SamplePayload {
                            content_type: content_type.clone(),
                            sample: sample_from_schema(schema),
                            schema_ref: Some(ref_path.clone()),
                        });
                    }
                    // Unresolvable ref: try the next media type.
                }
                Some(SchemaOrRef::Schema(schema)) => {
                    return Ok(SamplePayload {
                        content_type: content_type.clone(),
                        sample: sample_from_schema(schema),
                        schema_ref: None,
                    });
                }
                None => {
                    return Ok(SamplePayload {
                        content_type: content_type.clone(),
                        sample: Value::Null,
                        schema_ref: None,
                    });
                }
            }
        }
    }
    Err(ResolveError::NoRequestBody)
}

/// Build an example invocation command. Path parameters stay as their
/// `{name}` placeholders; the first media type producing a non-null sample
/// contributes the body; any declared security requirement adds a
/// placeholder bearer header.
pub fn curl_command(
    doc: &ApiDocument,
    route: &str,
    method: HttpMethod,
) -> Result<String, ResolveError> {
    let op = find_operation(doc, route, method).ok_or(ResolveError::OperationNotFound)?;

    let mut command = format!("curl -X {} \"{}{}\"", method.as_upper(), COMMAND_HOST, route);

    if let Some(body) = &op.request_body {
        for (content_type, media) in &body.content {
            let sample = match &media.schema {
                Some(SchemaOrRef::Ref { ref_path }) => {
                    resolve_schema_ref(doc, ref_path).map(sample_from_schema)
                }
                Some(SchemaOrRef::Schema(schema)) => Some(sample_from_schema(schema)),
                None => None,
            };
            match sample {
                Some(sample) if !sample.is_null() => {
                    let data = serde_json::to_string(&sample).unwrap_or_default();
                    command.push_str(&format!(" -H \"Content-Type: {content_type}\" -d '{data}'"));
                    break;
                }
                _ => {}
            }
        }
    }

    if has_security(doc, op) {
        command.push_str(" -H \"Authorization: Bearer <TOKEN>\"");
    }
    Ok(command)
}

/// Presence of any non-empty requirement list, on the operation or
/// globally, is all that matters; the scheme is never inspected.
fn has_security(doc: &ApiDocument, op: &Operation) -> bool {
    op.security.as_deref().is_some_and(|s| !s.is_empty())
        || doc.security.as_deref().is_some_and(|s| !s.is_empty())
}
