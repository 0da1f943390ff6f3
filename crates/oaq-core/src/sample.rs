//! Best-effort example generation from a schema fragment. The contract is
//! determinism, not fidelity: identical input always yields identical
//! output, and no input raises.

use serde_json::{Map, Value, json};

use crate::spec::{Schema, SchemaOrRef, SchemaType, TypeSet};

/// Recursion bound. Inline JSON cannot cycle, but the cap keeps pathological
/// nesting from blowing the stack.
const MAX_SAMPLE_DEPTH: usize = 32;

/// Convert one schema fragment into a representative example value.
///
/// Objects sample each declared property; arrays yield a single sampled
/// element; strings yield `"string_example"` (or a fixed timestamp for
/// `date-time`); integers, numbers, and booleans yield zero values. Refs
/// inside properties or items are not followed, and composition keywords are
/// ignored; both degrade to null.
pub fn sample_from_schema(schema: &Schema) -> Value {
    sample_at(schema, 0)
}

fn sample_at(schema: &Schema, depth: usize) -> Value {
    if depth >= MAX_SAMPLE_DEPTH {
        return Value::Null;
    }
    let declared = schema.schema_type.as_ref().and_then(TypeSet::as_single);
    // An untyped schema with declared properties counts as an object; a
    // multi-type schema does not.
    if declared == Some(SchemaType::Object)
        || (schema.schema_type.is_none() && !schema.properties.is_empty())
    {
        return object_sample(schema, depth);
    }
    match declared {
        Some(SchemaType::Array) => {
            let item = match schema.items.as_deref() {
                Some(SchemaOrRef::Schema(items)) => sample_at(items, depth + 1),
                _ => Value::Null,
            };
            Value::Array(vec![item])
        }
        Some(SchemaType::String) => {
            if schema.format.as_deref() == Some("date-time") {
                json!("2024-01-01T00:00:00Z")
            } else {
                json!("string_example")
            }
        }
        Some(SchemaType::Integer) => json!(0),
        Some(SchemaType::Number) => json!(0.0),
        Some(SchemaType::Boolean) => json!(false),
        _ => Value::Null,
    }
}

fn object_sample(schema: &Schema, depth: usize) -> Value {
    let mut out = Map::with_capacity(schema.properties.len());
    for (name, prop) in &schema.properties {
        let value = match prop {
            SchemaOrRef::Schema(prop) => sample_at(prop, depth + 1),
            SchemaOrRef::Ref { .. } => Value::Null,
        };
        out.insert(name.clone(), value);
    }
    Value::Object(out)
}
