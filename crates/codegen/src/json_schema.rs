//! JSON Schema (draft 2020-12) documents for derived shapes.
//!
//! One document per entity, holding the four derived shapes under `$defs`.
//! Nested entities point at their sibling document with a relative `$ref`,
//! so the output directory can be served or bundled as-is.

use glassworks_core::shape::{DerivedShapes, Field, FieldType, Shape, View};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::naming::{file_stem, type_name};

pub const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// File name of an entity's schema document.
pub fn file_name(entity: &str) -> String {
    format!("{}.schema.json", file_stem(entity))
}

pub fn render_entity(derived: &DerivedShapes) -> Value {
    let entity = derived.name();
    let mut defs = Map::new();
    for (_, shape) in derived.iter() {
        defs.insert(type_name(&shape.name, shape.view), shape_schema(entity, shape));
    }
    json!({
        "$schema": DRAFT,
        "$id": file_name(entity),
        "title": entity,
        "$defs": defs,
    })
}

/// Object schema of one derived shape, augmentation fields included.
pub fn shape_schema(entity: &str, shape: &Shape) -> Value {
    let fields: IndexMap<String, Field> = shape.wire_fields().into_iter().collect();
    object_schema(entity, &fields)
}

fn object_schema(entity: &str, fields: &IndexMap<String, Field>) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, field) in fields {
        properties.insert(name.clone(), type_schema(entity, &field.ty));
        if !field.optional {
            required.push(Value::String(name.clone()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Schema of a single field type. `entity` decides whether a nested
/// reference stays inside the current document.
pub fn type_schema(entity: &str, ty: &FieldType) -> Value {
    match ty {
        FieldType::String => json!({ "type": "string" }),
        FieldType::Integer => json!({ "type": "integer" }),
        FieldType::Number => json!({ "type": "number" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Timestamp => json!({ "type": "string", "format": "date-time" }),
        FieldType::Uuid => json!({ "type": "string", "format": "uuid" }),
        FieldType::Json => json!({}),
        FieldType::Enum(values) => json!({ "type": "string", "enum": values }),
        FieldType::Nullable(inner) => json!({
            "anyOf": [type_schema(entity, inner), { "type": "null" }]
        }),
        FieldType::Array(inner) => json!({
            "type": "array",
            "items": type_schema(entity, inner),
        }),
        FieldType::Set(inner) => json!({
            "type": "array",
            "items": type_schema(entity, inner),
            "uniqueItems": true,
        }),
        FieldType::Object(fields) => object_schema(entity, fields),
        FieldType::Entity { name, view } => json!({ "$ref": entity_ref(entity, name, *view) }),
        FieldType::Ref(name) => json!({ "$ref": entity_ref(entity, name, View::Canonical) }),
    }
}

fn entity_ref(current: &str, target: &str, view: View) -> String {
    let def = type_name(target, view);
    if current == target {
        format!("#/$defs/{def}")
    } else {
        format!("{}#/$defs/{def}", file_name(target))
    }
}
