//! Projection of concrete JSON records between derived shapes.
//!
//! The form layer loads a record in its GET shape and sends it back as a
//! POST, PUT, or PATCH body. Augmentation keys are dropped only at the
//! record level and in nested entity records, so a value object with its
//! own `version` key passes through untouched.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::augmentation::{Augmentations, Identity};
use super::catalog::{Catalog, Resolved};
use super::error::{child_path, element_path, ShapeError};
use super::field::{Field, FieldType};
use super::model::Shape;
use crate::diff::{diff_records, DiffStatus};
use crate::error::CoreError;
use crate::types::Version;

/// Drop every identity and metadata key, recursively through nested
/// entities, turning a read record into a create body.
///
/// The top level is stripped whatever the tags on `shape`, so the canonical
/// definition and its derived POST shape give the same body.
pub fn to_post_value(
    record: &Value,
    shape: &Shape,
    catalog: &Catalog,
) -> Result<Value, ShapeError> {
    let stripper = Stripper {
        catalog,
        entity: &shape.name,
        deep: true,
    };
    stripper.record("", record, Augmentations::BOTH, &shape.fields)
}

/// Drop the metadata keys of a read record, keeping its identity. Nested
/// values are left as they are.
pub fn to_put_value(
    record: &Value,
    shape: &Shape,
    catalog: &Catalog,
) -> Result<Value, ShapeError> {
    let stripper = Stripper {
        catalog,
        entity: &shape.name,
        deep: false,
    };
    let drop = Augmentations {
        identity: false,
        metadata: true,
    };
    stripper.record("", record, drop, &shape.fields)
}

/// Build a minimal PATCH body: the identity of `before` plus every
/// intrinsic field whose value differs in `after`.
///
/// A field removed in `after` is sent as `null` when the field is nullable
/// and otherwise left out, since a patch cannot unset a required field.
pub fn patch_body(before: &Value, after: &Value, shape: &Shape) -> Result<Value, CoreError> {
    let before = as_record(before, "original record")?;
    let after = as_record(after, "edited record")?;

    let identity = Identity::from_record(before)
        .map_err(|e| CoreError::Validation(format!("record is missing its identity: {e}")))?;

    let mut body = Map::new();
    body.insert("id".to_string(), Value::from(identity.id));
    body.insert("uuid".to_string(), Value::String(identity.uuid.to_string()));

    for (name, value) in changed_fields(before, after, shape) {
        body.insert(name, value);
    }
    Ok(Value::Object(body))
}

/// Compare the version a client last read with the stored version.
pub fn check_version(expected: Version, actual: Version) -> Result<(), CoreError> {
    if expected == actual {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "record was modified concurrently: expected version {expected}, found {actual}"
        )))
    }
}

/// Intrinsic fields of `shape` that differ between the two records.
fn changed_fields(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    shape: &Shape,
) -> Vec<(String, Value)> {
    let ignore = shape.augmentations.field_names();
    diff_records(before, after, &ignore)
        .into_iter()
        .filter_map(|diff| {
            let field = shape.fields.get(&diff.field)?;
            match diff.status {
                DiffStatus::Changed | DiffStatus::Added => diff.after.map(|v| (diff.field, v)),
                DiffStatus::Removed if field.ty.is_nullable() => Some((diff.field, Value::Null)),
                _ => None,
            }
        })
        .collect()
}

fn as_record<'v>(value: &'v Value, what: &str) -> Result<&'v Map<String, Value>, CoreError> {
    value
        .as_object()
        .ok_or_else(|| CoreError::Validation(format!("{what} must be a JSON object")))
}

struct Stripper<'a> {
    catalog: &'a Catalog,
    entity: &'a str,
    deep: bool,
}

impl Stripper<'_> {
    fn record(
        &self,
        path: &str,
        value: &Value,
        drop: Augmentations,
        fields: &IndexMap<String, Field>,
    ) -> Result<Value, ShapeError> {
        let Some(map) = value.as_object() else {
            return Ok(value.clone());
        };
        let dropped = drop.field_names();
        let mut out = Map::with_capacity(map.len());
        for (key, v) in map {
            if dropped.contains(&key.as_str()) {
                continue;
            }
            let v = match fields.get(key) {
                Some(field) if self.deep => self.value(&child_path(path, key), v, &field.ty)?,
                _ => v.clone(),
            };
            out.insert(key.clone(), v);
        }
        Ok(Value::Object(out))
    }

    fn value(&self, path: &str, v: &Value, ty: &FieldType) -> Result<Value, ShapeError> {
        match ty {
            FieldType::Nullable(inner) => {
                if v.is_null() {
                    Ok(Value::Null)
                } else {
                    self.value(path, v, inner)
                }
            }
            FieldType::Array(inner) | FieldType::Set(inner) => match v.as_array() {
                Some(items) => {
                    let item_path = element_path(path);
                    let items = items
                        .iter()
                        .map(|item| self.value(&item_path, item, inner))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Value::Array(items))
                }
                None => Ok(v.clone()),
            },
            FieldType::Object(fields) => self.record(path, v, Augmentations::NONE, fields),
            FieldType::Entity { name, .. } => {
                let shape = self.catalog.require_entity(name)?;
                self.record(path, v, Augmentations::BOTH, &shape.fields)
            }
            FieldType::Ref(name) => match self.catalog.resolve(name) {
                Some(Resolved::Entity(shape)) => {
                    self.record(path, v, Augmentations::BOTH, &shape.fields)
                }
                Some(Resolved::Object(fields)) => self.record(path, v, Augmentations::NONE, fields),
                None => Err(ShapeError::ProjectionAmbiguity {
                    entity: self.entity.to_string(),
                    path: path.to_string(),
                    type_name: name.clone(),
                }),
            },
            _ => Ok(v.clone()),
        }
    }
}
