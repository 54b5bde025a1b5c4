//! Structural check of a JSON payload against a derived shape.
//!
//! Pure logic, no I/O. Every problem is collected rather than stopping at
//! the first, so a form can highlight all offending fields at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::catalog::{Catalog, Resolved};
use super::error::{child_path, ShapeError};
use super::field::{Field, FieldType, View};
use super::model::Shape;
use super::projection::resolve_view;

pub const KIND_MISSING: &str = "missing";
pub const KIND_UNKNOWN_FIELD: &str = "unknown_field";
pub const KIND_TYPE: &str = "type";
pub const KIND_NULL: &str = "null";
pub const KIND_ENUM: &str = "enum";
pub const KIND_FORMAT: &str = "format";
pub const KIND_DUPLICATE: &str = "duplicate";

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Result of checking one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub is_valid: bool,
    pub violations: Vec<FieldViolation>,
}

impl ConformanceReport {
    pub fn violation(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

/// Check `value` against `shape`, including its augmentation fields.
///
/// Fails only when the shape itself cannot be resolved; payload problems
/// are reported in the returned report.
pub fn check(
    value: &Value,
    shape: &Shape,
    catalog: &Catalog,
) -> Result<ConformanceReport, ShapeError> {
    let mut checker = Checker {
        catalog,
        entity: &shape.name,
        violations: Vec::new(),
    };
    checker.check_record("", value, &shape.wire_fields())?;
    Ok(ConformanceReport {
        is_valid: checker.violations.is_empty(),
        violations: checker.violations,
    })
}

struct Checker<'a> {
    catalog: &'a Catalog,
    entity: &'a str,
    violations: Vec<FieldViolation>,
}

impl Checker<'_> {
    fn push(&mut self, path: &str, kind: &str, message: String, value: Option<&Value>) {
        self.violations.push(FieldViolation {
            field: path.to_string(),
            kind: kind.to_string(),
            message,
            value: value.cloned(),
        });
    }

    fn check_record(
        &mut self,
        path: &str,
        value: &Value,
        fields: &[(String, Field)],
    ) -> Result<(), ShapeError> {
        let Some(map) = value.as_object() else {
            self.push(path, KIND_TYPE, "expected an object".to_string(), Some(value));
            return Ok(());
        };
        self.check_map(path, map, fields)
    }

    fn check_map(
        &mut self,
        path: &str,
        map: &Map<String, Value>,
        fields: &[(String, Field)],
    ) -> Result<(), ShapeError> {
        for (name, field) in fields {
            let field_path = child_path(path, name);
            match map.get(name) {
                Some(v) => self.check_value(&field_path, v, &field.ty)?,
                None if field.optional => {}
                None => self.push(
                    &field_path,
                    KIND_MISSING,
                    format!("`{name}` is required"),
                    None,
                ),
            }
        }
        for (key, v) in map {
            if !fields.iter().any(|(name, _)| name == key) {
                self.push(
                    &child_path(path, key),
                    KIND_UNKNOWN_FIELD,
                    format!("`{key}` is not part of this shape"),
                    Some(v),
                );
            }
        }
        Ok(())
    }

    fn check_value(&mut self, path: &str, v: &Value, ty: &FieldType) -> Result<(), ShapeError> {
        if let FieldType::Nullable(inner) = ty {
            if v.is_null() {
                return Ok(());
            }
            return self.check_value(path, v, inner);
        }
        if v.is_null() {
            self.push(path, KIND_NULL, "value may not be null".to_string(), None);
            return Ok(());
        }

        match ty {
            FieldType::String => self.expect(path, v, v.is_string(), "a string"),
            FieldType::Integer => self.expect(path, v, v.is_i64() || v.is_u64(), "an integer"),
            FieldType::Number => self.expect(path, v, v.is_number(), "a number"),
            FieldType::Boolean => self.expect(path, v, v.is_boolean(), "a boolean"),
            FieldType::Json => {}
            FieldType::Timestamp => match v.as_str() {
                Some(s) if chrono::DateTime::parse_from_rfc3339(s).is_ok() => {}
                Some(_) => self.push(
                    path,
                    KIND_FORMAT,
                    "expected an RFC 3339 timestamp".to_string(),
                    Some(v),
                ),
                None => self.expect(path, v, false, "a timestamp string"),
            },
            FieldType::Uuid => match v.as_str() {
                Some(s) if uuid::Uuid::parse_str(s).is_ok() => {}
                Some(_) => self.push(path, KIND_FORMAT, "expected a UUID".to_string(), Some(v)),
                None => self.expect(path, v, false, "a UUID string"),
            },
            FieldType::Enum(values) => match v.as_str() {
                Some(s) if values.iter().any(|allowed| allowed == s) => {}
                _ => self.push(
                    path,
                    KIND_ENUM,
                    format!("must be one of: {}", values.join(", ")),
                    Some(v),
                ),
            },
            FieldType::Array(inner) => self.check_elements(path, v, inner, false)?,
            FieldType::Set(inner) => self.check_elements(path, v, inner, true)?,
            FieldType::Object(fields) => {
                let fields: Vec<_> = fields.iter().map(|(k, f)| (k.clone(), f.clone())).collect();
                self.check_record(path, v, &fields)?;
            }
            FieldType::Entity { name, view } => {
                let shape = resolve_view(name, *view, self.catalog)?;
                self.check_record(path, v, &shape.wire_fields())?;
            }
            FieldType::Ref(name) => self.check_ref(path, v, name)?,
            FieldType::Nullable(inner) => self.check_value(path, v, inner)?,
        }
        Ok(())
    }

    fn check_ref(&mut self, path: &str, v: &Value, name: &str) -> Result<(), ShapeError> {
        let catalog = self.catalog;
        match catalog.resolve(name) {
            Some(Resolved::Entity(_)) => {
                let shape = resolve_view(name, View::Canonical, catalog)?;
                self.check_record(path, v, &shape.wire_fields())
            }
            Some(Resolved::Object(fields)) => {
                let fields: Vec<_> = fields.iter().map(|(k, f)| (k.clone(), f.clone())).collect();
                self.check_record(path, v, &fields)
            }
            None => Err(ShapeError::ProjectionAmbiguity {
                entity: self.entity.to_string(),
                path: path.to_string(),
                type_name: name.to_string(),
            }),
        }
    }

    fn check_elements(
        &mut self,
        path: &str,
        v: &Value,
        inner: &FieldType,
        unique: bool,
    ) -> Result<(), ShapeError> {
        let Some(items) = v.as_array() else {
            self.expect(path, v, false, "an array");
            return Ok(());
        };
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{i}]");
            self.check_value(&item_path, item, inner)?;
            if unique && items[..i].contains(item) {
                self.push(
                    &item_path,
                    KIND_DUPLICATE,
                    "set elements must be unique".to_string(),
                    Some(item),
                );
            }
        }
        Ok(())
    }

    fn expect(&mut self, path: &str, v: &Value, ok: bool, what: &str) {
        if !ok {
            self.push(path, KIND_TYPE, format!("expected {what}"), Some(v));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{canonical, to_get, to_patch, to_post, to_put};
    use serde_json::json;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert_entity(canonical(
                Shape::new("Inlay")
                    .field("label", FieldType::String)
                    .field("width", FieldType::Number),
            ))
            .unwrap();
        catalog
            .insert_entity(canonical(
                Shape::new("Project")
                    .field("name", FieldType::String)
                    .field("status", FieldType::enumeration(["draft", "submitted"]))
                    .field("due_on", FieldType::nullable(FieldType::Timestamp))
                    .field("tags", FieldType::set(FieldType::String))
                    .field("inlays", FieldType::array(FieldType::entity("Inlay"))),
            ))
            .unwrap();
        catalog
    }

    fn meta() -> Value {
        json!({
            "created_at": "2026-03-01T09:00:00Z",
            "updated_at": "2026-03-02T09:00:00Z",
            "version": 1
        })
    }

    fn inlay_get(id: i64) -> Value {
        let mut v = json!({
            "id": id,
            "uuid": "0c7c3f5e-9a3c-4f61-8d9b-8a1f6e2b1c01",
            "label": "Rose window",
            "width": 24.5
        });
        v.as_object_mut()
            .unwrap()
            .extend(meta().as_object().unwrap().clone());
        v
    }

    fn project_get() -> Value {
        let mut v = json!({
            "id": 1,
            "uuid": "5b0f7a7e-1d7e-4c36-b4ce-3f7b4f0d7a11",
            "name": "Lobby",
            "status": "draft",
            "due_on": null,
            "tags": ["lobby", "east"],
            "inlays": [inlay_get(10), inlay_get(11)]
        });
        v.as_object_mut()
            .unwrap()
            .extend(meta().as_object().unwrap().clone());
        v
    }

    #[test]
    fn valid_get_payload_passes() {
        let catalog = catalog();
        let get = to_get(catalog.entity("Project").unwrap(), &catalog).unwrap();
        let report = check(&project_get(), &get, &catalog).unwrap();
        assert!(report.is_valid, "{:?}", report.violations);
    }

    #[test]
    fn get_payload_missing_version_fails() {
        let catalog = catalog();
        let get = to_get(catalog.entity("Project").unwrap(), &catalog).unwrap();
        let mut payload = project_get();
        payload.as_object_mut().unwrap().remove("version");
        let report = check(&payload, &get, &catalog).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.violation("version").unwrap().kind, KIND_MISSING);
    }

    #[test]
    fn post_rejects_identity_fields() {
        let catalog = catalog();
        let post = to_post(catalog.entity("Project").unwrap(), &catalog).unwrap();
        let payload = json!({
            "id": 5,
            "name": "Lobby",
            "status": "draft",
            "due_on": null,
            "tags": [],
            "inlays": [{"label": "Rose", "width": 3}]
        });
        let report = check(&payload, &post, &catalog).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].field, "id");
        assert_eq!(report.violations[0].kind, KIND_UNKNOWN_FIELD);
    }

    #[test]
    fn post_rejects_augmented_nested_entity() {
        let catalog = catalog();
        let post = to_post(catalog.entity("Project").unwrap(), &catalog).unwrap();
        let payload = json!({
            "name": "Lobby",
            "status": "draft",
            "due_on": null,
            "tags": [],
            "inlays": [inlay_get(3)]
        });
        let report = check(&payload, &post, &catalog).unwrap();
        assert!(report.violation("inlays[0].id").is_some());
        assert!(report.violation("inlays[0].version").is_some());
    }

    #[test]
    fn patch_accepts_omitted_fields_but_requires_identity() {
        let catalog = catalog();
        let patch = to_patch(catalog.entity("Project").unwrap(), &catalog).unwrap();
        let ok = json!({"id": 1, "uuid": "5b0f7a7e-1d7e-4c36-b4ce-3f7b4f0d7a11", "name": "Atrium"});
        assert!(check(&ok, &patch, &catalog).unwrap().is_valid);

        let missing = json!({"name": "Atrium"});
        let report = check(&missing, &patch, &catalog).unwrap();
        assert_eq!(report.violation("id").unwrap().kind, KIND_MISSING);
        assert_eq!(report.violation("uuid").unwrap().kind, KIND_MISSING);
    }

    #[test]
    fn put_requires_every_field() {
        let catalog = catalog();
        let put = to_put(catalog.entity("Project").unwrap(), &catalog).unwrap();
        let payload = json!({"id": 1, "uuid": "5b0f7a7e-1d7e-4c36-b4ce-3f7b4f0d7a11", "name": "Atrium"});
        let report = check(&payload, &put, &catalog).unwrap();
        assert!(report.violation("status").is_some());
        assert!(report.violation("created_at").is_none());
    }

    #[test]
    fn value_level_problems_are_reported() {
        let catalog = catalog();
        let get = to_get(catalog.entity("Project").unwrap(), &catalog).unwrap();
        let mut payload = project_get();
        let map = payload.as_object_mut().unwrap();
        map.insert("status".into(), json!("shipped"));
        map.insert("name".into(), Value::Null);
        map.insert("tags".into(), json!(["a", "a"]));
        map.insert("created_at".into(), json!("yesterday"));
        map.insert("uuid".into(), json!("not-a-uuid"));

        let report = check(&payload, &get, &catalog).unwrap();
        assert_eq!(report.violation("status").unwrap().kind, KIND_ENUM);
        assert_eq!(report.violation("name").unwrap().kind, KIND_NULL);
        assert_eq!(report.violation("tags[1]").unwrap().kind, KIND_DUPLICATE);
        assert_eq!(report.violation("created_at").unwrap().kind, KIND_FORMAT);
        assert_eq!(report.violation("uuid").unwrap().kind, KIND_FORMAT);
    }

    #[test]
    fn non_object_payload_is_a_type_violation() {
        let catalog = catalog();
        let get = to_get(catalog.entity("Inlay").unwrap(), &catalog).unwrap();
        let report = check(&json!([1, 2]), &get, &catalog).unwrap();
        assert_eq!(report.violations[0].kind, KIND_TYPE);
        assert_eq!(report.violations[0].field, "");
    }
}
