//! JSON entity-file format.
//!
//! The entity file is how a schema author declares entities outside of
//! Rust. It is parsed into DTOs, validated, and converted into a
//! [`Catalog`]. The reverse conversion exports a catalog in the same format.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::augmentation::{Augmentation, Augmentations};
use super::catalog::Catalog;
use super::error::{child_path, element_path, ShapeError, ROOT_PATH};
use super::field::{Field, FieldType, View};
use super::model::Shape;

/// Entity name used in errors that concern the file as a whole.
pub const FILE_SCOPE: &str = "(entity file)";

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EntityFile {
    /// Named plain value objects, referenced by name from entity fields.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub objects: IndexMap<String, ObjectSpec>,

    #[validate(
        length(min = 1, message = "the entity file declares no entities"),
        nested
    )]
    pub entities: Vec<EntitySpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EntitySpec {
    #[validate(length(min = 1, message = "entity name is empty"))]
    pub name: String,
    /// Must list both `identity` and `metadata`.
    #[serde(default)]
    pub augmentations: Vec<Augmentation>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

/// A field type, either a bare keyword (`"string"`, `"Inlay"`) or a
/// detailed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Shorthand(String),
    Detailed(FieldSpecDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpecDetail {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of: Option<Box<FieldSpec>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<IndexMap<String, FieldSpec>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl FieldSpecDetail {
    fn of_kind(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            of: None,
            values: Vec::new(),
            name: None,
            fields: None,
            optional: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl EntityFile {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate and convert into a catalog.
    ///
    /// Objects are registered before entities so either may be referenced
    /// from any entity regardless of declaration order.
    pub fn into_catalog(self) -> Result<Catalog, ShapeError> {
        self.validate().map_err(|e| validation_error(&e))?;

        let mut catalog = Catalog::new();
        for (name, object) in &self.objects {
            let fields = convert_fields(name, "", &object.fields)?;
            catalog.insert_object(name.clone(), fields)?;
        }
        for spec in &self.entities {
            let mut tags = Augmentations::NONE;
            for aug in &spec.augmentations {
                match aug {
                    Augmentation::Identity => tags.identity = true,
                    Augmentation::Metadata => tags.metadata = true,
                }
            }
            let shape = Shape {
                name: spec.name.clone(),
                view: View::Canonical,
                augmentations: tags,
                fields: convert_fields(&spec.name, "", &spec.fields)?,
            };
            catalog.insert_entity(shape)?;
        }
        Ok(catalog)
    }

    /// Export a catalog in entity-file form.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let objects = catalog
            .objects()
            .map(|(name, fields)| {
                (
                    name.to_string(),
                    ObjectSpec {
                        fields: export_fields(fields),
                    },
                )
            })
            .collect();
        let entities = catalog
            .entities()
            .map(|shape| EntitySpec {
                name: shape.name.clone(),
                augmentations: shape.augmentations.iter().collect(),
                fields: export_fields(&shape.fields),
            })
            .collect();
        Self { objects, entities }
    }
}

fn validation_error(errors: &ValidationErrors) -> ShapeError {
    let mut reasons: Vec<String> = Vec::new();
    collect_messages("", errors, &mut reasons);
    // Validator reports fields in hash order.
    reasons.sort();
    ShapeError::definition(FILE_SCOPE, ROOT_PATH, reasons.join("; "))
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = child_path(prefix, field);
        match kind {
            ValidationErrorsKind::Field(list) => {
                for e in list {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    out.push(format!("{path}: {msg}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (i, inner) in items {
                    collect_messages(&format!("{path}[{i}]"), inner, out);
                }
            }
        }
    }
}

fn convert_fields(
    entity: &str,
    parent: &str,
    specs: &IndexMap<String, FieldSpec>,
) -> Result<IndexMap<String, Field>, ShapeError> {
    let mut fields = IndexMap::with_capacity(specs.len());
    for (name, spec) in specs {
        let path = child_path(parent, name);
        let optional = matches!(spec, FieldSpec::Detailed(d) if d.optional);
        let ty = convert_type(entity, &path, spec)?;
        fields.insert(name.clone(), Field { ty, optional });
    }
    Ok(fields)
}

fn convert_type(entity: &str, path: &str, spec: &FieldSpec) -> Result<FieldType, ShapeError> {
    match spec {
        FieldSpec::Shorthand(word) => shorthand(entity, path, word),
        FieldSpec::Detailed(detail) => detailed(entity, path, detail),
    }
}

fn shorthand(entity: &str, path: &str, word: &str) -> Result<FieldType, ShapeError> {
    if let Some(ty) = FieldType::from_scalar_name(word) {
        return Ok(ty);
    }
    if word.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Ok(FieldType::Ref(word.to_string()));
    }
    Err(ShapeError::definition(
        entity,
        path,
        format!("unknown field type `{word}`"),
    ))
}

fn detailed(entity: &str, path: &str, d: &FieldSpecDetail) -> Result<FieldType, ShapeError> {
    let inner = |path: &str| -> Result<FieldType, ShapeError> {
        let of = d.of.as_deref().ok_or_else(|| {
            ShapeError::definition(entity, path, format!("`{}` needs an `of` type", d.kind))
        })?;
        convert_type(entity, path, of)
    };
    let name = || -> Result<String, ShapeError> {
        d.name.clone().ok_or_else(|| {
            ShapeError::definition(entity, path, format!("`{}` needs a `name`", d.kind))
        })
    };

    match d.kind.as_str() {
        "enum" => Ok(FieldType::Enum(d.values.clone())),
        "nullable" => Ok(FieldType::nullable(inner(path)?)),
        "array" => Ok(FieldType::array(inner(&element_path(path))?)),
        "set" => Ok(FieldType::set(inner(&element_path(path))?)),
        "object" => {
            let specs = d.fields.as_ref().ok_or_else(|| {
                ShapeError::definition(entity, path, "`object` needs `fields`")
            })?;
            Ok(FieldType::Object(convert_fields(entity, path, specs)?))
        }
        "entity" => Ok(FieldType::entity(name()?)),
        "ref" => Ok(FieldType::Ref(name()?)),
        other => shorthand(entity, path, other),
    }
}

fn export_fields(fields: &IndexMap<String, Field>) -> IndexMap<String, FieldSpec> {
    fields
        .iter()
        .map(|(name, field)| (name.clone(), export_field(field)))
        .collect()
}

fn export_field(field: &Field) -> FieldSpec {
    let spec = export_type(&field.ty);
    if !field.optional {
        return spec;
    }
    let mut detail = match spec {
        FieldSpec::Detailed(detail) => detail,
        FieldSpec::Shorthand(word) => FieldSpecDetail::of_kind(&word),
    };
    detail.optional = true;
    FieldSpec::Detailed(detail)
}

fn export_type(ty: &FieldType) -> FieldSpec {
    let detail = match ty {
        FieldType::Enum(values) => FieldSpecDetail {
            values: values.clone(),
            ..FieldSpecDetail::of_kind("enum")
        },
        FieldType::Nullable(inner) => FieldSpecDetail {
            of: Some(Box::new(export_type(inner))),
            ..FieldSpecDetail::of_kind("nullable")
        },
        FieldType::Array(inner) => FieldSpecDetail {
            of: Some(Box::new(export_type(inner))),
            ..FieldSpecDetail::of_kind("array")
        },
        FieldType::Set(inner) => FieldSpecDetail {
            of: Some(Box::new(export_type(inner))),
            ..FieldSpecDetail::of_kind("set")
        },
        FieldType::Object(fields) => FieldSpecDetail {
            fields: Some(export_fields(fields)),
            ..FieldSpecDetail::of_kind("object")
        },
        FieldType::Entity { name, .. } => FieldSpecDetail {
            name: Some(name.clone()),
            ..FieldSpecDetail::of_kind("entity")
        },
        FieldType::Ref(name) => return FieldSpec::Shorthand(name.clone()),
        scalar => {
            let word = scalar.scalar_name().unwrap_or("json");
            return FieldSpec::Shorthand(word.to_string());
        }
    };
    FieldSpec::Detailed(detail)
}
