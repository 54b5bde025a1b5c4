//! The set of canonical entity definitions and named value objects.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::augmentation::{Augmentation, RESERVED_FIELDS};
use super::error::{child_path, element_path, ShapeError, ROOT_PATH};
use super::field::{Field, FieldType};
use super::model::Shape;

static TYPE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid regex"));

static FIELD_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid regex"));

/// Entity names whose generated module would collide with the shared
/// `index` and `augmentations` modules.
pub const RESERVED_ENTITY_NAMES: &[&str] = &["Index", "Augmentations"];

/// What a name resolves to in a catalog.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Entity(&'a Shape),
    Object(&'a IndexMap<String, Field>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entities: IndexMap<String, Shape>,
    objects: IndexMap<String, IndexMap<String, Field>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canonical entity definition.
    ///
    /// Rejects entities that are not canonical (both augmentations), that
    /// declare a reserved augmentation field themselves, or that break the
    /// naming rules. [`RESERVED_ENTITY_NAMES`] are refused as entity names.
    pub fn insert_entity(&mut self, shape: Shape) -> Result<(), ShapeError> {
        let entity = shape.name.clone();
        check_type_name(&entity, &entity)?;
        if RESERVED_ENTITY_NAMES.contains(&entity.as_str()) {
            return Err(ShapeError::definition(
                &entity,
                ROOT_PATH,
                format!("`{entity}` is reserved for a generated module name"),
            ));
        }
        self.check_unused(&entity)?;

        for aug in Augmentation::ALL {
            if !shape.augmentations.contains(*aug) {
                return Err(ShapeError::definition(
                    &entity,
                    ROOT_PATH,
                    format!("missing `{aug}` augmentation; entities must be declared canonical"),
                ));
            }
        }

        for name in shape.fields.keys() {
            if RESERVED_FIELDS.contains(&name.as_str()) {
                return Err(ShapeError::definition(
                    &entity,
                    name,
                    format!("`{name}` is reserved for the identity/metadata augmentations"),
                ));
            }
        }
        check_fields(&entity, "", &shape.fields)?;

        self.entities.insert(entity, shape);
        Ok(())
    }

    /// Register a named plain value object.
    pub fn insert_object(
        &mut self,
        name: impl Into<String>,
        fields: IndexMap<String, Field>,
    ) -> Result<(), ShapeError> {
        let name = name.into();
        check_type_name(&name, &name)?;
        self.check_unused(&name)?;
        check_fields(&name, "", &fields)?;
        self.objects.insert(name, fields);
        Ok(())
    }

    fn check_unused(&self, name: &str) -> Result<(), ShapeError> {
        if self.entities.contains_key(name) || self.objects.contains_key(name) {
            return Err(ShapeError::definition(
                name,
                ROOT_PATH,
                format!("`{name}` is declared more than once"),
            ));
        }
        Ok(())
    }

    pub fn entity(&self, name: &str) -> Option<&Shape> {
        self.entities.get(name)
    }

    pub fn require_entity(&self, name: &str) -> Result<&Shape, ShapeError> {
        self.entities
            .get(name)
            .ok_or_else(|| ShapeError::UnknownEntity(name.to_string()))
    }

    pub fn object(&self, name: &str) -> Option<&IndexMap<String, Field>> {
        self.objects.get(name)
    }

    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(shape) = self.entities.get(name) {
            return Some(Resolved::Entity(shape));
        }
        self.objects.get(name).map(Resolved::Object)
    }

    /// Entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &Shape> {
        self.entities.values()
    }

    /// Named objects in declaration order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Field>)> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Project every entity with every method, surfacing the first error.
    pub fn validate(&self) -> Result<(), ShapeError> {
        super::projection::project_all(self).map(|_| ())
    }
}

fn check_type_name(entity: &str, name: &str) -> Result<(), ShapeError> {
    if TYPE_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ShapeError::definition(
            entity,
            ROOT_PATH,
            format!("type name `{name}` must be PascalCase"),
        ))
    }
}

fn check_fields(
    entity: &str,
    parent: &str,
    fields: &IndexMap<String, Field>,
) -> Result<(), ShapeError> {
    for (name, field) in fields {
        let path = child_path(parent, name);
        if !FIELD_NAME_RE.is_match(name) {
            return Err(ShapeError::definition(
                entity,
                &path,
                format!("field name `{name}` must be snake_case"),
            ));
        }
        check_type(entity, &path, &field.ty)?;
    }
    Ok(())
}

fn check_type(entity: &str, path: &str, ty: &FieldType) -> Result<(), ShapeError> {
    match ty {
        FieldType::Enum(values) => {
            if values.is_empty() {
                return Err(ShapeError::definition(entity, path, "enum has no values"));
            }
            for (i, v) in values.iter().enumerate() {
                if values[..i].contains(v) {
                    return Err(ShapeError::definition(
                        entity,
                        path,
                        format!("enum value `{v}` is listed twice"),
                    ));
                }
            }
            Ok(())
        }
        FieldType::Nullable(inner) => {
            if inner.is_nullable() {
                return Err(ShapeError::definition(entity, path, "nullable of nullable"));
            }
            check_type(entity, path, inner)
        }
        FieldType::Array(inner) | FieldType::Set(inner) => {
            check_type(entity, &element_path(path), inner)
        }
        FieldType::Object(fields) => check_fields(entity, path, fields),
        FieldType::Entity { name, .. } | FieldType::Ref(name) => {
            check_type_name(entity, name).map_err(|_| {
                let reason = format!("type name `{name}` must be PascalCase");
                ShapeError::definition(entity, path, reason)
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{canonical, with_identity};
    use assert_matches::assert_matches;

    fn dealership() -> Shape {
        canonical(
            Shape::new("Dealership")
                .field("name", FieldType::String)
                .field("city", FieldType::nullable(FieldType::String)),
        )
    }

    #[test]
    fn accepts_canonical_entity() {
        let mut catalog = Catalog::new();
        catalog.insert_entity(dealership()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.entity("Dealership").is_some());
    }

    #[test]
    fn rejects_missing_metadata() {
        let mut catalog = Catalog::new();
        let shape = with_identity(Shape::new("Dealership").field("name", FieldType::String));
        let err = catalog.insert_entity(shape).unwrap_err();
        assert_matches!(err, ShapeError::Definition { ref reason, .. } if reason.contains("metadata"));
    }

    #[test]
    fn rejects_reserved_field_name() {
        let mut catalog = Catalog::new();
        let shape = canonical(Shape::new("Dealership").field("version", FieldType::String));
        let err = catalog.insert_entity(shape).unwrap_err();
        assert_matches!(err, ShapeError::Definition { ref path, .. } if path == "version");
    }

    #[test]
    fn reserved_names_are_allowed_inside_value_objects() {
        let mut catalog = Catalog::new();
        let shape = canonical(Shape::new("Proof").field(
            "artwork",
            FieldType::object([("version", Field::required(FieldType::Integer))]),
        ));
        catalog.insert_entity(shape).unwrap();
    }

    #[test]
    fn rejects_reserved_entity_names() {
        for name in RESERVED_ENTITY_NAMES {
            let mut catalog = Catalog::new();
            let err = catalog
                .insert_entity(canonical(Shape::new(*name).field("label", FieldType::String)))
                .unwrap_err();
            assert_matches!(
                err,
                ShapeError::Definition { ref entity, ref reason, .. }
                    if entity == name && reason.contains("reserved")
            );
        }
    }

    #[test]
    fn rejects_duplicate_names_across_kinds() {
        let mut catalog = Catalog::new();
        catalog.insert_entity(dealership()).unwrap();
        let err = catalog
            .insert_object("Dealership", IndexMap::new())
            .unwrap_err();
        assert_matches!(err, ShapeError::Definition { .. });
    }

    #[test]
    fn rejects_bad_identifiers() {
        let mut catalog = Catalog::new();
        assert!(catalog
            .insert_entity(canonical(Shape::new("dealership")))
            .is_err());
        let err = catalog
            .insert_entity(canonical(Shape::new("Dealer").field("Name", FieldType::String)))
            .unwrap_err();
        assert_matches!(err, ShapeError::Definition { ref path, .. } if path == "Name");
    }

    #[test]
    fn rejects_empty_and_duplicate_enums() {
        let mut catalog = Catalog::new();
        let empty = canonical(Shape::new("Order").field("status", FieldType::Enum(vec![])));
        assert!(catalog.insert_entity(empty).is_err());
        let dup = canonical(
            Shape::new("Order").field("status", FieldType::enumeration(["open", "open"])),
        );
        assert!(catalog.insert_entity(dup).is_err());
    }

    #[test]
    fn nested_paths_are_reported() {
        let mut catalog = Catalog::new();
        let shape = canonical(Shape::new("Project").field(
            "rooms",
            FieldType::array(FieldType::object([(
                "Label",
                Field::required(FieldType::String),
            )])),
        ));
        let err = catalog.insert_entity(shape).unwrap_err();
        assert_matches!(err, ShapeError::Definition { ref path, .. } if path == "rooms[].Label");
    }

    #[test]
    fn resolve_distinguishes_entities_and_objects() {
        let mut catalog = Catalog::new();
        catalog.insert_entity(dealership()).unwrap();
        catalog
            .insert_object(
                "Dimensions",
                IndexMap::from([("width".to_string(), Field::required(FieldType::Number))]),
            )
            .unwrap();
        assert_matches!(catalog.resolve("Dealership"), Some(Resolved::Entity(_)));
        assert_matches!(catalog.resolve("Dimensions"), Some(Resolved::Object(_)));
        assert_matches!(catalog.resolve("Missing"), None);
    }

    #[test]
    fn require_entity_reports_unknown() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.require_entity("Ghost").unwrap_err(),
            ShapeError::UnknownEntity("Ghost".to_string())
        );
    }
}
