use indexmap::IndexMap;

use super::augmentation::Augmentations;
use super::field::{Field, FieldType, View};

/// A named shape: augmentation tags plus intrinsic fields.
///
/// The same type describes a canonical definition and each of its derived
/// projections; `view` says which one it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub name: String,
    pub view: View,
    pub augmentations: Augmentations,
    /// Intrinsic fields in declaration order.
    pub fields: IndexMap<String, Field>,
}

impl Shape {
    /// A bare shape with no augmentations and no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            view: View::Canonical,
            augmentations: Augmentations::NONE,
            fields: IndexMap::new(),
        }
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.insert(name.into(), Field::required(ty));
        self
    }

    /// Add a field that may be omitted.
    pub fn optional_field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.insert(name.into(), Field::optional(ty));
        self
    }

    pub fn is_canonical(&self) -> bool {
        self.augmentations.is_canonical()
    }

    /// Names of the intrinsic fields in declaration order.
    pub fn intrinsic_field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Every field as it appears on the wire: identity fields first, then
    /// intrinsic fields, then metadata fields.
    pub fn wire_fields(&self) -> Vec<(String, Field)> {
        let mut out = Vec::with_capacity(self.fields.len() + 5);
        if self.augmentations.identity {
            for (name, field) in super::Augmentation::Identity.fields() {
                out.push((name.to_string(), field));
            }
        }
        for (name, field) in &self.fields {
            out.push((name.clone(), field.clone()));
        }
        if self.augmentations.metadata {
            for (name, field) in super::Augmentation::Metadata.fields() {
                out.push((name.to_string(), field));
            }
        }
        out
    }

    pub fn wire_field_names(&self) -> Vec<String> {
        self.wire_fields().into_iter().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::canonical;

    #[test]
    fn builder_keeps_declaration_order() {
        let shape = Shape::new("PriceGroup")
            .field("code", FieldType::String)
            .field("label", FieldType::String)
            .optional_field("notes", FieldType::String);
        assert_eq!(shape.intrinsic_field_names(), vec!["code", "label", "notes"]);
        assert!(shape.fields["notes"].optional);
        assert!(!shape.fields["code"].optional);
    }

    #[test]
    fn wire_fields_materialise_tags() {
        let shape = canonical(Shape::new("PriceGroup").field("code", FieldType::String));
        assert_eq!(
            shape.wire_field_names(),
            vec!["id", "uuid", "code", "created_at", "updated_at", "version"]
        );
    }

    #[test]
    fn bare_shape_has_only_intrinsic_wire_fields() {
        let shape = Shape::new("PriceGroup").field("code", FieldType::String);
        assert_eq!(shape.wire_field_names(), vec!["code"]);
    }
}
