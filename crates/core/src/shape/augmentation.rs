//! Identity and metadata augmentations.
//!
//! Every stored entity carries an identity (`id`, `uuid`) and bookkeeping
//! metadata (`created_at`, `updated_at`, `version`). Neither is ever
//! supplied by an author: identity is assigned and metadata maintained by
//! the server. On a [`Shape`] they are tags, materialised into fields only
//! when the shape is rendered or a payload is checked.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use super::field::{Field, FieldType};
use super::model::Shape;
use crate::types::{DbId, Timestamp, Version};

pub const FIELD_ID: &str = "id";
pub const FIELD_UUID: &str = "uuid";
pub const FIELD_CREATED_AT: &str = "created_at";
pub const FIELD_UPDATED_AT: &str = "updated_at";
pub const FIELD_VERSION: &str = "version";

/// Field names an entity may not declare as intrinsic fields.
pub const RESERVED_FIELDS: &[&str] = &[
    FIELD_ID,
    FIELD_UUID,
    FIELD_CREATED_AT,
    FIELD_UPDATED_AT,
    FIELD_VERSION,
];

// ---------------------------------------------------------------------------
// Typed augmentation records
// ---------------------------------------------------------------------------

/// Identity of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Identity {
    /// Internal sequential key. Never accepted on create.
    #[ts(type = "number")]
    pub id: DbId,
    /// Public-facing stable identifier.
    pub uuid: uuid::Uuid,
}

/// Server-maintained bookkeeping of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Metadata {
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Optimistic concurrency counter.
    #[ts(type = "number")]
    pub version: Version,
}

impl Identity {
    /// Read the identity fields out of a JSON record.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut map = Map::new();
        for key in Augmentation::Identity.field_names() {
            if let Some(v) = record.get(*key) {
                map.insert((*key).to_string(), v.clone());
            }
        }
        serde_json::from_value(Value::Object(map))
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Augmentation {
    Identity,
    Metadata,
}

impl Augmentation {
    pub const ALL: &'static [Augmentation] = &[Self::Identity, Self::Metadata];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Metadata => "metadata",
        }
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Identity => &[FIELD_ID, FIELD_UUID],
            Self::Metadata => &[FIELD_CREATED_AT, FIELD_UPDATED_AT, FIELD_VERSION],
        }
    }

    /// The fields this augmentation contributes, all required.
    pub fn fields(&self) -> Vec<(&'static str, Field)> {
        match self {
            Self::Identity => vec![
                (FIELD_ID, Field::required(FieldType::Integer)),
                (FIELD_UUID, Field::required(FieldType::Uuid)),
            ],
            Self::Metadata => vec![
                (FIELD_CREATED_AT, Field::required(FieldType::Timestamp)),
                (FIELD_UPDATED_AT, Field::required(FieldType::Timestamp)),
                (FIELD_VERSION, Field::required(FieldType::Integer)),
            ],
        }
    }
}

impl std::fmt::Display for Augmentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The augmentation tags present on a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Augmentations {
    pub identity: bool,
    pub metadata: bool,
}

impl Augmentations {
    pub const NONE: Self = Self {
        identity: false,
        metadata: false,
    };
    pub const IDENTITY: Self = Self {
        identity: true,
        metadata: false,
    };
    pub const BOTH: Self = Self {
        identity: true,
        metadata: true,
    };

    pub fn contains(&self, aug: Augmentation) -> bool {
        match aug {
            Augmentation::Identity => self.identity,
            Augmentation::Metadata => self.metadata,
        }
    }

    /// Present tags in wire order.
    pub fn iter(&self) -> impl Iterator<Item = Augmentation> + '_ {
        Augmentation::ALL.iter().copied().filter(|a| self.contains(*a))
    }

    /// Names of the augmentation fields these tags contribute.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.iter().flat_map(|a| a.field_names().iter().copied()).collect()
    }

    pub fn is_canonical(&self) -> bool {
        *self == Self::BOTH
    }
}

// ---------------------------------------------------------------------------
// Composition helpers
// ---------------------------------------------------------------------------

/// `shape` plus `{ id, uuid }`.
pub fn with_identity(mut shape: Shape) -> Shape {
    shape.augmentations.identity = true;
    shape
}

/// `shape` plus `{ created_at, updated_at, version }`.
pub fn with_metadata(mut shape: Shape) -> Shape {
    shape.augmentations.metadata = true;
    shape
}

/// `with_metadata(with_identity(shape))`, the form of every entity definition.
pub fn canonical(shape: Shape) -> Shape {
    with_metadata(with_identity(shape))
}

pub fn without_identity(mut shape: Shape) -> Shape {
    shape.augmentations.identity = false;
    shape
}

pub fn without_metadata(mut shape: Shape) -> Shape {
    shape.augmentations.metadata = false;
    shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bare() -> Shape {
        Shape::new("Dealership").field("name", FieldType::String)
    }

    #[test]
    fn canonical_sets_both_tags() {
        let shape = canonical(bare());
        assert!(shape.augmentations.is_canonical());
        assert!(shape.is_canonical());
    }

    #[test]
    fn helpers_compose_in_any_order() {
        let a = with_identity(with_metadata(bare()));
        let b = canonical(bare());
        assert_eq!(a, b);
    }

    #[test]
    fn stripping_identity_keeps_metadata() {
        let shape = without_identity(canonical(bare()));
        assert!(!shape.augmentations.identity);
        assert!(shape.augmentations.metadata);
    }

    #[test]
    fn tags_do_not_touch_intrinsic_fields() {
        let shape = canonical(bare());
        assert_eq!(shape.fields.len(), 1);
        assert!(shape.fields.contains_key("name"));
    }

    #[test]
    fn field_names_follow_wire_order() {
        assert_eq!(
            Augmentations::BOTH.field_names(),
            vec!["id", "uuid", "created_at", "updated_at", "version"]
        );
        assert_eq!(Augmentations::IDENTITY.field_names(), vec!["id", "uuid"]);
        assert!(Augmentations::NONE.field_names().is_empty());
    }

    #[test]
    fn reserved_fields_are_the_augmentation_fields() {
        let mut names = Augmentations::BOTH.field_names();
        names.sort_unstable();
        let mut reserved = RESERVED_FIELDS.to_vec();
        reserved.sort_unstable();
        assert_eq!(names, reserved);
    }

    #[test]
    fn identity_reads_from_record() {
        let record = json!({
            "id": 12,
            "uuid": "7f1e4a52-8d5b-4f7e-9a8e-2f7f2d1c9b10",
            "name": "Northside Glass"
        });
        let identity = Identity::from_record(record.as_object().unwrap()).unwrap();
        assert_eq!(identity.id, 12);
    }

    #[test]
    fn identity_requires_both_fields() {
        let record = json!({ "id": 12 });
        assert!(Identity::from_record(record.as_object().unwrap()).is_err());
    }

    #[test]
    fn typescript_declarations_name_every_field() {
        let identity = Identity::decl();
        assert!(identity.contains("uuid"));
        let metadata = Metadata::decl();
        assert!(metadata.contains("created_at"));
        assert!(metadata.contains("version"));
    }
}
