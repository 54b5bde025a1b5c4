//! Field types of entity shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which projection a shape, or a reference to a nested entity, represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// The authored definition. Structurally identical to `Get`.
    Canonical,
    Get,
    Post,
    Patch,
    Put,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::Get => "get",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Put => "put",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    /// RFC 3339 timestamp string.
    Timestamp,
    Uuid,
    /// Arbitrary JSON, always a plain value.
    Json,
    Enum(Vec<String>),
    Nullable(Box<FieldType>),
    Array(Box<FieldType>),
    /// An array whose elements are unique.
    Set(Box<FieldType>),
    /// Inline value object. Never carries augmentations.
    Object(IndexMap<String, Field>),
    /// A nested canonical entity, projected along with its parent.
    Entity { name: String, view: View },
    /// A named type not yet resolved to an entity or a plain object.
    Ref(String),
}

impl FieldType {
    pub fn nullable(inner: FieldType) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn array(inner: FieldType) -> Self {
        Self::Array(Box::new(inner))
    }

    pub fn set(inner: FieldType) -> Self {
        Self::Set(Box::new(inner))
    }

    pub fn entity(name: impl Into<String>) -> Self {
        Self::Entity {
            name: name.into(),
            view: View::Canonical,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Field)>,
        S: Into<String>,
    {
        Self::Object(fields.into_iter().map(|(k, f)| (k.into(), f)).collect())
    }

    /// Scalar keyword used in entity files and error messages, if any.
    pub fn scalar_name(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Integer => Some("integer"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::Timestamp => Some("timestamp"),
            Self::Uuid => Some("uuid"),
            Self::Json => Some("json"),
            _ => None,
        }
    }

    pub fn from_scalar_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "timestamp" => Some(Self::Timestamp),
            "uuid" => Some(Self::Uuid),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }
}

/// A field of a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: FieldType,
    /// Whether the key may be omitted from a payload.
    pub optional: bool,
}

impl Field {
    pub fn required(ty: FieldType) -> Self {
        Self {
            ty,
            optional: false,
        }
    }

    pub fn optional(ty: FieldType) -> Self {
        Self { ty, optional: true }
    }
}
