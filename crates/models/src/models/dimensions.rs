//! Physical size of an inlay or catalog item.

use glassworks_core::shape::{Field, FieldType};
use indexmap::IndexMap;

pub const NAME: &str = "Dimensions";

/// Units accepted for [`NAME`] values.
pub const UNITS: &[&str] = &["in", "mm"];

/// Fields of the `Dimensions` value object. Never augmented.
pub fn fields() -> IndexMap<String, Field> {
    IndexMap::from([
        ("width".to_string(), Field::required(FieldType::Number)),
        ("height".to_string(), Field::required(FieldType::Number)),
        (
            "unit".to_string(),
            Field::required(FieldType::enumeration(UNITS.iter().copied())),
        ),
    ])
}
