use glassworks_core::shape::{canonical, FieldType, Shape};

pub const NAME: &str = "PriceGroup";

/// A pricing tier. Catalog items carry a default group; dealerships may be
/// assigned one that overrides it.
pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("code", FieldType::String)
            .field("name", FieldType::String)
            .field("multiplier", FieldType::Number)
            .field("description", FieldType::nullable(FieldType::String)),
    )
}
