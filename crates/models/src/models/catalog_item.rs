//! Catalog items: the standard inlay designs dealers pick from.

use glassworks_core::shape::{canonical, FieldType, Shape};

pub const NAME: &str = "CatalogItem";

pub const CATEGORIES: &[&str] = &["panel", "border", "medallion", "sidelight", "custom"];

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("catalog_code", FieldType::String)
            .field("name", FieldType::String)
            .field("description", FieldType::nullable(FieldType::String))
            .field("category", FieldType::enumeration(CATEGORIES.iter().copied()))
            .field("default_width", FieldType::Number)
            .field("default_height", FieldType::Number)
            .field("min_width", FieldType::Number)
            .field("min_height", FieldType::Number)
            .field("default_price_group_id", FieldType::nullable(FieldType::Integer))
            .field("svg_url", FieldType::nullable(FieldType::String))
            .field("is_active", FieldType::Boolean),
    )
}
