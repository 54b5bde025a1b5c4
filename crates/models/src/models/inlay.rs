//! A single glass inlay within a project.

use glassworks_core::shape::{canonical, FieldType, Shape};

use super::dimensions;

pub const NAME: &str = "Inlay";

pub const STATUSES: &[&str] = &["pending", "designing", "proofing", "approved", "cut", "installed"];

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("project_id", FieldType::Integer)
            .field("catalog_item_id", FieldType::nullable(FieldType::Integer))
            .field("label", FieldType::String)
            .field("size", FieldType::reference(dimensions::NAME))
            .field("glass_colors", FieldType::set(FieldType::String))
            .field("quantity", FieldType::Integer)
            .field("price_group_id", FieldType::nullable(FieldType::Integer))
            .field("status", FieldType::enumeration(STATUSES.iter().copied()))
            // Design-tool payload; opaque to the platform.
            .field("artwork", FieldType::nullable(FieldType::Json)),
    )
}
