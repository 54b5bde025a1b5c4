//! Orders placed against an approved project.

use glassworks_core::shape::{canonical, Field, FieldType, Shape};

pub const NAME: &str = "Order";

pub const STATUSES: &[&str] = &["placed", "in_production", "shipped", "delivered", "cancelled"];

fn ship_to() -> FieldType {
    FieldType::object([
        ("recipient", Field::required(FieldType::String)),
        ("line1", Field::required(FieldType::String)),
        ("line2", Field::required(FieldType::nullable(FieldType::String))),
        ("city", Field::required(FieldType::String)),
        ("region", Field::required(FieldType::String)),
        ("postal_code", Field::required(FieldType::String)),
        ("country", Field::required(FieldType::String)),
    ])
}

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("project_id", FieldType::Integer)
            .field("dealership_id", FieldType::Integer)
            .field("order_number", FieldType::String)
            .field("status", FieldType::enumeration(STATUSES.iter().copied()))
            .field("placed_by_id", FieldType::Integer)
            .field("placed_at", FieldType::Timestamp)
            .field("ship_to", ship_to())
            .field("total_cents", FieldType::Integer)
            .optional_field("tracking_number", FieldType::nullable(FieldType::String)),
    )
}
