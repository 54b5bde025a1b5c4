//! Invoices issued by billing staff for an order.

use glassworks_core::shape::{canonical, Field, FieldType, Shape};

pub const NAME: &str = "Invoice";

pub const STATUSES: &[&str] = &["draft", "issued", "paid", "void"];

fn line_item() -> FieldType {
    FieldType::object([
        ("description", Field::required(FieldType::String)),
        ("quantity", Field::required(FieldType::Integer)),
        ("unit_price_cents", Field::required(FieldType::Integer)),
    ])
}

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("order_id", FieldType::Integer)
            .field("dealership_id", FieldType::Integer)
            .field("invoice_number", FieldType::String)
            .field("status", FieldType::enumeration(STATUSES.iter().copied()))
            .field("line_items", FieldType::array(line_item()))
            .field("amount_cents", FieldType::Integer)
            .field("due_at", FieldType::Timestamp)
            .field("paid_at", FieldType::nullable(FieldType::Timestamp)),
    )
}
