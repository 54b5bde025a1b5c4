//! Dealership: the customer organisation that submits projects and pays
//! invoices.

use glassworks_core::shape::{canonical, FieldType, Shape};

pub const NAME: &str = "Dealership";

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("name", FieldType::String)
            .field("account_number", FieldType::String)
            .field("billing_email", FieldType::String)
            .field("phone", FieldType::nullable(FieldType::String))
            .field("price_group_id", FieldType::nullable(FieldType::Integer))
            .field("is_active", FieldType::Boolean),
    )
}
