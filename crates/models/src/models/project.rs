//! Projects group the inlays a dealership orders for one job site.
//!
//! Inlays travel inside their project: a project read carries fully
//! augmented inlays, and a project create carries stripped ones.

use glassworks_core::shape::{canonical, FieldType, Shape};

use super::inlay;

pub const NAME: &str = "Project";

/// Lifecycle of a project, in workflow order.
pub const STATUSES: &[&str] = &[
    "draft",
    "submitted",
    "in_design",
    "proofing",
    "approved",
    "ordered",
    "in_production",
    "shipped",
    "cancelled",
];

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("dealership_id", FieldType::Integer)
            .field("name", FieldType::String)
            .field("status", FieldType::enumeration(STATUSES.iter().copied()))
            .field("submitted_by_id", FieldType::Integer)
            .field("notes", FieldType::nullable(FieldType::String))
            .field("due_date", FieldType::nullable(FieldType::Timestamp))
            .optional_field("po_number", FieldType::nullable(FieldType::String))
            .field("inlays", FieldType::array(FieldType::entity(inlay::NAME))),
    )
}
