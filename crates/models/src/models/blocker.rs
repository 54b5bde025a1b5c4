//! Production blockers raised by internal staff on the kanban board.

use glassworks_core::shape::{canonical, FieldType, Shape};

pub const NAME: &str = "Blocker";

pub const STATUSES: &[&str] = &["open", "resolved"];

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("project_id", FieldType::Integer)
            .field("inlay_id", FieldType::nullable(FieldType::Integer))
            .field("reason", FieldType::String)
            .field("status", FieldType::enumeration(STATUSES.iter().copied()))
            .field("raised_by_id", FieldType::Integer)
            .field("resolved_at", FieldType::nullable(FieldType::Timestamp))
            .optional_field("resolution_note", FieldType::nullable(FieldType::String)),
    )
}
