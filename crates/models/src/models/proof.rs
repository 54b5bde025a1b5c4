//! Design proofs sent to the dealership for approval.
//!
//! Each revision of an inlay's artwork is a new proof. The discussion
//! thread is embedded so the approval screen loads in one request.

use glassworks_core::shape::{canonical, FieldType, Shape};

use super::proof_message;

pub const NAME: &str = "Proof";

pub const STATUSES: &[&str] = &["pending", "approved", "changes_requested", "superseded"];

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("project_id", FieldType::Integer)
            .field("inlay_id", FieldType::Integer)
            .field("revision", FieldType::Integer)
            .field("svg_url", FieldType::String)
            .field("status", FieldType::enumeration(STATUSES.iter().copied()))
            .field("approved_by_id", FieldType::nullable(FieldType::Integer))
            .field("approved_at", FieldType::nullable(FieldType::Timestamp))
            .field(
                "messages",
                FieldType::array(FieldType::entity(proof_message::NAME)),
            ),
    )
}
