use glassworks_core::shape::{canonical, FieldType, Shape};

pub const NAME: &str = "ProofMessage";

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("proof_id", FieldType::Integer)
            .field("author_id", FieldType::Integer)
            .field("body", FieldType::String)
            .field("attachments", FieldType::array(FieldType::String)),
    )
}
