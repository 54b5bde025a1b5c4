//! Canonical entity shapes and their derived wire shapes.
//!
//! An entity is authored once as a canonical shape (identity + metadata +
//! intrinsic fields). The projection engine derives the four shapes used at
//! the API boundary:
//!
//! | Shape | Identity | Metadata | Optionality  |
//! |-------|----------|----------|--------------|
//! | GET   | yes      | yes      | as declared  |
//! | POST  | no       | no       | as declared  |
//! | PATCH | yes      | no       | all optional |
//! | PUT   | yes      | no       | all required |
//!
//! Augmentations are carried as tags on the shape, not as fields, so a
//! plain field that happens to be called `version` is never stripped.

pub mod augmentation;
pub mod catalog;
pub mod conformance;
pub mod error;
pub mod field;
pub mod instance;
pub mod model;
pub mod projection;
pub mod source;

pub use augmentation::{canonical, with_identity, with_metadata, Augmentation, Augmentations};
pub use catalog::{Catalog, Resolved, RESERVED_ENTITY_NAMES};
pub use error::ShapeError;
pub use field::{Field, FieldType, View};
pub use model::Shape;
pub use projection::{
    project, project_all, project_entity, resolve_view, to_get, to_patch, to_post, to_put,
    DerivedShapes, Method,
};
