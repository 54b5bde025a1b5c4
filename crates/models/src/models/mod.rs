//! One module per canonical entity.
//!
//! Each entity module exposes:
//! - `NAME`, the entity name used in the catalog and in generated types
//! - `definition()`, the canonical shape (identity + metadata + intrinsic fields)
//!
//! Foreign keys are plain `integer` fields; only records that travel inside
//! their parent on the wire are declared as nested entities.

pub mod blocker;
pub mod catalog_item;
pub mod dealership;
pub mod dimensions;
pub mod inlay;
pub mod invoice;
pub mod order;
pub mod price_group;
pub mod project;
pub mod proof;
pub mod proof_message;
pub mod user;
