//! Canonical entity definitions of the glass-inlay order platform.
//!
//! Each submodule of [`models`] declares one entity (or named value object)
//! exactly once, in canonical form. Every wire shape the API and the web
//! client use is derived from these declarations by the projection engine
//! in `glassworks-core`.

pub mod models;

use glassworks_core::shape::source::EntityFile;
use glassworks_core::shape::{Catalog, ShapeError};

/// Build and validate the built-in catalog.
///
/// Objects are registered first, then entities in the order dealers meet
/// them in the workflow.
pub fn catalog() -> Result<Catalog, ShapeError> {
    let mut catalog = Catalog::new();
    catalog.insert_object(models::dimensions::NAME, models::dimensions::fields())?;

    for shape in [
        models::dealership::definition(),
        models::user::definition(),
        models::price_group::definition(),
        models::catalog_item::definition(),
        models::project::definition(),
        models::inlay::definition(),
        models::proof::definition(),
        models::proof_message::definition(),
        models::order::definition(),
        models::invoice::definition(),
        models::blocker::definition(),
    ] {
        catalog.insert_entity(shape)?;
    }

    catalog.validate()?;
    tracing::debug!(entities = catalog.len(), "Built-in catalog loaded");
    Ok(catalog)
}

/// The built-in catalog in entity-file form.
pub fn source_document() -> Result<EntityFile, ShapeError> {
    catalog().map(|c| EntityFile::from_catalog(&c))
}
