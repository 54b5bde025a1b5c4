use assert_matches::assert_matches;
use glassworks_core::shape::conformance::check;
use glassworks_core::shape::instance::to_post_value;
use glassworks_core::shape::source::EntityFile;
use glassworks_core::shape::{
    project_all, project_entity, to_get, to_patch, to_post, to_put, FieldType, ShapeError, View,
};
use glassworks_models::models::{catalog_item, inlay, project};
use glassworks_models::{catalog, source_document};
use serde_json::json;

const CATALOG_ITEM_FIELDS: [&str; 11] = [
    "catalog_code",
    "name",
    "description",
    "category",
    "default_width",
    "default_height",
    "min_width",
    "min_height",
    "default_price_group_id",
    "svg_url",
    "is_active",
];

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

#[test]
fn catalog_item_post_has_exactly_the_intrinsic_fields() {
    let catalog = catalog().unwrap();
    let item = catalog.require_entity(catalog_item::NAME).unwrap();
    let post = to_post(item, &catalog).unwrap();

    assert_eq!(post.wire_field_names(), CATALOG_ITEM_FIELDS);
}

#[test]
fn catalog_item_get_adds_the_five_augmentation_fields() {
    let catalog = catalog().unwrap();
    let item = catalog.require_entity(catalog_item::NAME).unwrap();
    let get = to_get(item, &catalog).unwrap();

    let names = get.wire_field_names();
    assert_eq!(names.len(), 16);
    for name in CATALOG_ITEM_FIELDS
        .iter()
        .chain(&["id", "uuid", "created_at", "updated_at", "version"])
    {
        assert!(names.iter().any(|n| n == name), "missing {name}");
    }
}

// ---------------------------------------------------------------------------
// Projection properties across the whole catalog
// ---------------------------------------------------------------------------

#[test]
fn every_entity_projects() {
    let catalog = catalog().unwrap();
    let derived = project_all(&catalog).unwrap();
    assert_eq!(derived.len(), catalog.len());
}

#[test]
fn projections_are_idempotent() {
    let catalog = catalog().unwrap();
    for shape in catalog.entities() {
        let get = to_get(shape, &catalog).unwrap();
        assert_eq!(to_get(&get, &catalog).unwrap(), get, "{}", shape.name);

        let post = to_post(shape, &catalog).unwrap();
        assert_eq!(to_post(&post, &catalog).unwrap(), post, "{}", shape.name);
    }
}

#[test]
fn post_of_get_equals_post() {
    let catalog = catalog().unwrap();
    for shape in catalog.entities() {
        let get = to_get(shape, &catalog).unwrap();
        assert_eq!(
            to_post(&get, &catalog).unwrap(),
            to_post(shape, &catalog).unwrap(),
            "{}",
            shape.name
        );
    }
}

#[test]
fn patch_fields_are_all_optional_and_put_fields_required() {
    let catalog = catalog().unwrap();
    for shape in catalog.entities() {
        let patch = to_patch(shape, &catalog).unwrap();
        assert!(patch.augmentations.identity && !patch.augmentations.metadata);
        assert!(patch.fields.values().all(|f| f.optional), "{}", shape.name);

        let put = to_put(shape, &catalog).unwrap();
        assert!(put.fields.values().all(|f| !f.optional), "{}", shape.name);
    }
}

#[test]
fn project_inlays_follow_the_parent_projection() {
    let catalog = catalog().unwrap();
    let derived = project_entity(project::NAME, &catalog).unwrap();

    assert_eq!(
        derived.get.fields["inlays"].ty,
        FieldType::array(FieldType::Entity {
            name: inlay::NAME.to_string(),
            view: View::Get,
        })
    );
    assert_eq!(
        derived.post.fields["inlays"].ty,
        FieldType::array(FieldType::Entity {
            name: inlay::NAME.to_string(),
            view: View::Post,
        })
    );
}

#[test]
fn inlay_size_is_inlined_as_a_plain_object() {
    let catalog = catalog().unwrap();
    let derived = project_entity(inlay::NAME, &catalog).unwrap();
    assert_matches!(
        &derived.get.fields["size"].ty,
        FieldType::Object(fields) if fields.contains_key("width") && !fields.contains_key("id")
    );
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

fn project_record() -> serde_json::Value {
    json!({
        "id": 12,
        "uuid": "0b8f3c59-2f43-4c4e-8d53-5b2b2cd1b7a1",
        "dealership_id": 3,
        "name": "St. Anne Chapel",
        "status": "proofing",
        "submitted_by_id": 41,
        "notes": null,
        "due_date": "2026-11-30T00:00:00Z",
        "inlays": [{
            "id": 77,
            "uuid": "5d2a7f11-0c6e-4a0e-9e43-7c1d9f0e2b64",
            "project_id": 12,
            "catalog_item_id": null,
            "label": "Rose window",
            "size": {"width": 36.0, "height": 36.0, "unit": "in"},
            "glass_colors": ["amber", "cobalt"],
            "quantity": 1,
            "price_group_id": 2,
            "status": "proofing",
            "artwork": null,
            "created_at": "2026-09-02T10:00:00Z",
            "updated_at": "2026-09-04T16:30:00Z",
            "version": 3
        }],
        "created_at": "2026-09-01T09:00:00Z",
        "updated_at": "2026-09-04T16:30:00Z",
        "version": 5
    })
}

#[test]
fn read_record_conforms_to_get_and_its_post_value_to_post() {
    let catalog = catalog().unwrap();
    let derived = project_entity(project::NAME, &catalog).unwrap();
    let record = project_record();

    let report = check(&record, &derived.get, &catalog).unwrap();
    assert!(report.is_valid, "{:?}", report.violations);

    let canonical = catalog.require_entity(project::NAME).unwrap();
    let body = to_post_value(&record, canonical, &catalog).unwrap();
    let report = check(&body, &derived.post, &catalog).unwrap();
    assert!(report.is_valid, "{:?}", report.violations);

    let report = check(&record, &derived.post, &catalog).unwrap();
    assert!(report.violation("id").is_some());
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn source_document_reimports_to_the_same_catalog() {
    let document = source_document().unwrap();
    let text = document.to_json_pretty().unwrap();
    let reimported = EntityFile::from_json(&text).unwrap().into_catalog().unwrap();
    assert_eq!(reimported, catalog().unwrap());
}

#[test]
fn exported_entity_without_metadata_is_rejected() {
    let mut document = source_document().unwrap();
    document.entities[0].augmentations.pop();
    let err = document.into_catalog().unwrap_err();
    assert_matches!(err, ShapeError::Definition { ref entity, .. } if entity == "Dealership");
}
