//! Derivation of GET/POST/PATCH/PUT shapes from canonical definitions.
//!
//! GET and POST are deep: every nested entity reference, wherever it sits
//! (directly, inside `nullable`, `array`, `set`, or a value object), is
//! re-pointed at the same projection. PATCH and PUT are shallow: they only
//! change the top-level shape and leave nested entities in their declared
//! view.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::augmentation::Augmentations;
use super::catalog::{Catalog, Resolved};
use super::error::{child_path, element_path, ShapeError};
use super::field::{Field, FieldType, View};
use super::model::Shape;

/// An HTTP method with a derived request or response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
}

impl Method {
    pub const ALL: &'static [Method] = &[Self::Get, Self::Post, Self::Patch, Self::Put];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
        }
    }

    pub fn view(&self) -> View {
        match self {
            Self::Get => View::Get,
            Self::Post => View::Post,
            Self::Patch => View::Patch,
            Self::Put => View::Put,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four derived shapes of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedShapes {
    pub get: Shape,
    pub post: Shape,
    pub patch: Shape,
    pub put: Shape,
}

impl DerivedShapes {
    pub fn name(&self) -> &str {
        &self.get.name
    }

    pub fn by_method(&self, method: Method) -> &Shape {
        match method {
            Method::Get => &self.get,
            Method::Post => &self.post,
            Method::Patch => &self.patch,
            Method::Put => &self.put,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Method, &Shape)> {
        Method::ALL.iter().map(move |m| (*m, self.by_method(*m)))
    }
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// Read shape: both augmentations, nested entities as GET.
pub fn to_get(shape: &Shape, catalog: &Catalog) -> Result<Shape, ShapeError> {
    let fields = Walker::new(catalog, &shape.name, Some(View::Get)).fields("", &shape.fields)?;
    Ok(derived(shape, View::Get, Augmentations::BOTH, fields))
}

/// Create shape: no augmentations, nested entities as POST.
pub fn to_post(shape: &Shape, catalog: &Catalog) -> Result<Shape, ShapeError> {
    let fields = Walker::new(catalog, &shape.name, Some(View::Post)).fields("", &shape.fields)?;
    Ok(derived(shape, View::Post, Augmentations::NONE, fields))
}

/// Partial update shape: identity only, every top-level field optional.
pub fn to_patch(shape: &Shape, catalog: &Catalog) -> Result<Shape, ShapeError> {
    let mut fields = Walker::new(catalog, &shape.name, None).fields("", &shape.fields)?;
    for field in fields.values_mut() {
        field.optional = true;
    }
    Ok(derived(shape, View::Patch, Augmentations::IDENTITY, fields))
}

/// Full replacement shape: identity only, every top-level field required.
pub fn to_put(shape: &Shape, catalog: &Catalog) -> Result<Shape, ShapeError> {
    let mut fields = Walker::new(catalog, &shape.name, None).fields("", &shape.fields)?;
    for field in fields.values_mut() {
        field.optional = false;
    }
    Ok(derived(shape, View::Put, Augmentations::IDENTITY, fields))
}

pub fn project(shape: &Shape, method: Method, catalog: &Catalog) -> Result<Shape, ShapeError> {
    match method {
        Method::Get => to_get(shape, catalog),
        Method::Post => to_post(shape, catalog),
        Method::Patch => to_patch(shape, catalog),
        Method::Put => to_put(shape, catalog),
    }
}

/// Project a catalog entity by name.
pub fn project_entity(name: &str, catalog: &Catalog) -> Result<DerivedShapes, ShapeError> {
    let shape = catalog.require_entity(name)?;
    Ok(DerivedShapes {
        get: to_get(shape, catalog)?,
        post: to_post(shape, catalog)?,
        patch: to_patch(shape, catalog)?,
        put: to_put(shape, catalog)?,
    })
}

/// Project every entity of the catalog, in declaration order.
pub fn project_all(catalog: &Catalog) -> Result<Vec<DerivedShapes>, ShapeError> {
    catalog
        .entities()
        .map(|shape| project_entity(&shape.name, catalog))
        .collect()
}

/// The shape a nested entity reference points at.
pub fn resolve_view(name: &str, view: View, catalog: &Catalog) -> Result<Shape, ShapeError> {
    let shape = catalog.require_entity(name)?;
    match view {
        View::Canonical => Ok(shape.clone()),
        View::Get => to_get(shape, catalog),
        View::Post => to_post(shape, catalog),
        View::Patch => to_patch(shape, catalog),
        View::Put => to_put(shape, catalog),
    }
}

fn derived(
    source: &Shape,
    view: View,
    augmentations: Augmentations,
    fields: IndexMap<String, Field>,
) -> Shape {
    Shape {
        name: source.name.clone(),
        view,
        augmentations,
        fields,
    }
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// Rewrites field types, resolving named references and re-pointing nested
/// entities at `nested` (or keeping their declared view when `None`).
struct Walker<'a> {
    catalog: &'a Catalog,
    entity: &'a str,
    nested: Option<View>,
    /// Named objects currently being inlined, to reject recursive objects.
    expanding: Vec<String>,
}

impl<'a> Walker<'a> {
    fn new(catalog: &'a Catalog, entity: &'a str, nested: Option<View>) -> Self {
        Self {
            catalog,
            entity,
            nested,
            expanding: Vec::new(),
        }
    }

    fn fields(
        &mut self,
        parent: &str,
        fields: &IndexMap<String, Field>,
    ) -> Result<IndexMap<String, Field>, ShapeError> {
        let mut out = IndexMap::with_capacity(fields.len());
        for (name, field) in fields {
            let path = child_path(parent, name);
            let ty = self.field_type(&path, &field.ty)?;
            out.insert(
                name.clone(),
                Field {
                    ty,
                    optional: field.optional,
                },
            );
        }
        Ok(out)
    }

    fn field_type(&mut self, path: &str, ty: &FieldType) -> Result<FieldType, ShapeError> {
        Ok(match ty {
            FieldType::Nullable(inner) => FieldType::nullable(self.field_type(path, inner)?),
            FieldType::Array(inner) => {
                FieldType::array(self.field_type(&element_path(path), inner)?)
            }
            FieldType::Set(inner) => FieldType::set(self.field_type(&element_path(path), inner)?),
            FieldType::Object(fields) => FieldType::Object(self.fields(path, fields)?),
            FieldType::Entity { name, view } => {
                if self.catalog.entity(name).is_none() {
                    return Err(ShapeError::definition(
                        self.entity,
                        path,
                        format!("references unknown entity `{name}`"),
                    ));
                }
                FieldType::Entity {
                    name: name.clone(),
                    view: self.nested.unwrap_or(*view),
                }
            }
            FieldType::Ref(name) => self.resolve_ref(path, name)?,
            scalar => scalar.clone(),
        })
    }

    fn resolve_ref(&mut self, path: &str, name: &str) -> Result<FieldType, ShapeError> {
        let catalog = self.catalog;
        match catalog.resolve(name) {
            Some(Resolved::Entity(_)) => Ok(FieldType::Entity {
                name: name.to_string(),
                view: self.nested.unwrap_or(View::Canonical),
            }),
            Some(Resolved::Object(fields)) => {
                if self.expanding.iter().any(|n| n == name) {
                    return Err(ShapeError::definition(
                        self.entity,
                        path,
                        format!("value object `{name}` contains itself"),
                    ));
                }
                self.expanding.push(name.to_string());
                let inlined = self.fields(path, fields);
                self.expanding.pop();
                Ok(FieldType::Object(inlined?))
            }
            None => Err(ShapeError::ProjectionAmbiguity {
                entity: self.entity.to_string(),
                path: path.to_string(),
                type_name: name.to_string(),
            }),
        }
    }
}
