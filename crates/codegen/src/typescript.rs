//! TypeScript declarations for derived shapes.
//!
//! Each entity gets one module with four interfaces (`Get<Name>`,
//! `Post<Name>`, `Patch<Name>`, `Put<Name>`). Augmentations are rendered as
//! `extends Identity` / `extends Metadata` rather than as inline fields, so
//! the web client can write helpers generic over "anything with an id".
//! The `Identity` and `Metadata` declarations themselves come from the
//! `ts-rs` derives on the core augmentation records.

use std::fmt::Write as _;

use glassworks_core::shape::augmentation::{Identity, Metadata};
use glassworks_core::shape::{DerivedShapes, Field, FieldType, Shape, View};
use indexmap::IndexSet;
use ts_rs::TS;

use crate::naming::{file_stem, type_name};

pub const HEADER: &str = "// Generated by generate-shapes. Do not edit.\n";

/// Module name of the shared augmentation declarations.
pub const AUGMENTATIONS_MODULE: &str = "augmentations";

const INDENT: &str = "  ";

/// `augmentations.ts`: the shared `Identity` and `Metadata` types.
pub fn render_augmentations() -> String {
    format!(
        "{HEADER}\nexport {}\n\nexport {}\n",
        Identity::decl(),
        Metadata::decl()
    )
}

/// `index.ts`: re-exports every generated module in declaration order.
pub fn render_index<'a>(entities: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = format!("{HEADER}\nexport * from \"./{AUGMENTATIONS_MODULE}\";\n");
    for name in entities {
        let _ = writeln!(out, "export * from \"./{}\";", file_stem(name));
    }
    out
}

/// The TypeScript module for one entity.
pub fn render_entity(derived: &DerivedShapes) -> String {
    let entity = derived.name();
    let shapes: Vec<&Shape> = derived.iter().map(|(_, shape)| shape).collect();

    let mut out = String::from(HEADER);
    out.push('\n');

    let augmentations: Vec<&str> = [
        ("Identity", shapes.iter().any(|s| s.augmentations.identity)),
        ("Metadata", shapes.iter().any(|s| s.augmentations.metadata)),
    ]
    .into_iter()
    .filter_map(|(name, used)| used.then_some(name))
    .collect();
    if !augmentations.is_empty() {
        let _ = writeln!(
            out,
            "import type {{ {} }} from \"./{AUGMENTATIONS_MODULE}\";",
            augmentations.join(", ")
        );
    }

    // Nested entity types, grouped by the module they live in.
    let mut imports: Vec<(String, IndexSet<String>)> = Vec::new();
    for shape in &shapes {
        for field in shape.fields.values() {
            collect_refs(&field.ty, &mut |name: &str, view: View| {
                if name == entity {
                    return;
                }
                let stem = file_stem(name);
                let ty = type_name(name, view);
                match imports.iter_mut().find(|(s, _)| *s == stem) {
                    Some((_, types)) => {
                        types.insert(ty);
                    }
                    None => imports.push((stem, IndexSet::from([ty]))),
                }
            });
        }
    }
    for (stem, types) in &imports {
        let types: Vec<&str> = types.iter().map(String::as_str).collect();
        let _ = writeln!(
            out,
            "import type {{ {} }} from \"./{stem}\";",
            types.join(", ")
        );
    }

    for shape in shapes {
        out.push('\n');
        out.push_str(&render_interface(shape));
    }
    out
}

/// One `export interface` block.
pub fn render_interface(shape: &Shape) -> String {
    let mut parents = Vec::new();
    if shape.augmentations.identity {
        parents.push("Identity");
    }
    if shape.augmentations.metadata {
        parents.push("Metadata");
    }

    let mut out = format!("export interface {}", type_name(&shape.name, shape.view));
    if !parents.is_empty() {
        let _ = write!(out, " extends {}", parents.join(", "));
    }
    out.push_str(" {\n");
    for (name, field) in &shape.fields {
        render_member(&mut out, 1, name, field);
    }
    out.push_str("}\n");
    out
}

fn render_member(out: &mut String, depth: usize, name: &str, field: &Field) {
    let marker = if field.optional { "?" } else { "" };
    let _ = writeln!(
        out,
        "{}{name}{marker}: {};",
        INDENT.repeat(depth),
        render_type(&field.ty, depth)
    );
}

/// TypeScript type expression for a field type.
pub fn render_type(ty: &FieldType, depth: usize) -> String {
    match ty {
        FieldType::String | FieldType::Timestamp | FieldType::Uuid => "string".to_string(),
        FieldType::Integer | FieldType::Number => "number".to_string(),
        FieldType::Boolean => "boolean".to_string(),
        FieldType::Json => "unknown".to_string(),
        FieldType::Enum(values) => values
            .iter()
            .map(|v| serde_json::Value::String(v.clone()).to_string())
            .collect::<Vec<_>>()
            .join(" | "),
        FieldType::Nullable(inner) => format!("{} | null", render_type(inner, depth)),
        FieldType::Array(inner) | FieldType::Set(inner) => {
            format!("Array<{}>", render_type(inner, depth))
        }
        FieldType::Object(fields) => {
            let mut out = String::from("{\n");
            for (name, field) in fields {
                render_member(&mut out, depth + 1, name, field);
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
            out
        }
        FieldType::Entity { name, view } => type_name(name, *view),
        // Unresolved names do not survive projection.
        FieldType::Ref(name) => name.clone(),
    }
}

fn collect_refs(ty: &FieldType, visit: &mut impl FnMut(&str, View)) {
    match ty {
        FieldType::Nullable(inner) | FieldType::Array(inner) | FieldType::Set(inner) => {
            collect_refs(inner, visit)
        }
        FieldType::Object(fields) => {
            for field in fields.values() {
                collect_refs(&field.ty, visit);
            }
        }
        FieldType::Entity { name, view } => visit(name, *view),
        _ => {}
    }
}
