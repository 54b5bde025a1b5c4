//! Emitters for the derived wire shapes.
//!
//! Takes a validated [`Catalog`], projects every entity, and renders the
//! result as TypeScript declarations and/or JSON Schema documents. Output
//! is deterministic: files and members follow catalog declaration order and
//! nothing time-dependent is emitted.

pub mod error;
pub mod json_schema;
pub mod naming;
pub mod typescript;
pub mod writer;

use std::path::PathBuf;

use glassworks_core::shape::{project_all, Catalog};

pub use error::CodegenError;
pub use writer::{OutputWriter, WriteSummary};

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

pub const FORMAT_TS: &str = "ts";
pub const FORMAT_JSON_SCHEMA: &str = "json-schema";
pub const FORMAT_ALL: &str = "all";

/// Which emitters to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    TypeScript,
    JsonSchema,
    #[default]
    All,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => FORMAT_TS,
            Self::JsonSchema => FORMAT_JSON_SCHEMA,
            Self::All => FORMAT_ALL,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            FORMAT_TS => Some(Self::TypeScript),
            FORMAT_JSON_SCHEMA => Some(Self::JsonSchema),
            FORMAT_ALL => Some(Self::All),
            _ => None,
        }
    }

    pub fn typescript(&self) -> bool {
        matches!(self, Self::TypeScript | Self::All)
    }

    pub fn json_schema(&self) -> bool {
        matches!(self, Self::JsonSchema | Self::All)
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// A file to be written, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Render every entity of `catalog` in `format`.
///
/// Fails on the first definition or projection error; nothing is produced
/// for a catalog that does not fully project.
pub fn generate(catalog: &Catalog, format: Format) -> Result<Vec<GeneratedFile>, CodegenError> {
    let derived = project_all(catalog)?;
    let mut files = Vec::new();

    for shapes in &derived {
        let stem = naming::file_stem(shapes.name());
        tracing::debug!(entity = shapes.name(), "Projected entity");

        if format.typescript() {
            files.push(GeneratedFile::new(
                format!("{stem}.ts"),
                typescript::render_entity(shapes),
            ));
        }
        if format.json_schema() {
            let mut doc = serde_json::to_string_pretty(&json_schema::render_entity(shapes))?;
            doc.push('\n');
            files.push(GeneratedFile::new(json_schema::file_name(shapes.name()), doc));
        }
    }

    if format.typescript() {
        files.push(GeneratedFile::new(
            format!("{}.ts", typescript::AUGMENTATIONS_MODULE),
            typescript::render_augmentations(),
        ));
        files.push(GeneratedFile::new(
            "index.ts",
            typescript::render_index(derived.iter().map(|d| d.name())),
        ));
    }

    tracing::info!(
        entities = derived.len(),
        files = files.len(),
        format = %format,
        "Rendered shapes"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_round_trip() {
        for format in [Format::TypeScript, Format::JsonSchema, Format::All] {
            assert_eq!(Format::from_name(format.as_str()), Some(format));
        }
        assert_eq!(Format::from_name("yaml"), None);
    }

    #[test]
    fn all_includes_both_emitters() {
        assert!(Format::All.typescript() && Format::All.json_schema());
        assert!(!Format::TypeScript.json_schema());
        assert!(!Format::JsonSchema.typescript());
    }
}
