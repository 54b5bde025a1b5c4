use std::path::PathBuf;

use glassworks_codegen::CodegenError;
use glassworks_core::shape::ShapeError;

/// Exit code for definition and projection errors.
pub const EXIT_DEFINITION: u8 = 1;
/// Exit code for usage and configuration errors.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for filesystem errors.
pub const EXIT_IO: u8 = 3;
/// Exit code when check mode finds outdated files.
pub const EXIT_STALE: u8 = 4;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid entity file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("{} generated file(s) are out of date; rerun generate-shapes", .0.len())]
    Stale(Vec<PathBuf>),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Shape(_) | Self::Parse { .. } => EXIT_DEFINITION,
            Self::Config(_) => EXIT_CONFIG,
            Self::Io { .. } => EXIT_IO,
            Self::Stale(_) => EXIT_STALE,
        }
    }
}

impl From<CodegenError> for CliError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::Shape(e) => Self::Shape(e),
            CodegenError::Io { path, source } => Self::Io { path, source },
            CodegenError::Json(e) => Self::Io {
                path: PathBuf::from("<render>"),
                source: std::io::Error::other(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        let shape = CliError::Shape(ShapeError::UnknownEntity("Kiln".into()));
        let config = CliError::Config("bad format".into());
        let stale = CliError::Stale(vec![PathBuf::from("inlay.ts")]);
        let io = CliError::Io {
            path: PathBuf::from("out"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let codes = [shape.exit_code(), config.exit_code(), io.exit_code(), stale.exit_code()];
        assert_eq!(codes, [EXIT_DEFINITION, EXIT_CONFIG, EXIT_IO, EXIT_STALE]);
    }

    #[test]
    fn definition_message_names_entity_and_path() {
        let err = CliError::from(ShapeError::definition("Inlay", "size.unit", "enum has no values"));
        let msg = err.to_string();
        assert!(msg.contains("Inlay"));
        assert!(msg.contains("size.unit"));
    }
}
