//! The `generate-shapes` command.
//!
//! Loads a catalog (an entity file, or the built-in catalog), projects every
//! entity, and writes or checks the generated TypeScript and JSON Schema
//! files. Also prints the permission matrix and exports the catalog for
//! tooling that wants the raw definitions.

pub mod args;
pub mod config;
pub mod error;

use std::io::Write;
use std::path::{Path, PathBuf};

use glassworks_codegen::{generate, OutputWriter};
use glassworks_core::permissions::permission_matrix;
use glassworks_core::shape::source::EntityFile;
use glassworks_core::shape::Catalog;

pub use args::Args;
pub use config::GeneratorConfig;
pub use error::CliError;

/// Run the command with resolved configuration, printing to `stdout`.
pub fn run(
    args: &Args,
    config: &GeneratorConfig,
    stdout: &mut impl Write,
) -> Result<(), CliError> {
    if args.print_permissions {
        let json = serde_json::to_string_pretty(&permission_matrix())
            .map_err(|e| stdout_error(std::io::Error::other(e)))?;
        writeln!(stdout, "{json}").map_err(stdout_error)?;
        return Ok(());
    }

    let catalog = load_catalog(config.entity_file.as_deref())?;

    if args.export_entities {
        let json = EntityFile::from_catalog(&catalog)
            .to_json_pretty()
            .map_err(|e| stdout_error(std::io::Error::other(e)))?;
        writeln!(stdout, "{json}").map_err(stdout_error)?;
        return Ok(());
    }

    let files = generate(&catalog, config.format)?;
    let summary = OutputWriter::new(&config.out_dir)
        .check_only(args.check)
        .write_all(&files)?;

    if !summary.is_up_to_date() {
        return Err(CliError::Stale(summary.stale));
    }
    tracing::info!(
        out_dir = %config.out_dir.display(),
        written = summary.written.len(),
        unchanged = summary.unchanged.len(),
        check = args.check,
        "Shapes up to date"
    );
    Ok(())
}

/// Load and validate the catalog from `path`, or the built-in catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CliError> {
    let Some(path) = path else {
        return Ok(glassworks_models::catalog()?);
    };

    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = EntityFile::from_json(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = file.into_catalog()?;
    catalog.validate()?;

    tracing::info!(path = %path.display(), entities = catalog.len(), "Loaded entity file");
    Ok(catalog)
}

fn stdout_error(source: std::io::Error) -> CliError {
    CliError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}
