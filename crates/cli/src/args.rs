//! Command-line arguments.
//!
//! Every option also has an environment variable (see
//! [`GeneratorConfig`](crate::config::GeneratorConfig)); a flag given on the
//! command line wins.

use std::path::PathBuf;

use clap::Parser;
use glassworks_codegen::{FORMAT_ALL, FORMAT_JSON_SCHEMA, FORMAT_TS};

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "generate-shapes",
    version,
    about = "Generate the GET/POST/PATCH/PUT wire shapes of every entity"
)]
pub struct Args {
    /// Entity definition file (JSON); the built-in catalog when omitted
    /// (env: SHAPES_ENTITY_FILE)
    #[arg(long, value_name = "PATH")]
    pub entity_file: Option<PathBuf>,

    /// Output directory (env: SHAPES_OUT_DIR, default: generated/shapes)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Which files to emit (env: SHAPES_FORMAT, default: all)
    #[arg(long, value_parser = [FORMAT_TS, FORMAT_JSON_SCHEMA, FORMAT_ALL])]
    pub format: Option<String>,

    /// Compare generated output with the files on disk instead of writing
    #[arg(long)]
    pub check: bool,

    /// Print the role/action permission matrix as JSON and exit
    #[arg(long, conflicts_with_all = ["check", "export_entities"])]
    pub print_permissions: bool,

    /// Print the loaded catalog in entity-file form and exit
    #[arg(long, conflicts_with = "check")]
    pub export_entities: bool,
}
