use std::path::PathBuf;

use glassworks_codegen::Format;

use crate::args::Args;
use crate::error::CliError;

pub const ENV_OUT_DIR: &str = "SHAPES_OUT_DIR";
pub const ENV_FORMAT: &str = "SHAPES_FORMAT";
pub const ENV_ENTITY_FILE: &str = "SHAPES_ENTITY_FILE";
pub const ENV_LOG_JSON: &str = "SHAPES_LOG_JSON";

pub const DEFAULT_OUT_DIR: &str = "generated/shapes";

/// Generator configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory generated files are written to.
    pub out_dir: PathBuf,
    pub format: Format,
    /// Entity definition file; the built-in catalog is used when `None`.
    pub entity_file: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl GeneratorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default            |
    /// |----------------------|--------------------|
    /// | `SHAPES_OUT_DIR`     | `generated/shapes` |
    /// | `SHAPES_FORMAT`      | `all`              |
    /// | `SHAPES_ENTITY_FILE` | built-in catalog   |
    /// | `SHAPES_LOG_JSON`    | `false`            |
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let out_dir = var(ENV_OUT_DIR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUT_DIR.into())
            .into();

        let format = match var(ENV_FORMAT).filter(|s| !s.trim().is_empty()) {
            Some(name) => parse_format(&name)?,
            None => Format::default(),
        };

        let entity_file = var(ENV_ENTITY_FILE)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let log_json = match var(ENV_LOG_JSON).as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(CliError::Config(format!(
                    "{ENV_LOG_JSON} must be 1/0/true/false, got `{other}`"
                )))
            }
        };

        Ok(Self {
            out_dir,
            format,
            entity_file,
            log_json,
        })
    }

    /// Apply command-line overrides.
    pub fn with_args(mut self, args: &Args) -> Result<Self, CliError> {
        if let Some(out) = &args.out {
            self.out_dir = out.clone();
        }
        if let Some(name) = &args.format {
            self.format = parse_format(name)?;
        }
        if let Some(path) = &args.entity_file {
            self.entity_file = Some(path.clone());
        }
        Ok(self)
    }
}

fn parse_format(name: &str) -> Result<Format, CliError> {
    Format::from_name(name.trim()).ok_or_else(|| {
        CliError::Config(format!(
            "{ENV_FORMAT} must be one of ts, json-schema, all; got `{name}`"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<GeneratorConfig, CliError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GeneratorConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_env() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(cfg.format, Format::All);
        assert_eq!(cfg.entity_file, None);
        assert!(!cfg.log_json);
    }

    #[test]
    fn env_values_are_read() {
        let cfg = config(&[
            (ENV_OUT_DIR, "web/src/api/shapes"),
            (ENV_FORMAT, "ts"),
            (ENV_ENTITY_FILE, "entities.json"),
            (ENV_LOG_JSON, "1"),
        ])
        .unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from("web/src/api/shapes"));
        assert_eq!(cfg.format, Format::TypeScript);
        assert_eq!(cfg.entity_file, Some(PathBuf::from("entities.json")));
        assert!(cfg.log_json);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[
            (ENV_OUT_DIR, "  "),
            (ENV_FORMAT, ""),
            (ENV_ENTITY_FILE, " "),
            (ENV_LOG_JSON, ""),
        ])
        .unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(cfg.format, Format::All);
        assert_eq!(cfg.entity_file, None);
        assert!(!cfg.log_json);
    }

    #[test]
    fn invalid_format_is_a_config_error() {
        assert_matches!(config(&[(ENV_FORMAT, "yaml")]), Err(CliError::Config(_)));
        assert_matches!(config(&[(ENV_LOG_JSON, "maybe")]), Err(CliError::Config(_)));
    }

    #[test]
    fn flags_override_env() {
        let args = Args {
            out: Some(PathBuf::from("out")),
            format: Some("json-schema".to_string()),
            ..Args::default()
        };
        let cfg = config(&[(ENV_OUT_DIR, "elsewhere"), (ENV_FORMAT, "ts")])
            .unwrap()
            .with_args(&args)
            .unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from("out"));
        assert_eq!(cfg.format, Format::JsonSchema);
    }
}
