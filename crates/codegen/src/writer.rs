//! Writing generated files to disk, or checking them against disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CodegenError;
use crate::GeneratedFile;

/// What happened to each generated file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    /// Files whose on-disk contents differ from the generated output.
    /// Only populated in check mode.
    pub stale: Vec<PathBuf>,
}

impl WriteSummary {
    pub fn is_up_to_date(&self) -> bool {
        self.stale.is_empty()
    }
}

/// Writes generated files below an output directory.
///
/// In check mode nothing is written; files that are missing or differ are
/// reported as stale instead. Files whose contents already match are never
/// rewritten, so timestamps stay stable for incremental frontend builds.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    out_dir: PathBuf,
    check: bool,
}

impl OutputWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            check: false,
        }
    }

    pub fn check_only(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn write_all(&self, files: &[GeneratedFile]) -> Result<WriteSummary, CodegenError> {
        if !self.check {
            fs::create_dir_all(&self.out_dir).map_err(|e| CodegenError::io(&self.out_dir, e))?;
        }

        let mut summary = WriteSummary::default();
        for file in files {
            let path = self.out_dir.join(&file.path);
            let current = read_existing(&path)?;

            if current.as_deref() == Some(file.contents.as_str()) {
                tracing::debug!(path = %path.display(), "Unchanged");
                summary.unchanged.push(path);
            } else if self.check {
                tracing::warn!(path = %path.display(), "Generated file is stale");
                summary.stale.push(path);
            } else {
                fs::write(&path, &file.contents).map_err(|e| CodegenError::io(&path, e))?;
                tracing::info!(path = %path.display(), bytes = file.contents.len(), "Wrote");
                summary.written.push(path);
            }
        }
        Ok(summary)
    }
}

fn read_existing(path: &Path) -> Result<Option<String>, CodegenError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CodegenError::io(path, e)),
    }
}
