//! Append-only alert log
//!
//! The file is opened in append mode for every line and each line goes out
//! in a single write, so concurrent or interrupted writers cannot interleave
//! or truncate earlier entries. No rotation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::types::{AlertEvent, AlertLogError};

#[derive(Debug, Clone)]
pub struct AlertLog {
    path: PathBuf,
}

impl AlertLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `[stamp] message` for one event
    pub fn append(&self, event: &AlertEvent) -> Result<(), AlertLogError> {
        let mut line = event.log_line();
        line.push('\n');

        let write_err = |source| AlertLogError::Write {
            path: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.write_all(line.as_bytes()).map_err(write_err)?;
        Ok(())
    }

    /// Read every line back (used by tests and the CLI summary)
    pub fn read_lines(&self) -> Result<Vec<String>, AlertLogError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| AlertLogError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(content.lines().map(str::to_string).collect())
    }
}
