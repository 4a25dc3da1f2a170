//! JSON file holding store
//!
//! Persists the position list as a pretty-printed JSON array. Saves go to a
//! sibling temp file first and are renamed into place.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::HoldingStore;
use crate::error::Result;
use crate::model::Position;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("portfolio.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HoldingStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Position>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, positions: &[Position]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(positions)?;
        let staging = self.staging_path();
        fs::write(&staging, content)?;
        fs::rename(&staging, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = positions.len(), "saved holdings");
        Ok(())
    }
}
