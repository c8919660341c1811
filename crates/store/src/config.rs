// SPDX-License-Identifier: MIT

//! Persisted folder-list configuration (§6.2).
//!
//! Keys the daemon understands are typed; everything else round-trips
//! untouched through `toml::Value` so a future version's extra fields
//! survive a read-then-write cycle from this one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderConfig {
    pub path: PathBuf,
    pub model: String,
}

/// The typed view the daemon reads and writes; `extra` carries every
/// top-level key this version doesn't know about, reassembled verbatim on
/// save.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersistedConfig {
    pub folders: Vec<FolderConfig>,
    extra: toml::value::Table,
}

impl PersistedConfig {
    pub fn new(folders: Vec<FolderConfig>) -> Self {
        Self { folders, extra: toml::value::Table::new() }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let mut table: toml::value::Table = toml::from_str(&raw)?;
        let folders = match table.remove("folders") {
            Some(value) => value.try_into::<Vec<FolderConfig>>()?,
            None => Vec::new(),
        };
        Ok(Self { folders, extra: table })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let mut table = self.extra.clone();
        let folders_value = toml::Value::try_from(&self.folders)?;
        table.insert("folders".to_string(), folders_value);
        let doc = toml::Value::Table(table);
        let rendered = toml::to_string_pretty(&doc)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, rendered)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn add_folder(&mut self, folder: FolderConfig) {
        self.folders.retain(|f| f.path != folder.path);
        self.folders.push(folder);
    }

    pub fn remove_folder(&mut self, path: &Path) {
        self.folders.retain(|f| f.path != path);
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
