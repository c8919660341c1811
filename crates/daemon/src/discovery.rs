// SPDX-License-Identifier: MIT

//! Discovery File (C1): advertises the live daemon's WebSocket endpoint and
//! PID to local clients (§6.3). Writes are atomic (write-temp, rename);
//! the file is created on startup and deleted on clean shutdown.
//!
//! The file itself is advisory — clients read it to auto-connect. The
//! race-free singleton check lives in [`crate::supervisor`], which holds an
//! exclusive `fs2` lock on a separate lock file; a stale discovery file left
//! behind by a crashed daemon is simply overwritten once that lock is held.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryFile {
    pub pid: u32,
    pub ws_url: String,
    pub version: String,
    pub started_at: String,
}

impl DiscoveryFile {
    pub fn path(state_dir: &Path) -> PathBuf {
        state_dir.join("daemon.json")
    }

    pub fn write(&self, state_dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(state_dir)?;
        let path = Self::path(state_dir);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, serde_json::to_string_pretty(self)?)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Returns `Ok(None)` both when the file is absent and when it exists
    /// but fails to parse (e.g. truncated by a concurrent writer) — either
    /// way there is nothing a caller can act on.
    pub fn read(state_dir: &Path) -> std::io::Result<Option<Self>> {
        let path = Self::path(state_dir);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw).ok())
    }

    pub fn remove(state_dir: &Path) {
        let _ = std::fs::remove_file(Self::path(state_dir));
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
