// SPDX-License-Identifier: MIT

//! Directory walk + fingerprinting (§4.6 step 1), via the `ignore` crate so
//! `.gitignore` rules are honored the same way a developer's editor or
//! `git status` would, plus a fixed set of directories the daemon always
//! excludes regardless of `.gitignore` contents.

use crate::parse::{extension_of, DocumentParser};
use chrono::{DateTime, Utc};
use fmcp_core::Fingerprint;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directories never walked, independent of `.gitignore` (the daemon's own
/// cache directory is one of these — see §6.4).
pub const DEFAULT_IGNORES: &[&str] = &["node_modules", ".git", ".folder-mcp"];

/// Walks `root`, applying `parser`'s extension allow-list and the ignore
/// patterns, and returns a fingerprint per matched file. Unsupported
/// extensions and ignored paths never reach the returned map, so they never
/// reach `toIndex` downstream.
pub fn scan_folder(
    root: &Path,
    parser: &dyn DocumentParser,
    extra_ignores: &[String],
) -> std::io::Result<HashMap<PathBuf, Fingerprint>> {
    let mut override_builder = OverrideBuilder::new(root);
    for pattern in DEFAULT_IGNORES.iter().map(|s| s.to_string()).chain(extra_ignores.iter().cloned()) {
        let _ = override_builder.add(&format!("!**/{pattern}/**"));
        let _ = override_builder.add(&format!("!**/{pattern}"));
    }
    let overrides = override_builder
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut current = HashMap::new();
    let walker = WalkBuilder::new(root).hidden(false).overrides(overrides).build();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%err, "scan error, skipping entry");
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path().to_path_buf();
        let Some(extension) = extension_of(&path) else { continue };
        if !parser.supports(&extension) {
            continue;
        }
        match fingerprint_file(&path) {
            Ok(fingerprint) => {
                current.insert(path, fingerprint);
            }
            Err(err) => tracing::warn!(?path, %err, "failed to fingerprint file during scan, skipping"),
        }
    }
    Ok(current)
}

fn fingerprint_file(path: &Path) -> std::io::Result<Fingerprint> {
    let bytes = std::fs::read(path)?;
    let metadata = std::fs::metadata(path)?;
    let mtime: DateTime<Utc> = metadata.modified()?.into();
    Ok(Fingerprint::new(path.to_path_buf(), metadata.len(), mtime.to_rfc3339(), &bytes))
}

/// Diffs a freshly scanned `current` set against the store's `stored`
/// fingerprints (§4.6 step 2): files to (re)index, and files to delete.
pub fn reconcile(
    current: &HashMap<PathBuf, Fingerprint>,
    stored: &HashMap<PathBuf, Fingerprint>,
) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut to_index = Vec::new();
    for (path, fingerprint) in current {
        match stored.get(path) {
            Some(existing) if !fingerprint.changed_from(existing) => {}
            _ => to_index.push(path.clone()),
        }
    }
    let to_delete: Vec<PathBuf> = stored.keys().filter(|path| !current.contains_key(*path)).cloned().collect();
    (to_index, to_delete)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
