// SPDX-License-Identifier: MIT

//! Per-file fingerprint used to decide whether a file must be re-indexed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// `(path, size, mtime, hash)` tuple — the unit of change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub path: PathBuf,
    pub size: u64,
    /// RFC 3339 last-modified timestamp.
    pub mtime: String,
    /// Hex-encoded SHA-256 of the file content.
    pub hash: String,
}

impl Fingerprint {
    pub fn new(path: PathBuf, size: u64, mtime: impl Into<String>, content: &[u8]) -> Self {
        Self { path, size, mtime: mtime.into(), hash: hash_content(content) }
    }

    /// Whether `other` represents a content change relative to `self`
    /// (same path assumed; callers key by path before calling this).
    pub fn changed_from(&self, other: &Fingerprint) -> bool {
        self.hash != other.hash || self.size != other.size
    }
}

pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
