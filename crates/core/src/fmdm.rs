// SPDX-License-Identifier: MIT

//! The Folder MCP Data Model: the authoritative, process-wide snapshot
//! broadcast to every connected client.

use crate::folder::Folder;
use crate::model_download::ModelDownload;
use serde::{Deserialize, Serialize};

/// Identity of the running daemon, as advertised to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonInfo {
    pub pid: u32,
    pub ws_url: String,
    pub version: String,
}

/// A model id the daemon can serve embeddings for, and where it comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    /// "sidecar" or "remote" — which `EmbeddingBackend` variant serves it.
    pub origin: String,
    pub dimension: usize,
}

/// Immutable, versioned snapshot of everything the bus broadcasts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fmdm {
    pub version: u64,
    pub folders: Vec<Folder>,
    pub daemon: Option<DaemonInfo>,
    pub downloads: Vec<ModelDownload>,
    pub models: Vec<ModelInfo>,
}

impl Fmdm {
    pub fn folder(&self, path: &std::path::Path) -> Option<&Folder> {
        self.folders.iter().find(|f| f.matches_path(path))
    }
}

#[cfg(test)]
#[path = "fmdm_tests.rs"]
mod tests;
