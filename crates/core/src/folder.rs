// SPDX-License-Identifier: MIT

//! A user-configured monitored folder and its pipeline state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scalar state of a folder's indexing pipeline (see fmcp-engine::pipeline for
/// the state machine that drives these transitions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderStatus {
    Pending,
    ValidatingModel,
    DownloadingModel,
    Scanning,
    Indexing,
    Ready,
    Watching,
    Error,
    Stopping,
    Terminated,
}

crate::simple_display! {
    FolderStatus {
        Pending => "pending",
        ValidatingModel => "validating-model",
        DownloadingModel => "downloading-model",
        Scanning => "scanning",
        Indexing => "indexing",
        Ready => "ready",
        Watching => "watching",
        Error => "error",
        Stopping => "stopping",
        Terminated => "terminated",
    }
}

impl FolderStatus {
    /// Progress is only meaningful while scanning or indexing.
    pub fn reports_progress(&self) -> bool {
        matches!(self, FolderStatus::Scanning | FolderStatus::Indexing)
    }

    /// Whether a folder in this status can serve `search` queries.
    pub fn is_queryable(&self) -> bool {
        matches!(self, FolderStatus::Ready | FolderStatus::Watching)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FolderStatus::Terminated)
    }
}

/// A user-configured root folder tracked by the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Absolute, canonical (symlink-resolved) path.
    pub path: PathBuf,
    /// Embedding model id chosen for this folder.
    pub model: String,
    pub status: FolderStatus,
    /// 0-100, only meaningful in `scanning`/`indexing`.
    pub progress: u8,
    pub error: Option<String>,
    /// Transient, cleared on every state change.
    pub notification: Option<String>,
}

impl Folder {
    pub fn new(path: PathBuf, model: impl Into<String>) -> Self {
        Self {
            path,
            model: model.into(),
            status: FolderStatus::Pending,
            progress: 0,
            error: None,
            notification: None,
        }
    }

    /// Transition to a new status, clearing progress/notification/error as
    /// appropriate. Does not validate that the transition is legal — that is
    /// the pipeline's job; this is a plain data mutation.
    pub fn set_status(&mut self, status: FolderStatus) {
        self.status = status;
        self.notification = None;
        if !status.reports_progress() {
            self.progress = 0;
        }
        if status != FolderStatus::Error {
            self.error = None;
        }
    }

    pub fn set_progress(&mut self, completed: usize, total: usize) {
        self.progress = if total == 0 {
            100
        } else {
            ((completed as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
        };
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = FolderStatus::Error;
        self.error = Some(message.into());
        self.progress = 0;
    }

    pub fn matches_path(&self, other: &Path) -> bool {
        self.path == other
    }
}

#[cfg(test)]
#[path = "folder_tests.rs"]
mod tests;
