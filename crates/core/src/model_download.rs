// SPDX-License-Identifier: MIT

//! The `ModelDownload` record tracked by the model download coordinator and
//! mirrored into the FMDM so clients can render progress.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Queued,
    Downloading,
    Ready,
    Error,
}

crate::simple_display! {
    DownloadStatus {
        Queued => "queued",
        Downloading => "downloading",
        Ready => "ready",
        Error => "error",
    }
}

impl DownloadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DownloadStatus::Ready | DownloadStatus::Error)
    }
}

/// A single model's download progress, unique by `model_id`.
///
/// This is the FMDM-facing projection; the coordinator additionally tracks
/// waiter channels that are not part of the broadcast snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDownload {
    pub model_id: String,
    pub status: DownloadStatus,
    pub progress: u8,
    pub eta_seconds: Option<u32>,
    pub error: Option<String>,
}

impl ModelDownload {
    pub fn queued(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            status: DownloadStatus::Queued,
            progress: 0,
            eta_seconds: None,
            error: None,
        }
    }
}

#[cfg(test)]
#[path = "model_download_tests.rs"]
mod tests;
