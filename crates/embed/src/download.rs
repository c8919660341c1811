// SPDX-License-Identifier: MIT

//! Model Download Coordinator (C4): a process-wide single-flight map from
//! model id to in-progress download.

use fmcp_core::{DownloadStatus, ModelDownload};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Ready,
    Error(String),
}

struct Entry {
    download: ModelDownload,
    /// Broadcasts the terminal outcome to every waiter; `None` until the
    /// download reaches `ready`/`error`.
    done_tx: watch::Sender<Option<DownloadOutcome>>,
}

/// Cloneable handle; cloning shares the same underlying map.
#[derive(Clone)]
pub struct ModelDownloadCoordinator {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl Default for ModelDownloadCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelDownloadCoordinator {
    pub fn new() -> Self {
        Self { entries: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Returns `true` if this call is the one that must actually perform the
    /// download (it just created the entry); `false` means an existing
    /// download is already in flight or complete and the caller should only
    /// await `wait_for`.
    pub fn begin(&self, model_id: &str) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(model_id) {
            return false;
        }
        let (done_tx, _) = watch::channel(None);
        entries.insert(model_id.to_string(), Entry { download: ModelDownload::queued(model_id), done_tx });
        true
    }

    pub fn update_progress(&self, model_id: &str, progress: u8, eta_seconds: Option<u32>) {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get_mut(model_id) {
            entry.download.status = DownloadStatus::Downloading;
            entry.download.progress = progress;
            entry.download.eta_seconds = eta_seconds;
        }
    }

    pub fn complete(&self, model_id: &str) {
        self.finish(model_id, DownloadStatus::Ready, None);
    }

    pub fn fail(&self, model_id: &str, message: impl Into<String>) {
        self.finish(model_id, DownloadStatus::Error, Some(message.into()));
    }

    fn finish(&self, model_id: &str, status: DownloadStatus, error: Option<String>) {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get_mut(model_id) {
            entry.download.status = status;
            entry.download.progress = 100;
            entry.download.error = error.clone();
            let outcome = match error {
                Some(message) => DownloadOutcome::Error(message),
                None => DownloadOutcome::Ready,
            };
            let _ = entry.done_tx.send(Some(outcome));
        }
    }

    /// Awaits the terminal outcome of the download for `model_id`. If the
    /// entry has already reached ready/error, returns immediately.
    pub async fn wait_for(&self, model_id: &str) -> Option<DownloadOutcome> {
        let mut rx = {
            let entries = self.entries.lock();
            entries.get(model_id)?.done_tx.subscribe()
        };
        if let Some(outcome) = rx.borrow().clone() {
            return Some(outcome);
        }
        rx.changed().await.ok()?;
        rx.borrow().clone()
    }

    pub fn snapshot(&self, model_id: &str) -> Option<ModelDownload> {
        self.entries.lock().get(model_id).map(|e| e.download.clone())
    }

    /// Removes a terminal entry so a future request can retry from scratch.
    /// Per §4.3, cancellation never interrupts an in-flight download — this
    /// only prunes entries already at ready/error.
    pub fn remove_if_terminal(&self, model_id: &str) {
        let mut entries = self.entries.lock();
        if entries.get(model_id).is_some_and(|e| e.download.status.is_terminal()) {
            entries.remove(model_id);
        }
    }
}

#[cfg(test)]
#[path = "download_tests.rs"]
mod tests;
