// SPDX-License-Identifier: MIT

//! The FMDM's single owner task.
//!
//! Every mutation arrives as a message on the store's inbox; the store
//! applies it, bumps the version, and republishes the full snapshot on a
//! `watch` channel. Readers — the broadcast bus, tests — never mutate the
//! FMDM directly; they either hold a `watch::Receiver` for snapshots or send
//! a `FmdmCommand` through the `FmdmHandle`.

use fmcp_core::{DaemonInfo, Fmdm, Folder, FolderStatus, ModelDownload, ModelInfo};
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

/// Mutating operations accepted by the store task (§4.7).
#[derive(Debug)]
pub enum FmdmCommand {
    AddFolder { folder: Folder, reply: oneshot::Sender<()> },
    RemoveFolder { path: PathBuf, reply: oneshot::Sender<()> },
    UpdateFolderStatus { path: PathBuf, status: FolderStatus },
    UpdateFolderProgress { path: PathBuf, completed: usize, total: usize },
    SetFolderError { path: PathBuf, message: String },
    SetDaemonInfo { info: DaemonInfo },
    SetModels { models: Vec<ModelInfo> },
    AddDownload { download: ModelDownload },
    UpdateDownload { download: ModelDownload },
    RemoveDownload { model_id: String },
    /// For tests and the CLI's one-shot `status`; normal observers should use
    /// the `watch::Receiver` instead of polling.
    Snapshot { reply: oneshot::Sender<Fmdm> },
}

/// The store's run loop. Call this inside a spawned task; it returns once
/// the command channel is closed (every handle dropped).
pub struct FmdmStore {
    fmdm: Fmdm,
    inbox: mpsc::Receiver<FmdmCommand>,
    publisher: watch::Sender<Fmdm>,
}

impl FmdmStore {
    /// Builds a store plus the handle/receiver pair its owner needs to wire
    /// into the rest of the daemon.
    pub fn spawn_channels(buffer: usize) -> (FmdmHandle, watch::Receiver<Fmdm>, FmdmStore) {
        let (tx, rx) = mpsc::channel(buffer);
        let (watch_tx, watch_rx) = watch::channel(Fmdm::default());
        let store = FmdmStore { fmdm: Fmdm::default(), inbox: rx, publisher: watch_tx };
        (FmdmHandle { tx }, watch_rx, store)
    }

    /// Drains the inbox until closed, applying each command in turn.
    pub async fn run(mut self) {
        while let Some(cmd) = self.inbox.recv().await {
            self.apply(cmd);
        }
        debug!("fmdm store inbox closed, exiting");
    }

    fn apply(&mut self, cmd: FmdmCommand) {
        match cmd {
            FmdmCommand::AddFolder { folder, reply } => {
                self.fmdm.folders.retain(|f| f.path != folder.path);
                self.fmdm.folders.push(folder);
                self.bump();
                let _ = reply.send(());
            }
            FmdmCommand::RemoveFolder { path, reply } => {
                self.fmdm.folders.retain(|f| f.path != path);
                self.bump();
                let _ = reply.send(());
            }
            FmdmCommand::UpdateFolderStatus { path, status } => {
                self.with_folder(&path, |f| f.set_status(status));
            }
            FmdmCommand::UpdateFolderProgress { path, completed, total } => {
                self.with_folder(&path, |f| f.set_progress(completed, total));
            }
            FmdmCommand::SetFolderError { path, message } => {
                self.with_folder(&path, |f| f.set_error(message));
            }
            FmdmCommand::SetDaemonInfo { info } => {
                self.fmdm.daemon = Some(info);
                self.bump();
            }
            FmdmCommand::SetModels { models } => {
                self.fmdm.models = models;
                self.bump();
            }
            FmdmCommand::AddDownload { download } => {
                self.fmdm.downloads.retain(|d| d.model_id != download.model_id);
                self.fmdm.downloads.push(download);
                self.bump();
            }
            FmdmCommand::UpdateDownload { download } => {
                if let Some(existing) =
                    self.fmdm.downloads.iter_mut().find(|d| d.model_id == download.model_id)
                {
                    *existing = download;
                    self.bump();
                } else {
                    warn!(model_id = %download.model_id, "update for unknown download, ignoring");
                }
            }
            FmdmCommand::RemoveDownload { model_id } => {
                self.fmdm.downloads.retain(|d| d.model_id != model_id);
                self.bump();
            }
            FmdmCommand::Snapshot { reply } => {
                let _ = reply.send(self.fmdm.clone());
            }
        }
    }

    /// Mutations against a folder that no longer exists are a silent no-op
    /// (§4.7 consistency rule) — tolerates the race between remove-folder and
    /// in-flight pipeline notifications.
    fn with_folder(&mut self, path: &std::path::Path, f: impl FnOnce(&mut Folder)) {
        match self.fmdm.folders.iter_mut().find(|folder| folder.matches_path(path)) {
            Some(folder) => {
                f(folder);
                self.bump();
            }
            None => debug!(?path, "status update for vanished folder, ignoring"),
        }
    }

    fn bump(&mut self) {
        self.fmdm.version += 1;
        let _ = self.publisher.send(self.fmdm.clone());
    }
}

/// Cheaply cloneable send-side handle to a running `FmdmStore`.
#[derive(Clone)]
pub struct FmdmHandle {
    tx: mpsc::Sender<FmdmCommand>,
}

impl FmdmHandle {
    pub async fn add_folder(&self, folder: Folder) {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(FmdmCommand::AddFolder { folder, reply }).await.is_ok() {
            let _ = rx.await;
        }
    }

    pub async fn remove_folder(&self, path: PathBuf) {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(FmdmCommand::RemoveFolder { path, reply }).await.is_ok() {
            let _ = rx.await;
        }
    }

    pub async fn update_folder_status(&self, path: PathBuf, status: FolderStatus) {
        let _ = self.tx.send(FmdmCommand::UpdateFolderStatus { path, status }).await;
    }

    pub async fn update_folder_progress(&self, path: PathBuf, completed: usize, total: usize) {
        let _ = self.tx.send(FmdmCommand::UpdateFolderProgress { path, completed, total }).await;
    }

    pub async fn set_folder_error(&self, path: PathBuf, message: impl Into<String>) {
        let _ = self.tx.send(FmdmCommand::SetFolderError { path, message: message.into() }).await;
    }

    pub async fn set_daemon_info(&self, info: DaemonInfo) {
        let _ = self.tx.send(FmdmCommand::SetDaemonInfo { info }).await;
    }

    pub async fn set_models(&self, models: Vec<ModelInfo>) {
        let _ = self.tx.send(FmdmCommand::SetModels { models }).await;
    }

    pub async fn add_download(&self, download: ModelDownload) {
        let _ = self.tx.send(FmdmCommand::AddDownload { download }).await;
    }

    pub async fn update_download(&self, download: ModelDownload) {
        let _ = self.tx.send(FmdmCommand::UpdateDownload { download }).await;
    }

    pub async fn remove_download(&self, model_id: impl Into<String>) {
        let _ = self.tx.send(FmdmCommand::RemoveDownload { model_id: model_id.into() }).await;
    }

    pub async fn snapshot(&self) -> Option<Fmdm> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(FmdmCommand::Snapshot { reply }).await.ok()?;
        rx.await.ok()
    }
}

#[cfg(test)]
#[path = "fmdm_store_tests.rs"]
mod tests;
