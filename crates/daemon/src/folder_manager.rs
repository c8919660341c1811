// SPDX-License-Identifier: MIT

//! Owns everything needed to add, remove, retry, and enumerate monitored
//! folders: the persisted config, the shared embedding backends, the
//! model-download coordinator, and the live `FolderPipeline` handles. Both
//! the supervisor's startup sequence and the broadcast bus's request
//! handlers go through this one owner rather than touching pipelines
//! directly — mirrors the single-owner-task discipline the FMDM store
//! itself uses (§5).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex as SyncMutex;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, warn};

use fmcp_core::{ErrorKind, Folder};
use fmcp_embed::ModelDownloadCoordinator;
use fmcp_engine::{validate_folder, FolderPipeline, PipelineConfig, PipelineHandle, PlainTextParser, ValidationResult};
use fmcp_store::{ConfigError, FmdmHandle, FolderConfig, JsonVectorStore, PersistedConfig, VectorStoreError};

use crate::backends::BackendSet;

/// Hidden per-folder cache directory (§6.4); already on the scanner's
/// always-ignored list (`fmcp_engine::scan::DEFAULT_IGNORES`).
const CACHE_DIR_NAME: &str = ".folder-mcp";
const VECTOR_STORE_FILE: &str = "index.json.zst";

#[derive(Debug, Error)]
pub enum FolderManagerError {
    #[error("{0}")]
    Invalid(String),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("vector store error: {0}")]
    Store(#[from] VectorStoreError),

    #[error("embedding backend error: {0}")]
    Backend(#[from] fmcp_embed::BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FolderManagerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FolderManagerError::Invalid(_) => ErrorKind::InvalidInput,
            FolderManagerError::Config(_) | FolderManagerError::Io(_) => ErrorKind::Internal,
            FolderManagerError::Store(_) => ErrorKind::StoreFailure,
            FolderManagerError::Backend(_) => ErrorKind::BackendUnavailable,
        }
    }
}

pub struct FolderManager {
    fmdm: FmdmHandle,
    config_path: PathBuf,
    config: Mutex<PersistedConfig>,
    downloads: ModelDownloadCoordinator,
    backends: BackendSet,
    pipelines: SyncMutex<HashMap<PathBuf, PipelineHandle>>,
}

impl FolderManager {
    pub fn new(fmdm: FmdmHandle, config_path: PathBuf, config: PersistedConfig) -> Self {
        Self {
            fmdm,
            config_path,
            config: Mutex::new(config),
            downloads: ModelDownloadCoordinator::new(),
            backends: BackendSet::new(),
            pipelines: SyncMutex::new(HashMap::new()),
        }
    }

    /// Startup sequence step 4 (§4.9): launches a pipeline per persisted
    /// folder; a failure is captured into that folder's `error` state and
    /// never aborts the daemon.
    pub async fn start_persisted_folders(&self) {
        let folders = self.config.lock().await.folders.clone();
        for entry in folders {
            self.fmdm.add_folder(Folder::new(entry.path.clone(), entry.model.clone())).await;
            if let Err(err) = self.spawn_pipeline(entry.path.clone(), entry.model.clone()) {
                error!(path = ?entry.path, %err, "failed to launch pipeline for persisted folder");
                self.fmdm.set_folder_error(entry.path, err.to_string()).await;
            }
        }
    }

    pub async fn validate(&self, path: &Path) -> ValidationResult {
        let snapshot = self.fmdm.snapshot().await.unwrap_or_default();
        validate_folder(path, &snapshot.folders)
    }

    /// Validates, persists, registers with the FMDM, and spawns the
    /// pipeline. Ancestor folders the validator flagged for replacement are
    /// removed first — per §4.1 rule 4, calling `add` after seeing that
    /// warning *is* the user's confirmation.
    pub async fn add_folder(&self, path: &Path, model: String) -> Result<ValidationResult, FolderManagerError> {
        let result = self.validate(path).await;
        if !result.valid {
            return Ok(result);
        }
        let canonical = std::fs::canonicalize(path)?;

        for replaced in &result.replaces {
            self.remove_folder(replaced).await;
        }

        {
            let mut config = self.config.lock().await;
            config.add_folder(FolderConfig { path: canonical.clone(), model: model.clone() });
            config.save(&self.config_path)?;
        }

        self.fmdm.add_folder(Folder::new(canonical.clone(), model.clone())).await;
        if let Err(err) = self.spawn_pipeline(canonical.clone(), model) {
            self.fmdm.set_folder_error(canonical, err.to_string()).await;
        }
        Ok(result)
    }

    pub async fn remove_folder(&self, path: &Path) {
        let handle = self.pipelines.lock().remove(path);
        if let Some(handle) = handle {
            handle.stop().await;
        }
        self.fmdm.remove_folder(path.to_path_buf()).await;

        let mut config = self.config.lock().await;
        config.remove_folder(path);
        if let Err(err) = config.save(&self.config_path) {
            warn!(%err, "failed to persist folder removal");
        }
    }

    /// No-op (returns `false`) unless the folder is currently registered —
    /// callers translate that into `folder_not_ready` on the wire.
    pub fn retry(&self, path: &Path) -> bool {
        match self.pipelines.lock().get(path).cloned() {
            Some(handle) => {
                tokio::spawn(async move { handle.retry().await });
                true
            }
            None => false,
        }
    }

    pub fn pipeline(&self, path: &Path) -> Option<PipelineHandle> {
        self.pipelines.lock().get(path).cloned()
    }

    /// Stops every pipeline; used during shutdown (§4.9). Callers enforce
    /// the drain deadline themselves with `tokio::time::timeout`.
    pub async fn stop_all(&self) {
        let handles: Vec<_> = self.pipelines.lock().drain().map(|(_, h)| h).collect();
        for handle in handles {
            handle.stop().await;
        }
    }

    pub async fn shutdown_backends(&self) {
        self.backends.shutdown_all().await;
    }

    fn spawn_pipeline(&self, path: PathBuf, model: String) -> Result<(), FolderManagerError> {
        let backend = self.backends.get_or_build(&model)?;

        let cache_dir = path.join(CACHE_DIR_NAME);
        std::fs::create_dir_all(&cache_dir)?;
        let store = JsonVectorStore::open(cache_dir.join(VECTOR_STORE_FILE), &model)?;

        let config = PipelineConfig::new(path.clone(), model);
        let handle = FolderPipeline::spawn(
            config,
            self.fmdm.clone(),
            backend,
            self.downloads.clone(),
            Box::new(store),
            Arc::new(PlainTextParser),
        );
        self.pipelines.lock().insert(path, handle);
        Ok(())
    }
}

#[cfg(test)]
#[path = "folder_manager_tests.rs"]
mod tests;
