// SPDX-License-Identifier: MIT

//! The abstract contract the folder pipeline consumes (§4.2), implemented
//! by both the sidecar and remote variants.

use async_trait::async_trait;
use fmcp_core::EmbeddingVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Immediate,
    Batch,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("embedding backend unavailable: {0}")]
    Unavailable(String),

    #[error("model download failed: {0}")]
    ModelDownloadFailed(String),

    #[error("embedding request timed out")]
    Timeout,

    #[error("unknown model id: {0}")]
    UnknownModel(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendStats {
    pub backend: String,
    pub model: String,
    pub restarts: u32,
    pub pid: Option<u32>,
    pub last_restart_at: Option<String>,
}

#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Idempotent; blocks until the backend can serve embeddings for
    /// `model_id`, triggering a model download if necessary.
    async fn initialize(&self, model_id: &str) -> Result<(), BackendError>;

    async fn embed(&self, priority: Priority, texts: Vec<String>) -> Result<Vec<EmbeddingVector>, BackendError>;

    async fn health_check(&self) -> bool;

    async fn stats(&self) -> BackendStats;

    async fn shutdown(&self);
}
