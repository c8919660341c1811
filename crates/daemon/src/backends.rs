// SPDX-License-Identifier: MIT

//! Builds and caches one `EmbeddingBackend` per model id (§3.1, §4.2): a
//! kept-alive sidecar process for `origin: "sidecar"` models, a shared HTTP
//! client for `origin: "remote"` models. A backend is shared by every
//! folder that uses the same model, matching the "keep-alive process"
//! contract — two folders sharing a model share one child process.

use fmcp_core::SystemClock;
use fmcp_embed::{model_info, BackendError, EmbeddingBackend, RemoteBackend, RemoteConfig, SidecarBackend, SidecarConfig};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::env;

const SIDECAR_MAX_RESTARTS: u32 = 5;
const SIDECAR_RESTART_WINDOW: Duration = Duration::from_secs(60);
const SIDECAR_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct BackendSet {
    backends: Arc<Mutex<HashMap<String, Arc<dyn EmbeddingBackend>>>>,
}

impl Default for BackendSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendSet {
    pub fn new() -> Self {
        Self { backends: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Returns the shared backend for `model_id`, building it on first use.
    pub fn get_or_build(&self, model_id: &str) -> Result<Arc<dyn EmbeddingBackend>, BackendError> {
        if let Some(backend) = self.backends.lock().get(model_id).cloned() {
            return Ok(backend);
        }

        let entry = model_info(model_id).ok_or_else(|| BackendError::UnknownModel(model_id.to_string()))?;
        let backend: Arc<dyn EmbeddingBackend> = match entry.origin {
            "sidecar" => SidecarBackend::spawn(
                SidecarConfig {
                    command: env::sidecar_command(),
                    args: vec!["--model".to_string(), model_id.to_string()],
                    model_id: model_id.to_string(),
                    max_restarts: SIDECAR_MAX_RESTARTS,
                    restart_window: SIDECAR_RESTART_WINDOW,
                    shutdown_grace: SIDECAR_SHUTDOWN_GRACE,
                },
                SystemClock,
            ),
            "remote" => {
                Arc::new(RemoteBackend::new(RemoteConfig { base_url: env::remote_base_url(), model_id: model_id.to_string() }))
            }
            other => return Err(BackendError::UnknownModel(format!("{model_id} (unrecognized origin '{other}')"))),
        };

        self.backends.lock().insert(model_id.to_string(), backend.clone());
        Ok(backend)
    }

    /// Shuts down every backend built so far. Called after every pipeline
    /// has drained (§4.9) — a backend may still be mid-request for another
    /// folder sharing the model until then.
    pub async fn shutdown_all(&self) {
        let backends: Vec<_> = self.backends.lock().values().cloned().collect();
        for backend in backends {
            backend.shutdown().await;
        }
    }
}

#[cfg(test)]
#[path = "backends_tests.rs"]
mod tests;
