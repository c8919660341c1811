// SPDX-License-Identifier: MIT

//! The remote HTTP `EmbeddingBackend` variant: no process lifecycle,
//! priority is ignored because the remote service already multiplexes
//! (§4.2).

use crate::backend::{BackendError, BackendStats, EmbeddingBackend, Priority};
use async_trait::async_trait;
use fmcp_core::EmbeddingVector;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub model_id: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Deserialize)]
struct TagEntry {
    name: String,
}

pub struct RemoteBackend {
    config: RemoteConfig,
    client: reqwest::Client,
    verified: Mutex<bool>,
}

impl RemoteBackend {
    pub fn new(config: RemoteConfig) -> Self {
        Self { config, client: reqwest::Client::new(), verified: Mutex::new(false) }
    }
}

#[async_trait]
impl EmbeddingBackend for RemoteBackend {
    async fn initialize(&self, model_id: &str) -> Result<(), BackendError> {
        if model_id != self.config.model_id {
            return Err(BackendError::UnknownModel(model_id.to_string()));
        }
        let url = format!("{}/api/tags", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?
            .json::<TagsResponse>()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        if !response.models.iter().any(|m| m.name == model_id) {
            return Err(BackendError::UnknownModel(model_id.to_string()));
        }
        *self.verified.lock().unwrap_or_else(|e| e.into_inner()) = true;
        Ok(())
    }

    async fn embed(&self, _priority: Priority, texts: Vec<String>) -> Result<Vec<EmbeddingVector>, BackendError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/api/embed", self.config.base_url.trim_end_matches('/'));
        let body = EmbedRequest { model: &self.config.model_id, input: &texts };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?
            .json::<EmbedResponse>()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        Ok(response
            .embeddings
            .into_iter()
            .filter_map(|values| {
                let dim = values.len();
                EmbeddingVector::new(self.config.model_id.clone(), values, dim, "").ok()
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        *self.verified.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn stats(&self) -> BackendStats {
        BackendStats {
            backend: "remote".to_string(),
            model: self.config.model_id.clone(),
            restarts: 0,
            pid: None,
            last_restart_at: None,
        }
    }

    async fn shutdown(&self) {
        // No process lifecycle to tear down.
    }
}
