// SPDX-License-Identifier: MIT

//! Reference `VectorStore` implementation: one zstd-compressed JSON file per
//! folder (§4.4.1). The whole file is loaded once at pipeline startup and
//! kept resident; writes rewrite the file atomically (write-temp, rename),
//! matching the teacher storage crate's checkpoint-then-rename discipline.

use crate::vector_store::{ScoredChunk, VectorStore, VectorStoreError};
use fmcp_core::{Chunk, EmbeddingVector, Fingerprint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const ZSTD_LEVEL: i32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRow {
    chunk: Chunk,
    vector: EmbeddingVector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredFile {
    model_id: String,
    fingerprints: HashMap<PathBuf, Fingerprint>,
    rows: Vec<StoredRow>,
}

impl StoredFile {
    fn empty(model_id: impl Into<String>) -> Self {
        Self { model_id: model_id.into(), fingerprints: HashMap::new(), rows: Vec::new() }
    }
}

pub struct JsonVectorStore {
    file_path: PathBuf,
    state: StoredFile,
}

impl JsonVectorStore {
    /// Opens (or creates) the store at `file_path` for the given folder
    /// model id. If the file already exists its `model_id` header must match
    /// `configured_model` — a mismatch is fatal per §4.4's invariant.
    pub fn open(file_path: PathBuf, configured_model: &str) -> Result<Self, VectorStoreError> {
        let state = if file_path.exists() {
            let compressed = fs::read(&file_path)?;
            let raw = zstd::decode_all(compressed.as_slice())
                .map_err(|e| VectorStoreError::Corrupt(e.to_string()))?;
            let state: StoredFile = serde_json::from_slice(&raw)
                .map_err(|e| VectorStoreError::Corrupt(e.to_string()))?;
            if state.model_id != configured_model {
                return Err(VectorStoreError::ModelMismatch {
                    stored: state.model_id,
                    configured: configured_model.to_string(),
                });
            }
            state
        } else {
            StoredFile::empty(configured_model)
        };
        Ok(Self { file_path, state })
    }

    fn persist(&self) -> Result<(), VectorStoreError> {
        let raw = serde_json::to_vec(&self.state).map_err(|e| VectorStoreError::Corrupt(e.to_string()))?;
        let compressed = zstd::encode_all(raw.as_slice(), ZSTD_LEVEL)?;
        let tmp_path = self.file_path.with_extension("tmp");
        fs::write(&tmp_path, &compressed)?;
        fs::rename(&tmp_path, &self.file_path)?;
        debug!(path = ?self.file_path, rows = self.state.rows.len(), "vector store persisted");
        Ok(())
    }
}

impl VectorStore for JsonVectorStore {
    fn upsert_chunks(
        &mut self,
        chunks: Vec<Chunk>,
        vectors: Vec<EmbeddingVector>,
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != vectors.len() {
            return Err(VectorStoreError::LengthMismatch { chunks: chunks.len(), vectors: vectors.len() });
        }
        if chunks.is_empty() {
            return Ok(());
        }
        let touched_paths: std::collections::HashSet<&Path> =
            chunks.iter().map(|c| c.source_path.as_path()).collect();
        self.state.rows.retain(|row| !touched_paths.contains(row.chunk.source_path.as_path()));
        self.state.rows.extend(chunks.into_iter().zip(vectors).map(|(chunk, vector)| StoredRow { chunk, vector }));
        self.persist()
    }

    fn delete_by_path(&mut self, path: &Path) -> Result<(), VectorStoreError> {
        self.state.rows.retain(|row| row.chunk.source_path != path);
        self.state.fingerprints.remove(path);
        self.persist()
    }

    fn record_fingerprint(&mut self, fingerprint: Fingerprint) -> Result<(), VectorStoreError> {
        self.state.fingerprints.insert(fingerprint.path.clone(), fingerprint);
        self.persist()
    }

    fn search(&self, query: &EmbeddingVector, k: usize) -> Vec<ScoredChunk> {
        if query.model_id != self.state.model_id {
            warn!(
                query_model = %query.model_id,
                store_model = %self.state.model_id,
                "search query vector model mismatch, results may be meaningless"
            );
        }
        let mut scored: Vec<ScoredChunk> = self
            .state
            .rows
            .iter()
            .map(|row| ScoredChunk { chunk: row.chunk.clone(), score: row.vector.cosine_similarity(query) })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    fn list_fingerprints(&self) -> HashMap<PathBuf, Fingerprint> {
        self.state.fingerprints.clone()
    }

    fn model_id(&self) -> &str {
        &self.state.model_id
    }
}

#[cfg(test)]
#[path = "json_vector_store_tests.rs"]
mod tests;
