// SPDX-License-Identifier: MIT

//! The per-folder vector store contract (C5).

use fmcp_core::{Chunk, EmbeddingVector, Fingerprint};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("vector store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("vector store is corrupt: {0}")]
    Corrupt(String),

    #[error(
        "store model id '{stored}' does not match folder's configured model '{configured}'"
    )]
    ModelMismatch { stored: String, configured: String },

    #[error("chunks and vectors must be the same length: {chunks} vs {vectors}")]
    LengthMismatch { chunks: usize, vectors: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Persists chunks + vectors for one folder and answers nearest-neighbour
/// queries. Implementations must be atomic per call to `upsert_chunks` and
/// `delete_by_path` — either every row lands or none does.
pub trait VectorStore: Send + Sync {
    fn upsert_chunks(
        &mut self,
        chunks: Vec<Chunk>,
        vectors: Vec<EmbeddingVector>,
    ) -> Result<(), VectorStoreError>;

    fn delete_by_path(&mut self, path: &Path) -> Result<(), VectorStoreError>;

    /// Records (or replaces) the fingerprint the pipeline computed for a
    /// source file, independent of how many chunks it produced — an empty
    /// parse still needs a fingerprint so it isn't rescanned every pass.
    fn record_fingerprint(&mut self, fingerprint: Fingerprint) -> Result<(), VectorStoreError>;

    fn search(&self, query: &EmbeddingVector, k: usize) -> Vec<ScoredChunk>;

    /// Fast enumeration used for startup reconciliation (§4.6 step 2).
    fn list_fingerprints(&self) -> HashMap<PathBuf, Fingerprint>;

    fn model_id(&self) -> &str;
}
