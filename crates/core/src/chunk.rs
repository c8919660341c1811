// SPDX-License-Identifier: MIT

//! The unit of text that gets embedded, persisted, and returned from search.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk content must be non-empty")]
    EmptyContent,
    #[error("chunk byte range is invalid: start={start} end={end}")]
    InvalidRange { start: usize, end: usize },
    #[error("chunk ordinal {ordinal} must be less than total {total}")]
    OrdinalOutOfRange { ordinal: usize, total: usize },
}

/// A contiguous span of a parsed document, ready for embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub start: usize,
    pub end: usize,
    pub token_count: usize,
    /// Position of this chunk within its parent document (0-based).
    pub ordinal: usize,
    pub source_path: PathBuf,
    pub source_type: String,
    /// Total number of chunks produced from the parent document.
    pub total_chunks: usize,
    /// Whether this chunk overlaps content from its neighbor.
    pub overlap: bool,
}

impl Chunk {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        content: impl Into<String>,
        start: usize,
        end: usize,
        token_count: usize,
        ordinal: usize,
        source_path: PathBuf,
        source_type: impl Into<String>,
        total_chunks: usize,
        overlap: bool,
    ) -> Result<Self, ChunkError> {
        let content = content.into();
        if content.is_empty() {
            return Err(ChunkError::EmptyContent);
        }
        if end <= start {
            return Err(ChunkError::InvalidRange { start, end });
        }
        if ordinal >= total_chunks {
            return Err(ChunkError::OrdinalOutOfRange { ordinal, total: total_chunks });
        }
        Ok(Self {
            content,
            start,
            end,
            token_count,
            ordinal,
            source_path,
            source_type: source_type.into(),
            total_chunks,
            overlap,
        })
    }
}

#[cfg(test)]
#[path = "chunk_tests.rs"]
mod tests;
