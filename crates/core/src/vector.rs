// SPDX-License-Identifier: MIT

//! Fixed-length embedding vectors tied to a specific model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VectorError {
    #[error("embedding vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector {
    pub model_id: String,
    pub values: Vec<f32>,
    pub created_at: String,
}

impl EmbeddingVector {
    pub fn new(
        model_id: impl Into<String>,
        values: Vec<f32>,
        dimension: usize,
        created_at: impl Into<String>,
    ) -> Result<Self, VectorError> {
        if values.len() != dimension {
            return Err(VectorError::DimensionMismatch { expected: dimension, actual: values.len() });
        }
        Ok(Self { model_id: model_id.into(), values, created_at: created_at.into() })
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Cosine similarity against another vector of the same dimension.
    /// Returns 0.0 if either vector has zero magnitude or dimensions differ.
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> f32 {
        if self.values.len() != other.values.len() {
            return 0.0;
        }
        let dot: f32 = self.values.iter().zip(other.values.iter()).map(|(a, b)| a * b).sum();
        let mag_a = self.values.iter().map(|v| v * v).sum::<f32>().sqrt();
        let mag_b = other.values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if mag_a == 0.0 || mag_b == 0.0 {
            return 0.0;
        }
        dot / (mag_a * mag_b)
    }
}

#[cfg(test)]
#[path = "vector_tests.rs"]
mod tests;
