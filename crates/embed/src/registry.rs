// SPDX-License-Identifier: MIT

//! The small static table of known model ids (§3.1). Not externally
//! configurable in this spec; adding a model is a one-line change to this
//! slice, mirroring how the supervisor's runtime router enumerates its fixed
//! set of variants.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEntry {
    pub id: &'static str,
    /// "sidecar" or "remote" — which `EmbeddingBackend` variant serves it.
    pub origin: &'static str,
    pub dimension: usize,
}

pub const MODEL_REGISTRY: &[ModelEntry] = &[
    ModelEntry { id: "all-MiniLM-L6-v2", origin: "sidecar", dimension: 384 },
    ModelEntry { id: "all-mpnet-base-v2", origin: "sidecar", dimension: 768 },
    ModelEntry { id: "bge-small-en-v1.5", origin: "sidecar", dimension: 384 },
    ModelEntry { id: "nomic-embed-text", origin: "remote", dimension: 768 },
    ModelEntry { id: "mxbai-embed-large", origin: "remote", dimension: 1024 },
];

pub fn model_info(id: &str) -> Option<&'static ModelEntry> {
    MODEL_REGISTRY.iter().find(|entry| entry.id == id)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
