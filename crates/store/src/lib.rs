// SPDX-License-Identifier: MIT

//! fmcp-store: the FMDM's single owner task, the persisted folder-list
//! config, and the per-folder vector store contract + reference
//! implementation.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod fmdm_store;
pub mod json_vector_store;
pub mod vector_store;

pub use config::{ConfigError, FolderConfig, PersistedConfig};
pub use fmdm_store::{FmdmCommand, FmdmHandle, FmdmStore};
pub use json_vector_store::JsonVectorStore;
pub use vector_store::{ScoredChunk, VectorStore, VectorStoreError};
