// SPDX-License-Identifier: MIT

//! fmcp-embed: the embedding backend (C3) and model download coordinator
//! (C4).
//!
//! `SidecarBackend` and `RemoteBackend` both implement `EmbeddingBackend`;
//! callers hold them as `Arc<dyn EmbeddingBackend>` rather than matching on
//! a variant, so a folder pipeline doesn't need to know which kind of
//! backend it was handed.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod backend;
pub mod download;
pub mod queue;
pub mod registry;
pub mod remote;
pub mod sidecar;

pub use backend::{BackendError, BackendStats, EmbeddingBackend, Priority};
pub use download::{DownloadOutcome, ModelDownloadCoordinator};
pub use registry::{model_info, ModelEntry, MODEL_REGISTRY};
pub use remote::{RemoteBackend, RemoteConfig};
pub use sidecar::{SidecarBackend, SidecarConfig};
