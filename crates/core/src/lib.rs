// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fmcp-core: shared data model for the folder-indexing daemon.
//!
//! Every other crate in the workspace depends on this one for the types
//! that cross task and process boundaries: the Folder MCP Data Model
//! (FMDM), chunks, fingerprints, embedding vectors, and the machine
//! readable error kinds used on the wire.

pub mod macros;

pub mod chunk;
pub mod clock;
pub mod error;
pub mod fingerprint;
pub mod fmdm;
pub mod folder;
pub mod id;
pub mod model_download;
pub mod vector;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use chunk::Chunk;
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::ErrorKind;
pub use fingerprint::Fingerprint;
pub use fmdm::{DaemonInfo, Fmdm, ModelInfo};
pub use folder::{Folder, FolderStatus};
pub use id::short;
pub use model_download::{DownloadStatus, ModelDownload};
pub use vector::EmbeddingVector;
