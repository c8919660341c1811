// SPDX-License-Identifier: MIT

//! fmcp-engine: the per-folder indexing pipeline (C7), its supporting
//! scan/parse/chunk/watch machinery (C6), and the folder validator (C2).
//!
//! Every folder gets its own [`pipeline::FolderPipeline`] actor; failures
//! are isolated per folder by construction — one folder's `error` state
//! never touches another's task.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod chunker;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod scan;
pub mod validator;
pub mod watcher;

pub use chunker::{chunk_text, ChunkerConfig};
pub use error::{ParseError, PipelineError, ValidationError};
pub use parse::{extension_of, DocumentParser, PlainTextParser};
pub use pipeline::{FolderPipeline, PipelineConfig, PipelineHandle};
pub use scan::{reconcile, scan_folder};
pub use validator::{validate_folder, ValidationResult};
pub use watcher::{ChangeKind, FileEvent, FileWatcher, NotifyWatcher};
