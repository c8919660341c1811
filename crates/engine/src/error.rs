// SPDX-License-Identifier: MIT

//! Engine-local error types, each converging to [`fmcp_core::ErrorKind`] at
//! the wire boundary rather than being stringified ad hoc.

use fmcp_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("path does not exist or is not a directory")]
    NotADirectory,

    #[error("already monitored with model {model}")]
    AlreadyMonitored { model: String },

    #[error("already covered by parent {parent}")]
    CoveredByParent { parent: String },

    #[error("failed to canonicalize path: {0}")]
    Canonicalize(#[from] std::io::Error),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::NotADirectory
            | ValidationError::AlreadyMonitored { .. }
            | ValidationError::CoveredByParent { .. } => ErrorKind::FolderConflict,
            ValidationError::Canonicalize(_) => ErrorKind::InvalidInput,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("file is not valid UTF-8")]
    NotUtf8,

    #[error("I/O error reading {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ParseError
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("embedding backend: {0}")]
    Backend(#[from] fmcp_embed::BackendError),

    #[error("vector store: {0}")]
    Store(#[from] fmcp_store::VectorStoreError),

    #[error("scan failed: {0}")]
    Scan(#[from] std::io::Error),

    #[error("folder is not ready to serve queries")]
    NotReady,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Backend(_) => ErrorKind::BackendUnavailable,
            PipelineError::Store(_) => ErrorKind::StoreFailure,
            PipelineError::Scan(_) => ErrorKind::Internal,
            PipelineError::NotReady => ErrorKind::FolderNotReady,
        }
    }
}
