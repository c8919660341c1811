// SPDX-License-Identifier: MIT

//! Machine-readable error kinds shared by every crate.
//!
//! Recoverable failures are represented as typed errors throughout the
//! workspace; `ErrorKind` is the lowest common denominator they collapse
//! to when crossing the wire. Crate-local error enums implement
//! `From<LocalError> for ErrorKind` (or expose a `kind()` method) rather
//! than stringifying.

use serde::{Deserialize, Serialize};

/// The error kinds distinguished by the core, per the error-handling design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad path, unknown model id, malformed request field.
    InvalidInput,
    /// Duplicate / sub-path / ancestor folder conflict (the validator's errors).
    FolderConflict,
    /// Query issued against a folder that is not `ready` or `watching`.
    FolderNotReady,
    /// Embedding backend cannot currently serve requests.
    BackendUnavailable,
    /// Terminal failure from the model download coordinator.
    ModelDownloadFailed,
    /// Vector store I/O error; always fatal to the owning folder.
    StoreFailure,
    /// Single-file parse error; never fatal to the owning folder.
    ParseError,
    /// Unexpected condition; logged with full detail, generic message to client.
    Internal,
    /// Request or embedding call exceeded its timeout budget.
    Timeout,
    /// Wire message carried an unrecognized `type` tag.
    UnsupportedMessage,
}

impl ErrorKind {
    /// Stable string used in the wire protocol's `error.kind` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::FolderConflict => "folder_conflict",
            ErrorKind::FolderNotReady => "folder_not_ready",
            ErrorKind::BackendUnavailable => "backend_unavailable",
            ErrorKind::ModelDownloadFailed => "model_download_failed",
            ErrorKind::StoreFailure => "store_failure",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::Internal => "internal",
            ErrorKind::Timeout => "timeout",
            ErrorKind::UnsupportedMessage => "unsupported_message",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
