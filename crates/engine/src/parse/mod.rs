// SPDX-License-Identifier: MIT

//! Document parsing (§4.6.1): a deliberately minimal, pluggable seam.
//! Format-specific parsers (PDF, DOCX, spreadsheets, …) are out of scope;
//! `PlainTextParser` is the only built-in implementation.

mod plain_text;

pub use plain_text::PlainTextParser;

use crate::error::ParseError;
use std::path::Path;

/// Parses raw file bytes into plain text ready for chunking. A parser that
/// returns an error for a file it claims to support is a per-file
/// `parse_error`, never fatal to the owning pipeline.
pub trait DocumentParser: Send + Sync {
    /// Whether this parser claims the given extension (lower-cased, no dot).
    fn supports(&self, extension: &str) -> bool;

    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<String, ParseError>;
}

/// Extension (lower-cased, without the leading dot) of `path`, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase())
}
