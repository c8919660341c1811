// SPDX-License-Identifier: MIT

//! UTF-8 text/source/markdown files, covered by a fixed extension allow-list.

use super::DocumentParser;
use crate::error::ParseError;
use std::path::Path;

const EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rs", "py", "js", "ts", "tsx", "jsx", "go", "java", "c", "h", "cpp",
    "hpp", "rb", "json", "yaml", "yml", "toml", "html", "css", "sh",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextParser;

impl DocumentParser for PlainTextParser {
    fn supports(&self, extension: &str) -> bool {
        EXTENSIONS.contains(&extension)
    }

    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<String, ParseError> {
        std::str::from_utf8(bytes).map(str::to_string).map_err(|_| {
            tracing::warn!(?path, "file is not valid UTF-8, skipping");
            ParseError::NotUtf8
        })
    }
}

#[cfg(test)]
#[path = "plain_text_tests.rs"]
mod tests;
