// SPDX-License-Identifier: MIT

//! Splits parsed document text into overlapping [`Chunk`]s ready for
//! embedding (§4.6 step 3). Oversize files are split; token count is
//! approximated by whitespace-separated word count, which is adequate for
//! this daemon's batching and progress reporting and keeps the dependency
//! stack free of a tokenizer crate the teacher never needed.

use fmcp_core::Chunk;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 200 }
    }
}

/// Empty input yields an empty `Vec` — the caller treats that as a
/// per-file warning, not an error (§4.6 step 3).
pub fn chunk_text(text: &str, source_path: &Path, source_type: &str, config: &ChunkerConfig) -> Vec<Chunk> {
    if text.is_empty() {
        return Vec::new();
    }
    let len = text.len();
    let step = config.chunk_size.saturating_sub(config.chunk_overlap).max(1);

    let mut starts = Vec::new();
    let mut start = 0;
    loop {
        starts.push(start);
        if start + config.chunk_size >= len {
            break;
        }
        start += step;
    }
    let total = starts.len();

    starts
        .into_iter()
        .enumerate()
        .filter_map(|(ordinal, raw_start)| {
            let start = floor_char_boundary(text, raw_start);
            let end = ceil_char_boundary(text, (start + config.chunk_size).min(len));
            if end <= start {
                return None;
            }
            let content = &text[start..end];
            let token_count = content.split_whitespace().count();
            let overlap = ordinal > 0 && config.chunk_overlap > 0;
            Chunk::new(content, start, end, token_count, ordinal, source_path.to_path_buf(), source_type, total, overlap).ok()
        })
        .collect()
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
#[path = "chunker_tests.rs"]
mod tests;
