// SPDX-License-Identifier: MIT

use super::*;

use std::path::PathBuf;

fn path() -> PathBuf {
    PathBuf::from("/a/b.txt")
}

#[test]
fn empty_text_yields_no_chunks() {
    assert!(chunk_text("", &path(), "text", &ChunkerConfig::default()).is_empty());
}

#[test]
fn short_text_yields_one_non_overlapping_chunk() {
    let chunks = chunk_text("hello world", &path(), "text", &ChunkerConfig::default());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "hello world");
    assert!(!chunks[0].overlap);
    assert_eq!(chunks[0].total_chunks, 1);
}

#[test]
fn oversize_text_is_split_with_overlap_flagged_after_the_first_chunk() {
    let config = ChunkerConfig { chunk_size: 50, chunk_overlap: 10 };
    let text = "x".repeat(140);
    let chunks = chunk_text(&text, &path(), "text", &config);
    assert!(chunks.len() > 1);
    assert!(!chunks[0].overlap);
    assert!(chunks[1..].iter().all(|c| c.overlap));
    assert!(chunks.iter().all(|c| c.total_chunks == chunks.len()));
}

#[test]
fn chunk_boundaries_respect_utf8_char_boundaries() {
    let config = ChunkerConfig { chunk_size: 5, chunk_overlap: 1 };
    let text = "héllo wörld";
    let chunks = chunk_text(text, &path(), "text", &config);
    for chunk in &chunks {
        assert!(text.is_char_boundary(chunk.start));
        assert!(text.is_char_boundary(chunk.end));
    }
}
