// SPDX-License-Identifier: MIT

use super::*;

fn make(content: &str, start: usize, end: usize, ordinal: usize, total: usize) -> Result<Chunk, ChunkError> {
    Chunk::new(content, start, end, 3, ordinal, PathBuf::from("/a/b.txt"), "text", total, false)
}

#[test]
fn rejects_empty_content() {
    assert_eq!(make("", 0, 1, 0, 1).unwrap_err(), ChunkError::EmptyContent);
}

#[test]
fn rejects_non_positive_range() {
    assert_eq!(make("x", 5, 5, 0, 1).unwrap_err(), ChunkError::InvalidRange { start: 5, end: 5 });
    assert_eq!(make("x", 5, 3, 0, 1).unwrap_err(), ChunkError::InvalidRange { start: 5, end: 3 });
}

#[test]
fn rejects_ordinal_at_or_past_total() {
    assert_eq!(
        make("x", 0, 1, 1, 1).unwrap_err(),
        ChunkError::OrdinalOutOfRange { ordinal: 1, total: 1 }
    );
}

#[test]
fn accepts_valid_chunk() {
    let chunk = make("hello world", 0, 11, 0, 2).expect("valid");
    assert_eq!(chunk.content, "hello world");
    assert_eq!(chunk.total_chunks, 2);
}
