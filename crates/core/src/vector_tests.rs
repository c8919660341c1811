// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn rejects_wrong_dimension() {
    let err = EmbeddingVector::new("m1", vec![1.0, 2.0], 3, "now").unwrap_err();
    assert_eq!(err, VectorError::DimensionMismatch { expected: 3, actual: 2 });
}

#[test]
fn identical_vectors_have_similarity_one() {
    let a = EmbeddingVector::new("m1", vec![1.0, 0.0], 2, "now").unwrap();
    let b = EmbeddingVector::new("m1", vec![1.0, 0.0], 2, "now").unwrap();
    assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-6);
}

#[test]
fn orthogonal_vectors_have_similarity_zero() {
    let a = EmbeddingVector::new("m1", vec![1.0, 0.0], 2, "now").unwrap();
    let b = EmbeddingVector::new("m1", vec![0.0, 1.0], 2, "now").unwrap();
    assert!(a.cosine_similarity(&b).abs() < 1e-6);
}

#[test]
fn zero_vector_has_similarity_zero() {
    let a = EmbeddingVector::new("m1", vec![0.0, 0.0], 2, "now").unwrap();
    let b = EmbeddingVector::new("m1", vec![1.0, 0.0], 2, "now").unwrap();
    assert_eq!(a.cosine_similarity(&b), 0.0);
}
