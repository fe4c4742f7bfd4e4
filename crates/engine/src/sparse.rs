//! Sparse feature vectors and cosine similarity.

use std::collections::BTreeMap;

/// A vector over the vocabulary storing only its non-zero dimensions.
///
/// Entries are kept ordered by index so that sums over them are evaluated
/// in the same order on every run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    dim: usize,
    weights: BTreeMap<usize, f64>,
}

impl SparseVector {
    /// An all-zero vector of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            weights: BTreeMap::new(),
        }
    }

    /// Build a vector from `(index, weight)` pairs.
    pub fn from_entries(dim: usize, entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut vector = Self::new(dim);
        for (idx, weight) in entries {
            vector.insert(idx, weight);
        }
        vector
    }

    /// Set the weight of one dimension.
    pub fn insert(&mut self, idx: usize, weight: f64) {
        debug_assert!(idx < self.dim, "index {} out of dimension {}", idx, self.dim);
        self.weights.insert(idx, weight);
    }

    /// Weight at `idx`; absent dimensions are zero.
    pub fn get(&self, idx: usize) -> f64 {
        self.weights.get(&idx).copied().unwrap_or(0.0)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Stored indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.weights.keys().copied()
    }

    /// Stored `(index, weight)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.weights.iter().map(|(&idx, &weight)| (idx, weight))
    }

    /// Dot product; only indices stored in both vectors contribute.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller
            .weights
            .iter()
            .filter_map(|(idx, weight)| larger.weights.get(idx).map(|w| weight * w))
            .sum()
    }

    /// Euclidean norm of the stored weights.
    pub fn l2_norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Cosine similarity, `dot(a, b) / (|a| * |b|)`.
    ///
    /// A zero-norm side (no tokens, or only terms every movie contains)
    /// has no direction, so its similarity to anything is 0.0.
    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        debug_assert_eq!(self.dim, other.dim, "vectors over different vocabularies");
        let norm_self = self.l2_norm();
        let norm_other = other.l2_norm();

        if norm_self == 0.0 || norm_other == 0.0 {
            0.0
        } else {
            self.dot(other) / (norm_self * norm_other)
        }
    }
}

/// Cosine similarity between two feature vectors.
pub fn similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    a.cosine_similarity(b)
}
