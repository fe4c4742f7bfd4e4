//! Deterministic train/test partition of the ratings log.
//!
//! The test set is every row whose position is a multiple of the stride
//! (positions 0, 1000, 2000, ... by default). No randomness is involved,
//! so every run evaluates against the same held-out rows.

use crate::error::{ContentError, Result};
use data_loader::Rating;

/// Default spacing between held-out rows.
pub const DEFAULT_HOLDOUT_EVERY: usize = 1000;

/// Training and held-out ratings, each in original relative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    pub train: Vec<Rating>,
    pub test: Vec<Rating>,
}

/// Holds out every `every`-th rating for testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldoutSplit {
    every: usize,
}

impl HoldoutSplit {
    pub fn new(every: usize) -> Result<Self> {
        if every == 0 {
            return Err(ContentError::InvalidStride);
        }
        Ok(Self { every })
    }

    pub fn every(&self) -> usize {
        self.every
    }

    /// Whether the row at `position` belongs to the test set.
    pub fn is_test(&self, position: usize) -> bool {
        position % self.every == 0
    }

    pub fn split(&self, ratings: &[Rating]) -> Split {
        let mut split = Split {
            train: Vec::with_capacity(ratings.len() - ratings.len().div_ceil(self.every)),
            test: Vec::with_capacity(ratings.len().div_ceil(self.every)),
        };
        for (position, rating) in ratings.iter().enumerate() {
            if self.is_test(position) {
                split.test.push(*rating);
            } else {
                split.train.push(*rating);
            }
        }
        split
    }
}

impl Default for HoldoutSplit {
    fn default() -> Self {
        Self {
            every: DEFAULT_HOLDOUT_EVERY,
        }
    }
}

/// Split with the default stride of 1000.
pub fn split(ratings: &[Rating]) -> Split {
    HoldoutSplit::default().split(ratings)
}
