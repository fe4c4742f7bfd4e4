//! Global term index shared by every feature vector.

use crate::tokenizer::TokenizedMovie;
use std::collections::{BTreeSet, HashMap};

/// Distinct tokens of the whole catalog, indexed in alphabetical order.
///
/// Index 0 is the alphabetically first term. Built once before any feature
/// vector, then only read.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collect the distinct tokens of every movie and index them.
    pub fn build(movies: &[TokenizedMovie]) -> Self {
        Self::from_terms(movies.iter().flat_map(|movie| movie.tokens.iter().cloned()))
    }

    /// Index an arbitrary bag of terms; duplicates collapse.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = terms.into_iter().map(Into::into).collect();
        let terms: Vec<String> = sorted.into_iter().collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self { terms, index }
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get(idx).map(|s| s.as_str())
    }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `(term, index)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.terms.iter().enumerate().map(|(idx, term)| (term.as_str(), idx))
    }
}
