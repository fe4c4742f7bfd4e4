//! TF-IDF feature construction over movie genre tokens.
//!
//! For a term `t` of movie `d` in a catalog of `N` movies:
//!
//! ```text
//! tfidf(t, d) = tf(t, d) / max_k tf(k, d) * log10(N / df(t))
//! ```
//!
//! `df(t)` counts the movies whose lowercased genre text contains `t` as a
//! substring. This is deliberately not token membership: `"fi"` is present
//! in a movie tagged `"Sci-Fi"`.

use crate::sparse::SparseVector;
use crate::tokenizer::TokenizedMovie;
use crate::vocabulary::Vocabulary;
use data_loader::MovieId;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// A movie with its tokens and TF-IDF feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedMovie {
    pub id: MovieId,
    pub genres: String,
    pub tokens: Vec<String>,
    pub features: SparseVector,
}

/// Catalog-wide statistics every feature vector depends on.
///
/// Holds the vocabulary and the document-frequency table, both finalized
/// before any movie is featurized. Per-movie work only reads from it, so
/// movies are featurized in parallel.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    vocabulary: Vocabulary,
    /// Indexed like the vocabulary
    document_frequency: Vec<usize>,
    movie_count: usize,
}

impl FeatureBuilder {
    /// Compute the vocabulary and document frequencies of a catalog.
    #[instrument(skip_all, fields(movies = movies.len()))]
    pub fn new(movies: &[TokenizedMovie]) -> Self {
        let vocabulary = Vocabulary::build(movies);

        let lowered: Vec<String> = movies
            .par_iter()
            .map(|movie| movie.genres.to_lowercase())
            .collect();

        let document_frequency: Vec<usize> = vocabulary
            .terms()
            .par_iter()
            .map(|term| lowered.iter().filter(|genres| genres.contains(term.as_str())).count())
            .collect();

        debug!("Vocabulary of {} terms over {} movies", vocabulary.len(), movies.len());

        Self {
            vocabulary,
            document_frequency,
            movie_count: movies.len(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn movie_count(&self) -> usize {
        self.movie_count
    }

    /// Number of movies whose genre text contains `term`.
    pub fn document_frequency(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .get(term)
            .map(|idx| self.document_frequency[idx])
    }

    /// `log10(N / df(term))`
    pub fn inverse_document_frequency(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|idx| self.idf_at(idx))
    }

    fn idf_at(&self, idx: usize) -> f64 {
        let df = self.document_frequency[idx];
        // Every term comes from some movie's own genre text.
        debug_assert!(df > 0, "term {:?} has zero document frequency", self.vocabulary.term(idx));
        (self.movie_count as f64 / df as f64).log10()
    }

    /// TF-IDF vector of one movie.
    ///
    /// Only the movie's distinct tokens get an entry. Tokens outside the
    /// vocabulary (a movie that was not part of the catalog) are skipped.
    pub fn featurize(&self, movie: &TokenizedMovie) -> SparseVector {
        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        for token in &movie.tokens {
            *term_counts.entry(token.as_str()).or_insert(0) += 1;
        }
        let max_tf = term_counts.values().copied().max().unwrap_or(0);

        let entries = term_counts.iter().filter_map(|(term, &tf)| {
            let idx = self.vocabulary.get(term)?;
            let weight = tf as f64 / max_tf as f64 * self.idf_at(idx);
            Some((idx, weight))
        });

        SparseVector::from_entries(self.vocabulary.len(), entries)
    }

    /// Featurize every movie, keeping catalog order, and hand back the vocabulary.
    #[instrument(skip_all, fields(movies = movies.len()))]
    pub fn build(self, movies: Vec<TokenizedMovie>) -> (Vec<FeaturedMovie>, Vocabulary) {
        let featured = movies
            .into_par_iter()
            .map(|movie| {
                let features = self.featurize(&movie);
                FeaturedMovie {
                    id: movie.id,
                    genres: movie.genres,
                    tokens: movie.tokens,
                    features,
                }
            })
            .collect();
        (featured, self.vocabulary)
    }
}

/// Build TF-IDF feature vectors for a whole catalog.
///
/// The vocabulary and document frequencies are computed over the entire
/// input before any vector is built.
pub fn build_features(movies: Vec<TokenizedMovie>) -> (Vec<FeaturedMovie>, Vocabulary) {
    FeatureBuilder::new(&movies).build(movies)
}
