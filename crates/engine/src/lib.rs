//! Content-based movie rating prediction from genre tags.
//!
//! This crate provides:
//! - Tokenizer and Vocabulary for genre text
//! - FeatureBuilder for per-movie TF-IDF vectors
//! - SparseVector with cosine similarity
//! - HoldoutSplit for a deterministic train/test partition
//! - Predictor for similarity-weighted rating prediction
//! - Mean absolute error and an end-to-end hold-out runner
//!
//! ## Architecture
//! The pipeline processes a movie catalog and ratings log in stages:
//! 1. Genre text is tokenized and a sorted vocabulary is built
//! 2. Each movie gets a TF-IDF vector over that vocabulary
//! 3. Ratings are split into training and held-out rows
//! 4. Held-out ratings are predicted from each user's training ratings
//! 5. Predictions are scored against the held-out values
//!
//! ## Example Usage
//! ```ignore
//! use engine::{build_features, mean_absolute_error, predict, split, tokenize};
//!
//! let (movies, vocabulary) = build_features(tokenize(dataset.movies()));
//! let split = split(dataset.ratings());
//! let predictions = predict(&movies, &split.train, &split.test)?;
//! let error = mean_absolute_error(&predictions, &split.test)?;
//! ```

pub mod error;
pub mod tokenizer;
pub mod vocabulary;
pub mod sparse;
pub mod features;
pub mod split;
pub mod predict;
pub mod evaluate;
pub mod holdout;

// Re-export main types
pub use error::{ContentError, Result};
pub use tokenizer::{tokenize, tokenize_genres, TokenizedMovie};
pub use vocabulary::Vocabulary;
pub use sparse::{similarity, SparseVector};
pub use features::{build_features, FeatureBuilder, FeaturedMovie};
pub use split::{split, HoldoutSplit, Split, DEFAULT_HOLDOUT_EVERY};
pub use predict::{predict, Prediction, PredictionSource, Predictor};
pub use evaluate::mean_absolute_error;
pub use holdout::{run_holdout, Catalog, EvaluationReport};
