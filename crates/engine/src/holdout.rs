//! End-to-end hold-out evaluation.
//!
//! Runs the whole content-based pipeline over a catalog and ratings log:
//! tokenize, featurize, split, predict, and score.

use crate::error::Result;
use crate::evaluate::mean_absolute_error;
use crate::features::{FeatureBuilder, FeaturedMovie};
use crate::predict::{Prediction, PredictionSource, Predictor};
use crate::split::HoldoutSplit;
use crate::tokenizer::tokenize;
use crate::vocabulary::Vocabulary;
use data_loader::{Movie, Rating};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument};

/// How many leading vocabulary entries a report carries.
pub const VOCABULARY_PREVIEW: usize = 10;

/// Outcome of one hold-out evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub movie_count: usize,
    pub vocabulary_size: usize,
    /// The alphabetically first terms with their indices
    pub vocabulary_preview: Vec<(String, usize)>,
    pub holdout_every: usize,
    pub train_count: usize,
    pub test_count: usize,
    /// Predictions that fell back to the user's mean rating
    pub fallback_count: usize,
    pub mean_absolute_error: f64,
    /// One per test rating, in test order
    pub predictions: Vec<Prediction>,
}

/// Featurized catalog plus its vocabulary.
pub struct Catalog {
    pub movies: Vec<FeaturedMovie>,
    pub vocabulary: Vocabulary,
}

impl Catalog {
    /// Tokenize and featurize a raw movie catalog.
    pub fn build(movies: &[Movie]) -> Self {
        let tokenized = tokenize(movies);
        let (movies, vocabulary) = FeatureBuilder::new(&tokenized).build(tokenized);
        Self { movies, vocabulary }
    }
}

/// Evaluate content-based predictions on a deterministic hold-out.
#[instrument(skip_all, fields(movies = movies.len(), ratings = ratings.len()))]
pub fn run_holdout(movies: &[Movie], ratings: &[Rating], splitter: HoldoutSplit) -> Result<EvaluationReport> {
    let start = Instant::now();
    let catalog = Catalog::build(movies);
    info!(
        "Featurized {} movies over {} terms in {:?}",
        catalog.movies.len(),
        catalog.vocabulary.len(),
        start.elapsed()
    );

    let split = splitter.split(ratings);
    info!("{} training ratings; {} testing ratings", split.train.len(), split.test.len());

    let start = Instant::now();
    let predictor = Predictor::new(&catalog.movies, &split.train);
    let predictions = predictor.predict_all(&split.test)?;
    info!("Predicted {} ratings in {:?}", predictions.len(), start.elapsed());

    let values: Vec<f64> = predictions.iter().map(|p| p.value).collect();
    let error = mean_absolute_error(&values, &split.test)?;

    Ok(EvaluationReport {
        movie_count: catalog.movies.len(),
        vocabulary_size: catalog.vocabulary.len(),
        vocabulary_preview: catalog
            .vocabulary
            .iter()
            .take(VOCABULARY_PREVIEW)
            .map(|(term, idx)| (term.to_string(), idx))
            .collect(),
        holdout_every: splitter.every(),
        train_count: split.train.len(),
        test_count: split.test.len(),
        fallback_count: predictions
            .iter()
            .filter(|p| p.source == PredictionSource::UserMean)
            .count(),
        mean_absolute_error: error,
        predictions,
    })
}
