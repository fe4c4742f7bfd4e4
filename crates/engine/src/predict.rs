//! Similarity-weighted rating prediction.
//!
//! ## Algorithm
//! To predict user `u`'s rating of movie `i`:
//! 1. Take every training rating `(m, r)` of `u`
//! 2. Weight each by `sim(m, i)`, the cosine similarity of their features
//! 3. `S = Σ sim * r` and `W = Σ sim`, both over all of `u`'s ratings
//! 4. If `S > 0` predict `S / W`, otherwise predict `u`'s mean training rating
//!
//! The branch tests the sign of the aggregate `S`. Ratings with zero
//! similarity stay in both sums; they are never filtered out one by one.

use crate::error::{ContentError, Result};
use crate::features::FeaturedMovie;
use crate::sparse::{similarity, SparseVector};
use data_loader::{MovieId, Rating, UserId};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Which rule produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// Similarity-weighted average of the user's ratings
    Weighted,
    /// No positive aggregate signal; the user's mean rating
    UserMean,
}

/// A predicted rating for one (user, movie) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub value: f64,
    pub source: PredictionSource,
}

/// Predicts ratings from a featurized catalog and a training log.
///
/// Built once per training set; lookups of features and of a user's history
/// are hash lookups, and predictions for different rows are independent.
pub struct Predictor<'a> {
    features: HashMap<MovieId, &'a SparseVector>,
    /// Each user's training ratings, in training-log order
    history: HashMap<UserId, Vec<(MovieId, f64)>>,
}

impl<'a> Predictor<'a> {
    /// If the catalog lists a movie id more than once, the first entry is used.
    pub fn new(movies: &'a [FeaturedMovie], train: &[Rating]) -> Self {
        let mut features: HashMap<MovieId, &'a SparseVector> = HashMap::with_capacity(movies.len());
        for movie in movies {
            features.entry(movie.id).or_insert(&movie.features);
        }

        let mut history: HashMap<UserId, Vec<(MovieId, f64)>> = HashMap::new();
        for rating in train {
            history
                .entry(rating.user_id)
                .or_default()
                .push((rating.movie_id, rating.rating));
        }

        Self { features, history }
    }

    /// A user's training ratings; empty for unknown users.
    pub fn history(&self, user_id: UserId) -> &[(MovieId, f64)] {
        self.history
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn features(&self, movie_id: MovieId) -> Result<&'a SparseVector> {
        self.features
            .get(&movie_id)
            .copied()
            .ok_or(ContentError::UnknownMovie { movie_id })
    }

    /// Predict how `user_id` would rate `movie_id`.
    pub fn predict_one(&self, user_id: UserId, movie_id: MovieId) -> Result<Prediction> {
        let history = self.history(user_id);
        if history.is_empty() {
            return Err(ContentError::NoTrainingHistory { user_id });
        }
        let target = self.features(movie_id)?;

        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        for &(rated_movie, rating) in history {
            let sim = similarity(self.features(rated_movie)?, target);
            weighted_sum += sim * rating;
            weight_sum += sim;
        }

        let (value, source) = if weighted_sum > 0.0 {
            (weighted_sum / weight_sum, PredictionSource::Weighted)
        } else {
            let total: f64 = history.iter().map(|&(_, rating)| rating).sum();
            (total / history.len() as f64, PredictionSource::UserMean)
        };

        Ok(Prediction {
            user_id,
            movie_id,
            value,
            source,
        })
    }

    /// Predict every test row in parallel, keeping test order.
    #[instrument(skip_all, fields(rows = test.len()))]
    pub fn predict_all(&self, test: &[Rating]) -> Result<Vec<Prediction>> {
        let predictions: Vec<Prediction> = test
            .par_iter()
            .map(|rating| self.predict_one(rating.user_id, rating.movie_id))
            .collect::<Result<_>>()?;

        let fallbacks = predictions
            .iter()
            .filter(|p| p.source == PredictionSource::UserMean)
            .count();
        debug!("{} predictions, {} from the user-mean fallback", predictions.len(), fallbacks);

        Ok(predictions)
    }
}

/// Predict a rating for each row of `test` from the ratings in `train`.
///
/// Every user in `test` must have at least one rating in `train`.
pub fn predict(movies: &[FeaturedMovie], train: &[Rating], test: &[Rating]) -> Result<Vec<f64>> {
    let predictor = Predictor::new(movies, train);
    Ok(predictor
        .predict_all(test)?
        .into_iter()
        .map(|p| p.value)
        .collect())
}
