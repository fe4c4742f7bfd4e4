//! Error types for the prediction engine.

use data_loader::{MovieId, UserId};
use thiserror::Error;

/// Failures the content-based pipeline can report.
///
/// Zero-norm feature vectors are not an error: their similarity to
/// anything is defined as 0.0.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    /// A rating refers to a movie that was never featurized
    #[error("Movie {movie_id} is not in the featurized catalog")]
    UnknownMovie { movie_id: MovieId },

    /// The mean-rating fallback needs at least one training rating
    #[error("User {user_id} has no training ratings to predict from")]
    NoTrainingHistory { user_id: UserId },

    /// Predictions and test ratings must pair up one to one
    #[error("Got {predictions} predictions for {actual} test ratings")]
    LengthMismatch { predictions: usize, actual: usize },

    /// Mean absolute error is undefined over nothing
    #[error("Cannot compute an error over an empty test set")]
    EmptyTestSet,

    /// The hold-out stride must select a proper subset of rows
    #[error("Hold-out stride must be at least 1")]
    InvalidStride,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ContentError>;
