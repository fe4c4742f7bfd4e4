//! Prediction error metrics.

use crate::error::{ContentError, Result};
use data_loader::Rating;

/// Mean absolute difference between predictions and the actual test ratings.
///
/// `predictions[i]` is compared against `test[i].rating`.
pub fn mean_absolute_error(predictions: &[f64], test: &[Rating]) -> Result<f64> {
    if predictions.len() != test.len() {
        return Err(ContentError::LengthMismatch {
            predictions: predictions.len(),
            actual: test.len(),
        });
    }
    if test.is_empty() {
        return Err(ContentError::EmptyTestSet);
    }

    let total: f64 = predictions
        .iter()
        .zip(test)
        .map(|(predicted, actual)| (predicted - actual.rating).abs())
        .sum();
    Ok(total / test.len() as f64)
}
