//! Loading a MovieLens directory into a [`Dataset`].
//!
//! The directory layout is detected from the files present; the catalog and
//! the ratings log are parsed in parallel and then cross-checked.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Lowest and highest rating values MovieLens exports contain.
const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.5..=5.0;

impl DatasetFormat {
    /// Work out which layout `data_dir` uses, preferring CSV.
    pub fn detect(data_dir: &Path) -> Result<Self> {
        [DatasetFormat::Csv, DatasetFormat::Dat]
            .into_iter()
            .find(|format| {
                let ext = format.extension();
                data_dir.join(format!("movies.{}", ext)).exists()
                    && data_dir.join(format!("ratings.{}", ext)).exists()
            })
            .ok_or_else(|| DataLoadError::DatasetNotFound {
                dir: data_dir.display().to_string(),
            })
    }
}

impl Dataset {
    /// Load the movie catalog and ratings log from a MovieLens directory.
    ///
    /// Steps:
    /// 1. Detect the layout (CSV or DAT)
    /// 2. Parse movies and ratings in parallel
    /// 3. Validate that every rating points at a catalog movie and is in range
    #[instrument]
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let format = DatasetFormat::detect(data_dir)?;
        debug!("Detected {:?} layout", format);

        let ext = format.extension();
        let movies_path = data_dir.join(format!("movies.{}", ext));
        let ratings_path = data_dir.join(format!("ratings.{}", ext));

        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path, format),
            || parser::parse_ratings(&ratings_path, format),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!("Loaded {} movies, {} ratings", movies.len(), ratings.len());

        let dataset = Dataset::new(movies, ratings);
        dataset.validate()?;
        Ok(dataset)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Movie ids are unique
    /// - All rating.movie_id references exist in movies
    /// - Ratings are in the valid range (0.5 - 5.0)
    pub fn validate(&self) -> Result<()> {
        if self.movie_positions.len() != self.movies.len() {
            let mut seen = std::collections::HashSet::new();
            if let Some(dup) = self.movies.iter().find(|m| !seen.insert(m.id)) {
                return Err(DataLoadError::InvalidValue {
                    field: "movieId".to_string(),
                    value: format!("duplicate id {}", dup.id),
                });
            }
        }

        for rating in &self.ratings {
            if !self.movie_positions.contains_key(&rating.movie_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    id: rating.movie_id,
                });
            }
            if !RATING_RANGE.contains(&rating.rating) {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
        }
        Ok(())
    }
}
