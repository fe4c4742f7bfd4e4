//! Core record types for the MovieLens exports.
//!
//! The loader keeps movies and ratings as plain ordered vectors: the
//! evaluation hold-out is defined by row position, so file order is part
//! of the data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// One row of the movie catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Raw genre text exactly as exported, e.g. `"Adventure|Animation|Children"`
    pub genres: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.into(),
        }
    }
}

/// A single rating from a user for a movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value, 0.5 to 5.0 in half-star steps
    pub rating: f64,
    /// Unix timestamp when rating was made
    pub timestamp: i64,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: f64) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
            timestamp: 0,
        }
    }
}

/// On-disk layout of a MovieLens directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// `ml-latest-small` style: comma-separated with a header row and quoted titles
    Csv,
    /// `ml-1m` style: `::`-separated, ISO-8859-1, no header
    Dat,
}

impl DatasetFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DatasetFormat::Csv => "csv",
            DatasetFormat::Dat => "dat",
        }
    }
}

/// The movie catalog and ratings log, both in original row order.
#[derive(Debug, Default)]
pub struct Dataset {
    pub(crate) movies: Vec<Movie>,
    pub(crate) ratings: Vec<Rating>,
    pub(crate) movie_positions: HashMap<MovieId, usize>,
}

impl Dataset {
    pub fn new(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        let movie_positions = movies
            .iter()
            .enumerate()
            .map(|(pos, movie)| (movie.id, pos))
            .collect();
        Self {
            movies,
            ratings,
            movie_positions,
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}
