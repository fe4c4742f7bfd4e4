//! # Data Loader Crate
//!
//! Reads a MovieLens export into ordered movie and rating records.
//!
//! ## Main Components
//!
//! - **types**: Record types (Movie, Rating, Dataset)
//! - **parser**: Parse `.csv` / `.dat` files into Rust structs
//! - **index**: Layout detection, loading and validation
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_dir(Path::new("ml-latest-small"))?;
//! let (movies, ratings) = dataset.counts();
//! println!("{} movies, {} ratings", movies, ratings);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use types::{Dataset, DatasetFormat, Movie, MovieId, Rating, UserId};
