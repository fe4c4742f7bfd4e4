//! Error types for the data-loader crate.
//!
//! Every failure carries enough context (file, line, field) to point the
//! user at the offending row of the MovieLens export.

use thiserror::Error;

/// Errors that can occur while loading and parsing a MovieLens directory
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Neither the CSV nor the `::`-delimited layout was found
    #[error("No MovieLens dataset found in {dir} (expected movies.csv/ratings.csv or movies.dat/ratings.dat)")]
    DatasetNotFound { dir: String },

    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV record (bad quoting, wrong field type, ...)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} at line {line} in {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
