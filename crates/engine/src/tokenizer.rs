//! Genre text tokenization.

use data_loader::{Movie, MovieId};
use regex::Regex;
use std::sync::LazyLock;

/// Maximal runs of word characters and hyphens.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w\-]+").expect("valid regex"));

/// A catalog movie together with its genre tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedMovie {
    pub id: MovieId,
    pub genres: String,
    /// Tokens in order of appearance; duplicates are kept since term
    /// frequency is counted from this sequence.
    pub tokens: Vec<String>,
}

/// Split genre text into lowercase tokens.
///
/// `"Horror|Romance"` becomes `["horror", "romance"]` and `"Sci-Fi"`
/// stays one token, `["sci-fi"]`. Empty or separator-only text yields no
/// tokens.
pub fn tokenize_genres(genres: &str) -> Vec<String> {
    let lowered = genres.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Attach genre tokens to every movie, preserving catalog order.
pub fn tokenize(movies: &[Movie]) -> Vec<TokenizedMovie> {
    movies
        .iter()
        .map(|movie| TokenizedMovie {
            id: movie.id,
            genres: movie.genres.clone(),
            tokens: tokenize_genres(&movie.genres),
        })
        .collect()
}
