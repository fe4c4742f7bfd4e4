//! Parsers for the MovieLens movie catalog and ratings log.
//!
//! Two layouts are supported:
//! - CSV (`ml-latest-small`): `movieId,title,genres` and
//!   `userId,movieId,rating,timestamp`, each with a header row. Read with the
//!   `csv` crate, so quoted titles may contain commas, `""` escapes and
//!   line breaks.
//! - DAT (`ml-1m`): `movieId::title::genres` and
//!   `userId::movieId::rating::timestamp`, ISO-8859-1 encoded, no header.
//!
//! Rows are returned in file order.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One `movies.csv` row as exported.
#[derive(Debug, Deserialize)]
struct MovieRow {
    #[serde(rename = "movieId")]
    id: MovieId,
    title: String,
    /// Absent or empty genre text is malformed, see [`parse_movies`]
    #[serde(default)]
    genres: Option<String>,
}

/// One `ratings.csv` row as exported.
#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "userId")]
    user_id: UserId,
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f64,
    timestamp: i64,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })
}

/// Deserialize every record of a headered CSV file, paired with the line
/// it starts on.
fn read_csv<T: DeserializeOwned>(path: &Path, file: &str, expected: usize) -> Result<Vec<(usize, T)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        if record.len() > expected {
            return Err(DataLoadError::FieldCountMismatch {
                file: file.to_string(),
                expected,
                found: record.len(),
                line,
            });
        }
        rows.push((line, record.deserialize(Some(&headers))?));
    }
    Ok(rows)
}

/// Helper function to read a file with ISO-8859-1 encoding (Latin-1)
///
/// Every byte maps directly to the Unicode code point of the same value.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();
    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// A `::`-delimited data file being parsed, named for error messages.
struct DatReader<'a> {
    file: &'a str,
}

impl<'a> DatReader<'a> {
    /// Non-empty lines split on `::`, with their 1-based line numbers.
    fn records(&self, path: &Path, expected: usize) -> Result<Vec<(usize, Vec<String>)>> {
        let lines = read_lines_latin1(path)?;
        let mut records = Vec::with_capacity(lines.len());

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let line_trimmed = line.trim();
            if line_trimmed.is_empty() {
                continue;
            }
            let fields: Vec<String> = line_trimmed.split("::").map(|s| s.to_string()).collect();
            if fields.len() > expected {
                return Err(DataLoadError::FieldCountMismatch {
                    file: self.file.to_string(),
                    expected,
                    found: fields.len(),
                    line: line_no,
                });
            }
            records.push((line_no, fields));
        }
        Ok(records)
    }

    fn field<'f>(&self, fields: &'f [String], idx: usize, name: &str, line_no: usize) -> Result<&'f str> {
        fields
            .get(idx)
            .map(|s| s.as_str())
            .ok_or_else(|| self.error(line_no, format!("Missing {}", name)))
    }

    fn number<T>(&self, raw: &str, name: &str, line_no: usize) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        raw.trim()
            .parse()
            .map_err(|e| self.error(line_no, format!("Invalid {}: {}", name, e)))
    }

    fn error(&self, line_no: usize, reason: impl Into<String>) -> DataLoadError {
        DataLoadError::ParseError {
            file: self.file.to_string(),
            line: line_no,
            reason: reason.into(),
        }
    }
}

/// Parse the movie catalog.
///
/// A row without genre text is rejected: genres are the only content
/// signal, so an absent value is malformed input rather than an empty
/// genre list.
pub fn parse_movies(path: &Path, format: DatasetFormat) -> Result<Vec<Movie>> {
    match format {
        DatasetFormat::Csv => parse_movies_csv(path),
        DatasetFormat::Dat => parse_movies_dat(path),
    }
}

/// Parse the ratings log, preserving row order.
pub fn parse_ratings(path: &Path, format: DatasetFormat) -> Result<Vec<Rating>> {
    match format {
        DatasetFormat::Csv => parse_ratings_csv(path),
        DatasetFormat::Dat => parse_ratings_dat(path),
    }
}

fn parse_movies_csv(path: &Path) -> Result<Vec<Movie>> {
    read_csv::<MovieRow>(path, "movies.csv", 3)?
        .into_iter()
        .map(|(line, row)| {
            let genres = row.genres.ok_or_else(|| DataLoadError::ParseError {
                file: "movies.csv".to_string(),
                line,
                reason: "Missing genres".to_string(),
            })?;
            Ok(Movie {
                id: row.id,
                title: row.title,
                genres,
            })
        })
        .collect()
}

fn parse_ratings_csv(path: &Path) -> Result<Vec<Rating>> {
    Ok(read_csv::<RatingRow>(path, "ratings.csv", 4)?
        .into_iter()
        .map(|(_, row)| Rating {
            user_id: row.user_id,
            movie_id: row.movie_id,
            rating: row.rating,
            timestamp: row.timestamp,
        })
        .collect())
}

fn parse_movies_dat(path: &Path) -> Result<Vec<Movie>> {
    let reader = DatReader { file: "movies.dat" };
    let mut movies = Vec::new();

    for (line_no, fields) in reader.records(path, 3)? {
        let movie_id = reader.field(&fields, 0, "movieId", line_no)?;
        let title = reader.field(&fields, 1, "title", line_no)?;
        let genres = reader.field(&fields, 2, "genres", line_no)?;

        movies.push(Movie {
            id: reader.number(movie_id, "movieId", line_no)?,
            title: title.to_string(),
            genres: genres.to_string(),
        });
    }
    Ok(movies)
}

fn parse_ratings_dat(path: &Path) -> Result<Vec<Rating>> {
    let reader = DatReader { file: "ratings.dat" };
    let mut ratings = Vec::new();

    for (line_no, fields) in reader.records(path, 4)? {
        let user_id = reader.field(&fields, 0, "userId", line_no)?;
        let movie_id = reader.field(&fields, 1, "movieId", line_no)?;
        let rating = reader.field(&fields, 2, "rating", line_no)?;
        let timestamp = reader.field(&fields, 3, "timestamp", line_no)?;

        ratings.push(Rating {
            user_id: reader.number(user_id, "userId", line_no)?,
            movie_id: reader.number(movie_id, "movieId", line_no)?,
            rating: reader.number(rating, "rating", line_no)?,
            timestamp: reader.number(timestamp, "timestamp", line_no)?,
        });
    }
    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn write_fixture(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_movies_csv() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "movies.csv",
            b"movieId,title,genres\n1,Toy Story (1995),Adventure|Animation\n2,\"Jumanji, Again (1995)\",Sci-Fi\n",
        );
        let movies = parse_movies(&path, DatasetFormat::Csv).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].genres, "Adventure|Animation");
        assert_eq!(movies[1].title, "Jumanji, Again (1995)");
    }

    #[test]
    fn test_parse_movies_csv_escaped_quote() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "movies.csv",
            b"movieId,title,genres\n7,\"Dr. \"\"Strange\"\" (2000)\",Drama\n",
        );
        let movies = parse_movies(&path, DatasetFormat::Csv).unwrap();
        assert_eq!(movies[0].title, r#"Dr. "Strange" (2000)"#);
    }

    #[test]
    fn test_parse_movies_csv_title_with_line_break() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "movies.csv",
            b"movieId,title,genres\n1,\"Line one\nline two (1999)\",Drama\n2,Heat (1995),Action\n",
        );
        let movies = parse_movies(&path, DatasetFormat::Csv).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Line one\nline two (1999)");
        assert_eq!(movies[0].genres, "Drama");
        assert_eq!(movies[1].id, 2);
        assert_eq!(movies[1].genres, "Action");
    }

    #[test]
    fn test_parse_movies_missing_genres() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "movies.csv", b"movieId,title,genres\n1,Toy Story (1995)\n");
        let err = parse_movies(&path, DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_parse_movies_missing_file() {
        let dir = tempdir().unwrap();
        let err = parse_movies(&dir.path().join("movies.csv"), DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_ratings_csv() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "ratings.csv",
            b"userId,movieId,rating,timestamp\n1,1,4.0,964982703\n1,3,4.5,964981247\n",
        );
        let ratings = parse_ratings(&path, DatasetFormat::Csv).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].movie_id, 3);
        assert_eq!(ratings[1].rating, 4.5);
        assert_eq!(ratings[0].timestamp, 964982703);
    }

    #[test]
    fn test_parse_ratings_bad_value() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "ratings.csv",
            b"userId,movieId,rating,timestamp\n1,1,four,964982703\n",
        );
        let err = parse_ratings(&path, DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataLoadError::CsvError(_)));
    }

    #[test]
    fn test_parse_ratings_too_many_fields() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "ratings.csv",
            b"userId,movieId,rating,timestamp\n1,1,4.0,964982703,x\n",
        );
        let err = parse_ratings(&path, DatasetFormat::Csv).unwrap_err();
        assert!(matches!(err, DataLoadError::FieldCountMismatch { expected: 4, found: 5, line: 2, .. }));
    }

    #[test]
    fn test_parse_ratings_dat() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "ratings.dat", b"1::1193::5::978300760\n\n1::661::3::978302109\n");
        let ratings = parse_ratings(&path, DatasetFormat::Dat).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].movie_id, 1193);
        assert_eq!(ratings[1].rating, 3.0);
    }

    #[test]
    fn test_parse_movies_dat_latin1_title() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "movies.dat", b"1::Caf\xe9 Society (1995)::Drama\n");
        let movies = parse_movies(&path, DatasetFormat::Dat).unwrap();
        assert_eq!(movies[0].title, "Café Society (1995)");
    }

    #[test]
    fn test_parse_movies_dat_missing_genres() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "movies.dat", b"1::Toy Story (1995)::Animation\n2::Heat (1995)\n");
        let err = parse_movies(&path, DatasetFormat::Dat).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 2, .. }));
    }
}
