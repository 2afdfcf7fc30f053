//! Movie entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A movie as cached locally.
///
/// Identity is `remote_id` (the TMDB id) within one ordering-mode partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub remote_id: i64,
    pub title: String,
    /// Relative poster path, e.g. `/abc.jpg`.
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: NaiveDate,
    pub vote_average: f64,
    pub popularity: f64,
}

impl Movie {
    /// Release year, for compact listings.
    pub fn year(&self) -> i32 {
        use chrono::Datelike;
        self.release_date.year()
    }
}

/// A movie saved by the user, with the time it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMovie {
    pub movie: Movie,
    pub saved_at: DateTime<Utc>,
}
