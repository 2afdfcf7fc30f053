use serde::{Deserialize, Serialize};

/// A video (trailer, teaser, clip) attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub owner_movie_id: i64,
    /// TMDB video id; unique across all movies.
    pub remote_id: String,
    /// Site-specific key, e.g. the YouTube video id.
    pub key: String,
    pub name: String,
    pub site: String,
    pub video_type: String,
}

/// A user review attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub owner_movie_id: i64,
    /// TMDB review id; unique across all movies.
    pub remote_id: String,
    pub author: String,
    pub content: String,
}
