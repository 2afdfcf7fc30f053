use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub results: Vec<T>,
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

/// A movie as returned by the list endpoints (`/movie/popular`, `/movie/top_rated`).
///
/// Every field except `poster_path` must be present; a missing field fails
/// the whole response rather than the single entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieListItem {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    /// `yyyy-MM-dd`
    pub release_date: String,
    pub vote_average: f64,
    pub popularity: f64,
}

// ============ Videos ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoList {
    pub id: i64,
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

// ============ Reviews ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewList {
    pub id: i64,
    #[serde(default)]
    pub page: i64,
    pub results: Vec<Review>,
    #[serde(default)]
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
}
