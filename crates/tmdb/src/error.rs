use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON at '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("API error: {status_code} - {message}")]
    Api {
        status_code: u16,
        /// TMDB's own `status_code` from the error body, when present.
        tmdb_code: Option<i64>,
        message: String,
    },
}

impl TmdbError {
    /// TMDB status code for an invalid API key.
    pub const INVALID_API_KEY: i64 = 7;
    /// TMDB status code for a resource that does not exist.
    pub const NOT_FOUND: i64 = 34;
}
