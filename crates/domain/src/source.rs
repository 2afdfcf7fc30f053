//! Remote sources the services pull from.
//!
//! Implemented against TMDB in the infrastructure layer and by mocks in tests.

use async_trait::async_trait;

use crate::detail::{Review, Video};
use crate::error::FetchError;
use crate::movie::{Movie, Ranking};

/// One page of a ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total_pages: u32,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a 1-indexed page of a ranking.
    ///
    /// Either every movie on the page is valid or the whole page is a
    /// [`FetchError::Parse`].
    async fn fetch_page(&self, ranking: &Ranking, page: u32) -> Result<MoviePage, FetchError>;
}

#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch_videos(&self, movie_id: i64) -> Result<Vec<Video>, FetchError>;

    async fn fetch_reviews(&self, movie_id: i64) -> Result<Vec<Review>, FetchError>;
}
