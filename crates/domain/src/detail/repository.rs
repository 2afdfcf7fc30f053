use async_trait::async_trait;

use super::{Review, Video};
use crate::error::DomainResult;

/// Item-scoped storage for videos and reviews.
///
/// Both replace operations leave exactly the given set stored for the movie.
#[async_trait]
pub trait DetailStore: Send + Sync {
    async fn replace_videos(&self, movie_id: i64, videos: &[Video]) -> DomainResult<u64>;

    async fn replace_reviews(&self, movie_id: i64, reviews: &[Review]) -> DomainResult<u64>;

    async fn videos(&self, movie_id: i64) -> DomainResult<Vec<Video>>;

    async fn reviews(&self, movie_id: i64) -> DomainResult<Vec<Review>>;
}
