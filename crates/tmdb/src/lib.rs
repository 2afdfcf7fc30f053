mod client;
mod error;
mod movie;
pub mod image;
pub mod models;

pub use client::{parse_body, ApiKey, TmdbClient};
pub use error::TmdbError;
pub use models::{MovieListItem, PaginatedResponse, Review, ReviewList, Video, VideoList};

pub type Result<T> = std::result::Result<T, TmdbError>;
