//! Domain layer for popular-movies.
//!
//! This crate contains the domain model of the movie catalog client. It is
//! independent of the database, the HTTP client and the terminal front-end.
//!
//! # Module Structure
//!
//! - **movie**: Movie entity, ordering modes with their ranking table, catalog cache trait
//! - **detail**: Videos and reviews, item-scoped store trait
//! - **paging**: Per-ranking paging state and the settings store trait
//! - **source**: Remote fetcher traits
//! - **error**: Persistence and fetch error types

pub mod detail;
pub mod error;
pub mod movie;
pub mod paging;
pub mod source;

// Re-exports for convenience
pub use detail::{DetailStore, Review, Video};
pub use error::{DomainError, DomainResult, FetchError};
pub use movie::{CatalogCache, FavoriteMovie, Movie, OrderingMode, Ranking, SortField, RANKINGS};
pub use paging::{PageState, SettingsStore};
pub use source::{DetailFetcher, MoviePage, PageFetcher};
