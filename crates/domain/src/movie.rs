//! Movie domain module.
//!
//! Contains the Movie entity, the ordering modes and their ranking table,
//! and the catalog cache trait.

mod entity;
mod ordering;
mod repository;

pub use entity::{FavoriteMovie, Movie};
pub use ordering::{OrderingMode, Ranking, SortField, RANKINGS};
pub use repository::CatalogCache;
