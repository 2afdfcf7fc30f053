//! Catalog cache trait.

use async_trait::async_trait;

use super::{FavoriteMovie, Movie, OrderingMode, Ranking};
use crate::error::DomainResult;

/// Local store of cached movie partitions plus the favorites set.
///
/// Concrete implementations are provided in the infrastructure layer.
/// Every successful mutation is expected to notify observers of the
/// affected mode.
#[async_trait]
pub trait CatalogCache: Send + Sync {
    /// Insert-or-replace by `remote_id` inside the ranking's partition, as
    /// one transaction.
    ///
    /// Returns the number of rows written; a replaced row counts.
    async fn bulk_insert(&self, ranking: &Ranking, movies: &[Movie]) -> DomainResult<u64>;

    /// Delete every row in the ranking's partition.
    async fn clear(&self, ranking: &Ranking) -> DomainResult<u64>;

    /// Movies of a mode, sorted by the mode's ranking field descending.
    /// Favorites come back in the order they were saved.
    async fn query(&self, mode: OrderingMode) -> DomainResult<Vec<Movie>>;

    /// Find one movie in a partition.
    async fn find(&self, mode: OrderingMode, remote_id: i64) -> DomainResult<Option<Movie>>;

    async fn add_favorite(&self, movie: &Movie) -> DomainResult<FavoriteMovie>;

    /// Returns true if the movie was a favorite.
    async fn remove_favorite(&self, remote_id: i64) -> DomainResult<bool>;

    async fn is_favorite(&self, remote_id: i64) -> DomainResult<bool>;
}
