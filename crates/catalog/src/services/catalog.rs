use async_trait::async_trait;
use chrono::Utc;
use domain::{
    CatalogCache, DetailStore, DomainError, DomainResult, FavoriteMovie, Movie, OrderingMode,
    Ranking, Review, Video,
};
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::repositories::{FavoriteRepository, MovieRepository, ReviewRepository, VideoRepository};

/// Broadcast channel capacity
const BROADCAST_CAPACITY: usize = 64;

/// What changed in the local catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogChange {
    /// A mode's partition was written or cleared.
    Movies(OrderingMode),
    Videos(i64),
    Reviews(i64),
}

/// SQLite-backed catalog cache and detail store.
///
/// Every successful mutation is broadcast to subscribers so readers can
/// re-query instead of polling.
pub struct CatalogService {
    db: SqlitePool,
    broadcaster: broadcast::Sender<CatalogChange>,
}

fn persistence(e: sqlx::Error) -> DomainError {
    DomainError::Persistence(e.to_string())
}

impl CatalogService {
    pub fn new(db: SqlitePool) -> Self {
        let (broadcaster, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { db, broadcaster }
    }

    /// Subscribe to catalog changes
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogChange> {
        self.broadcaster.subscribe()
    }

    /// Number of cached movies in a mode.
    pub async fn count(&self, mode: OrderingMode) -> DomainResult<usize> {
        let count = match mode.ranking() {
            Some(ranking) => MovieRepository::count_by_mode(&self.db, ranking.settings_key)
                .await
                .map_err(persistence)? as usize,
            None => FavoriteRepository::get_all(&self.db)
                .await
                .map_err(persistence)?
                .len(),
        };
        Ok(count)
    }

    /// Favorites with the time they were saved.
    pub async fn favorites(&self) -> DomainResult<Vec<FavoriteMovie>> {
        FavoriteRepository::get_all(&self.db)
            .await
            .map_err(persistence)
    }

    /// Look a movie up in every partition, favorites first.
    pub async fn find_any(&self, remote_id: i64) -> DomainResult<Option<Movie>> {
        for mode in [
            OrderingMode::Favorite,
            OrderingMode::MostPopular,
            OrderingMode::TopRated,
        ] {
            if let Some(movie) = self.find(mode, remote_id).await? {
                return Ok(Some(movie));
            }
        }
        Ok(None)
    }

    /// Add a movie to favorites if absent, remove it otherwise.
    ///
    /// Returns whether the movie is a favorite afterwards.
    pub async fn toggle_favorite(&self, movie: &Movie) -> DomainResult<bool> {
        if self.is_favorite(movie.remote_id).await? {
            self.remove_favorite(movie.remote_id).await?;
            Ok(false)
        } else {
            self.add_favorite(movie).await?;
            Ok(true)
        }
    }

    fn notify(&self, change: CatalogChange) {
        // Ignore if no subscribers
        let _ = self.broadcaster.send(change);
    }
}

#[async_trait]
impl CatalogCache for CatalogService {
    async fn bulk_insert(&self, ranking: &Ranking, movies: &[Movie]) -> DomainResult<u64> {
        let written = MovieRepository::insert_batch(&self.db, ranking.settings_key, movies)
            .await
            .map_err(persistence)?;

        if written > 0 {
            self.notify(CatalogChange::Movies(ranking.mode));
        }
        Ok(written)
    }

    async fn clear(&self, ranking: &Ranking) -> DomainResult<u64> {
        let deleted = MovieRepository::delete_by_mode(&self.db, ranking.settings_key)
            .await
            .map_err(persistence)?;

        tracing::debug!("Cleared {} cached movies from {}", deleted, ranking.mode);
        self.notify(CatalogChange::Movies(ranking.mode));
        Ok(deleted)
    }

    async fn query(&self, mode: OrderingMode) -> DomainResult<Vec<Movie>> {
        match mode.ranking() {
            Some(ranking) => MovieRepository::list_by_mode(
                &self.db,
                ranking.settings_key,
                ranking.sort_field.column(),
            )
            .await
            .map_err(persistence),
            None => Ok(self
                .favorites()
                .await?
                .into_iter()
                .map(|f| f.movie)
                .collect()),
        }
    }

    async fn find(&self, mode: OrderingMode, remote_id: i64) -> DomainResult<Option<Movie>> {
        match mode.ranking() {
            Some(ranking) => {
                MovieRepository::get_by_remote_id(&self.db, ranking.settings_key, remote_id)
                    .await
                    .map_err(persistence)
            }
            None => Ok(FavoriteRepository::get_by_remote_id(&self.db, remote_id)
                .await
                .map_err(persistence)?
                .map(|f| f.movie)),
        }
    }

    async fn add_favorite(&self, movie: &Movie) -> DomainResult<FavoriteMovie> {
        if movie.remote_id <= 0 {
            return Err(DomainError::Validation(format!(
                "invalid movie id {}",
                movie.remote_id
            )));
        }

        let favorite = FavoriteRepository::upsert(&self.db, movie, Utc::now())
            .await
            .map_err(persistence)?;

        tracing::info!("Saved '{}' to favorites", movie.title);
        self.notify(CatalogChange::Movies(OrderingMode::Favorite));
        Ok(favorite)
    }

    async fn remove_favorite(&self, remote_id: i64) -> DomainResult<bool> {
        let removed = FavoriteRepository::delete(&self.db, remote_id)
            .await
            .map_err(persistence)?;

        if removed {
            tracing::info!("Removed movie {} from favorites", remote_id);
            self.notify(CatalogChange::Movies(OrderingMode::Favorite));
        }
        Ok(removed)
    }

    async fn is_favorite(&self, remote_id: i64) -> DomainResult<bool> {
        FavoriteRepository::exists(&self.db, remote_id)
            .await
            .map_err(persistence)
    }
}

#[async_trait]
impl DetailStore for CatalogService {
    async fn replace_videos(&self, movie_id: i64, videos: &[Video]) -> DomainResult<u64> {
        let written = VideoRepository::replace_for_movie(&self.db, movie_id, videos)
            .await
            .map_err(persistence)?;

        self.notify(CatalogChange::Videos(movie_id));
        Ok(written)
    }

    async fn replace_reviews(&self, movie_id: i64, reviews: &[Review]) -> DomainResult<u64> {
        let written = ReviewRepository::replace_for_movie(&self.db, movie_id, reviews)
            .await
            .map_err(persistence)?;

        self.notify(CatalogChange::Reviews(movie_id));
        Ok(written)
    }

    async fn videos(&self, movie_id: i64) -> DomainResult<Vec<Video>> {
        VideoRepository::get_by_movie(&self.db, movie_id)
            .await
            .map_err(persistence)
    }

    async fn reviews(&self, movie_id: i64) -> DomainResult<Vec<Review>> {
        ReviewRepository::get_by_movie(&self.db, movie_id)
            .await
            .map_err(persistence)
    }
}
