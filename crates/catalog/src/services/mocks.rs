//! Mock implementations for testing the pagination and detail services.
//!
//! Every mock is cheaply cloneable and shares its state between clones, so a
//! test keeps one copy for verification and hands another to the service.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{
    CatalogCache, DetailFetcher, DetailStore, DomainError, DomainResult, FavoriteMovie, FetchError,
    Movie, MoviePage, OrderingMode, PageFetcher, PageState, Ranking, Review, SettingsStore, Video,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Test data
// ============================================================================

/// `count` movies with consecutive ids starting at `start`.
pub fn movies(start: i64, count: usize) -> Vec<Movie> {
    (0..count as i64)
        .map(|i| {
            let id = start + i;
            Movie {
                remote_id: id,
                title: format!("Movie {}", id),
                poster_path: Some(format!("/poster{}.jpg", id)),
                overview: format!("Overview of movie {}", id),
                release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                vote_average: 5.0 + (i % 5) as f64,
                popularity: 1000.0 - id as f64,
            }
        })
        .collect()
}

pub fn page_of(start: i64, count: usize, total_pages: u32) -> MoviePage {
    MoviePage {
        movies: movies(start, count),
        total_pages,
    }
}

pub fn test_video(owner: i64, id: &str) -> Video {
    Video {
        owner_movie_id: owner,
        remote_id: id.to_string(),
        key: format!("key-{}", id),
        name: format!("Trailer {}", id),
        site: "YouTube".to_string(),
        video_type: "Trailer".to_string(),
    }
}

pub fn test_review(owner: i64, id: &str) -> Review {
    Review {
        owner_movie_id: owner,
        remote_id: id.to_string(),
        author: "critic".to_string(),
        content: format!("Review {}", id),
    }
}

// ============================================================================
// Mock Settings
// ============================================================================

/// In-memory settings store that counts reads and writes.
#[derive(Clone, Default)]
pub struct MockSettings {
    mode: Arc<Mutex<OrderingMode>>,
    pages: Arc<Mutex<HashMap<&'static str, PageState>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MockSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set paging state without counting it as a write.
    pub fn put(&self, ranking: &Ranking, state: PageState) {
        self.pages
            .lock()
            .unwrap()
            .insert(ranking.settings_key, state);
    }

    pub fn set_mode(&self, mode: OrderingMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn mode(&self) -> OrderingMode {
        *self.mode.lock().unwrap()
    }

    pub fn state(&self, ranking: &Ranking) -> PageState {
        self.pages
            .lock()
            .unwrap()
            .get(ranking.settings_key)
            .copied()
            .unwrap_or_default()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStore for MockSettings {
    async fn active_mode(&self) -> OrderingMode {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.mode()
    }

    async fn set_active_mode(&self, mode: OrderingMode) -> DomainResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.set_mode(mode);
        Ok(())
    }

    async fn page_state(&self, ranking: &Ranking) -> PageState {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.state(ranking)
    }

    async fn set_page_state(&self, ranking: &Ranking, state: PageState) -> DomainResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.put(ranking, state);
        Ok(())
    }
}

// ============================================================================
// Mock Catalog
// ============================================================================

/// In-memory catalog cache with insert-or-replace semantics per partition.
#[derive(Clone, Default)]
pub struct MockCatalog {
    partitions: Arc<Mutex<HashMap<OrderingMode, Vec<Movie>>>>,
    clears: Arc<AtomicUsize>,
    fail_inserts: Arc<Mutex<bool>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, mode: OrderingMode, movies: Vec<Movie>) {
        self.partitions.lock().unwrap().insert(mode, movies);
    }

    pub fn movies(&self, mode: OrderingMode) -> Vec<Movie> {
        self.partitions
            .lock()
            .unwrap()
            .get(&mode)
            .cloned()
            .unwrap_or_default()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// Make every following bulk insert fail without writing.
    pub fn fail_inserts(&self, fail: bool) {
        *self.fail_inserts.lock().unwrap() = fail;
    }

    fn upsert(&self, mode: OrderingMode, movie: &Movie) {
        let mut partitions = self.partitions.lock().unwrap();
        let rows = partitions.entry(mode).or_default();
        rows.retain(|m| m.remote_id != movie.remote_id);
        rows.push(movie.clone());
    }
}

#[async_trait]
impl CatalogCache for MockCatalog {
    async fn bulk_insert(&self, ranking: &Ranking, movies: &[Movie]) -> DomainResult<u64> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(DomainError::Persistence("disk I/O error".to_string()));
        }
        for movie in movies {
            self.upsert(ranking.mode, movie);
        }
        Ok(movies.len() as u64)
    }

    async fn clear(&self, ranking: &Ranking) -> DomainResult<u64> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        let removed = self
            .partitions
            .lock()
            .unwrap()
            .remove(&ranking.mode)
            .map(|rows| rows.len())
            .unwrap_or(0);
        Ok(removed as u64)
    }

    async fn query(&self, mode: OrderingMode) -> DomainResult<Vec<Movie>> {
        let mut rows = self.movies(mode);
        if let Some(ranking) = mode.ranking() {
            let field = ranking.sort_field;
            rows.sort_by(|a, b| field.value_of(b).total_cmp(&field.value_of(a)));
        }
        Ok(rows)
    }

    async fn find(&self, mode: OrderingMode, remote_id: i64) -> DomainResult<Option<Movie>> {
        Ok(self
            .movies(mode)
            .into_iter()
            .find(|m| m.remote_id == remote_id))
    }

    async fn add_favorite(&self, movie: &Movie) -> DomainResult<FavoriteMovie> {
        self.upsert(OrderingMode::Favorite, movie);
        Ok(FavoriteMovie {
            movie: movie.clone(),
            saved_at: chrono::Utc::now(),
        })
    }

    async fn remove_favorite(&self, remote_id: i64) -> DomainResult<bool> {
        let mut partitions = self.partitions.lock().unwrap();
        let rows = partitions.entry(OrderingMode::Favorite).or_default();
        let before = rows.len();
        rows.retain(|m| m.remote_id != remote_id);
        Ok(rows.len() < before)
    }

    async fn is_favorite(&self, remote_id: i64) -> DomainResult<bool> {
        Ok(self
            .movies(OrderingMode::Favorite)
            .iter()
            .any(|m| m.remote_id == remote_id))
    }
}

// ============================================================================
// Mock Page Fetcher
// ============================================================================

/// Page fetcher answering from a page-number table.
///
/// Pages without a configured result fail with a network error.
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    pages: Arc<Mutex<HashMap<u32, Result<MoviePage, FetchError>>>>,
    requests: Arc<Mutex<Vec<(&'static str, u32)>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&self, page: u32, result: Result<MoviePage, FetchError>) {
        self.pages.lock().unwrap().insert(page, result);
    }

    /// Recorded (ranking path, page) pairs, in call order.
    pub fn requests(&self) -> Vec<(&'static str, u32)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_page(&self, ranking: &Ranking, page: u32) -> Result<MoviePage, FetchError> {
        self.requests.lock().unwrap().push((ranking.path, page));
        self.pages
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Network(format!("no page {}", page))))
    }
}

/// Page fetcher that blocks every call until released.
#[derive(Clone)]
pub struct GatedPageFetcher {
    page: MoviePage,
    started: Arc<Notify>,
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

impl GatedPageFetcher {
    pub fn new(page: MoviePage) -> Self {
        Self {
            page,
            started: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait until a fetch is blocked on the gate.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let one blocked (or the next) fetch through.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for GatedPageFetcher {
    async fn fetch_page(&self, _ranking: &Ranking, _page: u32) -> Result<MoviePage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.gate.notified().await;
        Ok(self.page.clone())
    }
}

// ============================================================================
// Mock Detail Fetcher / Store
// ============================================================================

#[derive(Clone)]
pub struct MockDetailFetcher {
    videos: Arc<Mutex<Result<Vec<Video>, FetchError>>>,
    reviews: Arc<Mutex<Result<Vec<Review>, FetchError>>>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockDetailFetcher {
    fn default() -> Self {
        Self {
            videos: Arc::new(Mutex::new(Ok(vec![]))),
            reviews: Arc::new(Mutex::new(Ok(vec![]))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockDetailFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_videos(&self, result: Result<Vec<Video>, FetchError>) {
        *self.videos.lock().unwrap() = result;
    }

    pub fn set_reviews(&self, result: Result<Vec<Review>, FetchError>) {
        *self.reviews.lock().unwrap() = result;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailFetcher for MockDetailFetcher {
    async fn fetch_videos(&self, _movie_id: i64) -> Result<Vec<Video>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.videos.lock().unwrap().clone()
    }

    async fn fetch_reviews(&self, _movie_id: i64) -> Result<Vec<Review>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reviews.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub struct MockDetailStore {
    videos: Arc<Mutex<HashMap<i64, Vec<Video>>>>,
    reviews: Arc<Mutex<HashMap<i64, Vec<Review>>>>,
    writes: Arc<AtomicUsize>,
}

impl MockDetailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_videos(&self, movie_id: i64, videos: Vec<Video>) {
        self.videos.lock().unwrap().insert(movie_id, videos);
    }

    pub fn videos_of(&self, movie_id: i64) -> Vec<Video> {
        self.videos
            .lock()
            .unwrap()
            .get(&movie_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reviews_of(&self, movie_id: i64) -> Vec<Review> {
        self.reviews
            .lock()
            .unwrap()
            .get(&movie_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailStore for MockDetailStore {
    async fn replace_videos(&self, movie_id: i64, videos: &[Video]) -> DomainResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.videos
            .lock()
            .unwrap()
            .insert(movie_id, videos.to_vec());
        Ok(videos.len() as u64)
    }

    async fn replace_reviews(&self, movie_id: i64, reviews: &[Review]) -> DomainResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.reviews
            .lock()
            .unwrap()
            .insert(movie_id, reviews.to_vec());
        Ok(reviews.len() as u64)
    }

    async fn videos(&self, movie_id: i64) -> DomainResult<Vec<Video>> {
        Ok(self.videos_of(movie_id))
    }

    async fn reviews(&self, movie_id: i64) -> DomainResult<Vec<Review>> {
        Ok(self.reviews_of(movie_id))
    }
}
