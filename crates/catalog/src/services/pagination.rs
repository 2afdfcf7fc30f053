//! Pagination controller: decides per mode whether to reuse, extend or
//! invalidate the cached page set.

use chrono::{DateTime, Utc};
use domain::{
    CatalogCache, DomainError, FetchError, OrderingMode, PageFetcher, PageState, Ranking,
    SettingsStore,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use super::freshness;

/// Why a cycle ended without touching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Favorites are never fetched.
    Favorite,
    /// A fetch for this mode is already running.
    InFlight,
    /// The mode already has cached pages.
    AlreadyCached,
    /// Startup initialization already ran.
    AlreadyInitialized,
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// Result of one `request_next_page` cycle.
#[derive(Debug)]
pub enum PageOutcome {
    /// A page landed in the cache and the page counter moved.
    Loaded {
        page: u32,
        inserted: u64,
        total_pages: u32,
    },
    /// Every known page is cached and still fresh.
    FullyLoaded,
    Skipped(SkipReason),
    /// The fetch succeeded but wrote no rows; the page will be retried.
    NotAdvanced { page: u32 },
    /// Nothing persisted for this cycle.
    Failed(CycleError),
}

impl PageOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, PageOutcome::Loaded { .. })
    }
}

/// What a cycle should do, given the persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePlan {
    FullyLoaded,
    /// Fetch `page`; when `restart` is set the partition is stale and must
    /// be cleared first.
    Fetch { page: u32, restart: bool },
}

/// Pure transition function of the paging state machine.
pub fn plan_next_page(ranking: &Ranking, state: PageState, now: DateTime<Utc>) -> PagePlan {
    let restart = !freshness::is_ranking_fresh(ranking, state.last_refreshed_at, now);
    let state = if restart { state.restarted() } else { state };

    if state.is_fully_loaded() {
        PagePlan::FullyLoaded
    } else {
        PagePlan::Fetch {
            page: state.next_page(),
            restart,
        }
    }
}

/// Drives one ranking's cache forward a page at a time.
///
/// At most one cycle runs per mode; a request arriving while one is in
/// flight is dropped, not queued.
pub struct PaginationController {
    settings: Arc<dyn SettingsStore>,
    cache: Arc<dyn CatalogCache>,
    fetcher: Arc<dyn PageFetcher>,
    in_flight: Mutex<HashSet<OrderingMode>>,
    initialized: AtomicBool,
}

impl PaginationController {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        cache: Arc<dyn CatalogCache>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            settings,
            cache,
            fetcher,
            in_flight: Mutex::new(HashSet::new()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Run one cycle for `mode` as of `now`.
    ///
    /// Never returns an error: failures leave paging state untouched and are
    /// reported in the outcome.
    pub async fn request_next_page(&self, mode: OrderingMode, now: DateTime<Utc>) -> PageOutcome {
        let Some(ranking) = mode.ranking() else {
            return PageOutcome::Skipped(SkipReason::Favorite);
        };

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, mode) else {
            tracing::debug!("Fetch for {} already in flight, dropping request", mode);
            return PageOutcome::Skipped(SkipReason::InFlight);
        };

        match self.run_cycle(ranking, now).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Page cycle for {} failed: {}", mode, e);
                PageOutcome::Failed(e)
            }
        }
    }

    /// Fetch the first page of `mode` only if nothing is cached for it yet.
    ///
    /// Used at startup and on every mode switch; switching never clears a
    /// partition by itself.
    pub async fn ensure_initialized(&self, mode: OrderingMode, now: DateTime<Utc>) -> PageOutcome {
        let Some(ranking) = mode.ranking() else {
            return PageOutcome::Skipped(SkipReason::Favorite);
        };

        let state = self.settings.page_state(ranking).await;
        if state.current_page > 0 {
            return PageOutcome::Skipped(SkipReason::AlreadyCached);
        }

        self.request_next_page(mode, now).await
    }

    /// One-shot startup check for the active mode.
    pub async fn initialize(&self, now: DateTime<Utc>) -> PageOutcome {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return PageOutcome::Skipped(SkipReason::AlreadyInitialized);
        }

        let mode = self.settings.active_mode().await;
        tracing::debug!("Initializing catalog for {}", mode);
        self.ensure_initialized(mode, now).await
    }

    async fn run_cycle(&self, ranking: &Ranking, now: DateTime<Utc>) -> Result<PageOutcome, CycleError> {
        let mut state = self.settings.page_state(ranking).await;

        let page = match plan_next_page(ranking, state, now) {
            PagePlan::FullyLoaded => {
                tracing::debug!(
                    "{} fully loaded ({} pages), nothing to do",
                    ranking.mode,
                    state.total_pages
                );
                return Ok(PageOutcome::FullyLoaded);
            }
            PagePlan::Fetch { page, restart } => {
                if restart {
                    let cleared = self.cache.clear(ranking).await?;
                    state = state.restarted();
                    self.settings.set_page_state(ranking, state).await?;
                    tracing::info!(
                        "{} cache is stale, cleared {} movies and restarting from page 1",
                        ranking.mode,
                        cleared
                    );
                }
                page
            }
        };

        let fetched = self.fetcher.fetch_page(ranking, page).await?;
        let inserted = self.cache.bulk_insert(ranking, &fetched.movies).await?;

        if inserted == 0 {
            tracing::warn!(
                "Page {} of {} wrote no rows, will retry",
                page,
                ranking.mode
            );
            return Ok(PageOutcome::NotAdvanced { page });
        }

        let next = state.advanced(fetched.total_pages, now);
        self.settings.set_page_state(ranking, next).await?;

        tracing::info!(
            "Loaded page {}/{} of {} ({} movies)",
            next.current_page,
            next.total_pages,
            ranking.mode,
            inserted
        );

        Ok(PageOutcome::Loaded {
            page,
            inserted,
            total_pages: next.total_pages,
        })
    }
}

/// Marks a mode as in flight until dropped.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<OrderingMode>>,
    mode: OrderingMode,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<OrderingMode>>, mode: OrderingMode) -> Option<Self> {
        if set.lock().insert(mode) {
            Some(Self { set, mode })
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.mode);
    }
}
