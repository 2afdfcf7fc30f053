//! Whether a cached page set is still trustworthy.

use chrono::{DateTime, Utc};
use domain::{OrderingMode, Ranking, SettingsStore};

/// Freshness of a mode's cached partition at `now`.
///
/// Favorites never expire. A ranking that was never refreshed is stale.
pub fn is_fresh(
    mode: OrderingMode,
    last_refreshed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match mode.ranking() {
        Some(ranking) => is_ranking_fresh(ranking, last_refreshed_at, now),
        None => true,
    }
}

/// Freshness of a mode, reading its refresh time from the settings store.
pub async fn is_mode_fresh(
    settings: &dyn SettingsStore,
    mode: OrderingMode,
    now: DateTime<Utc>,
) -> bool {
    match mode.ranking() {
        Some(ranking) => {
            let state = settings.page_state(ranking).await;
            is_ranking_fresh(ranking, state.last_refreshed_at, now)
        }
        None => true,
    }
}

/// A refresh time in the future counts as fresh.
pub fn is_ranking_fresh(
    ranking: &Ranking,
    last_refreshed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match last_refreshed_at {
        Some(refreshed) => now.signed_duration_since(refreshed) < ranking.refresh_interval(),
        None => false,
    }
}
