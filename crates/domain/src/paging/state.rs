//! Paging state value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How far a ranking's page set has been loaded, and when it was refreshed.
///
/// The initial state (nothing fetched) is `0 / 0` with no refresh time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageState {
    /// Number of pages loaded in the current cycle.
    #[serde(default)]
    pub current_page: u32,
    /// Page count reported by the server on page 1 of the current cycle.
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl PageState {
    /// Every known page is loaded.
    pub fn is_fully_loaded(&self) -> bool {
        self.total_pages > 0 && self.current_page == self.total_pages
    }

    /// The 1-indexed page to fetch next.
    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    /// State after the partition was cleared for being stale.
    ///
    /// `total_pages` and the refresh time stay until page 1 lands again.
    pub fn restarted(self) -> Self {
        Self {
            current_page: 0,
            ..self
        }
    }

    /// State after one more page landed in the cache.
    ///
    /// The first page of a cycle also records the server's page count and
    /// the refresh time.
    pub fn advanced(self, fetched_total_pages: u32, now: DateTime<Utc>) -> Self {
        let current_page = self.current_page + 1;
        if current_page == 1 {
            Self {
                current_page,
                total_pages: fetched_total_pages,
                last_refreshed_at: Some(now),
            }
        } else {
            Self {
                current_page,
                ..self
            }
        }
    }
}
