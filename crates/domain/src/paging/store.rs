//! Settings store trait.

use async_trait::async_trait;

use super::PageState;
use crate::error::DomainResult;
use crate::movie::{OrderingMode, Ranking};

/// Persistent settings: the active mode plus one [`PageState`] per ranking.
///
/// Page state is keyed by [`Ranking`], so the favorites set has none.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn active_mode(&self) -> OrderingMode;

    /// Pure write; does not trigger any fetch.
    async fn set_active_mode(&self, mode: OrderingMode) -> DomainResult<()>;

    async fn page_state(&self, ranking: &Ranking) -> PageState;

    async fn set_page_state(&self, ranking: &Ranking, state: PageState) -> DomainResult<()>;
}
