mod adapters;
mod catalog;
mod detail;
pub mod freshness;
mod pagination;
mod settings;
mod sync;

#[cfg(test)]
pub(crate) mod mocks;

pub use adapters::TmdbSource;
pub use catalog::{CatalogChange, CatalogService};
pub use detail::{DetailAugmentor, DetailOutcome};
pub use pagination::{
    plan_next_page, CycleError, PageOutcome, PagePlan, PaginationController, SkipReason,
};
pub use settings::{Settings, SettingsError, SettingsService};
pub use sync::{create_sync_actor, PendingMark, SyncError, SyncHandle, SyncMessage};
