//! Paging state of the server-ordered lists and where it is persisted.

mod state;
mod store;

pub use state::PageState;
pub use store::SettingsStore;
