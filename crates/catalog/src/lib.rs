//! Local movie catalog.
//!
//! Caches TMDB's ranked movie lists in SQLite, pages through them on demand,
//! refreshes them when they go stale and keeps a user-curated favorites set.
//!
//! # Module Structure
//!
//! - **repositories**: SQL access, one repository per table
//! - **services**: catalog cache, settings, freshness, pagination, detail
//!   refresh and the background sync actor
//! - **state**: wiring of everything above into one [`AppState`]

pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
