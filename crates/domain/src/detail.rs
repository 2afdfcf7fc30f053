//! Per-movie detail: videos and reviews.

mod entity;
mod repository;

pub use entity::{Review, Video};
pub use repository::DetailStore;
