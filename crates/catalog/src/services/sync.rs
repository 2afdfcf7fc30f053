//! Background sync worker.
//!
//! A single actor runs page cycles one at a time, in request order. Detail
//! refreshes bypass the queue and run on their own tasks.

mod handle;
mod messages;
mod runner;

pub use handle::SyncHandle;
pub use messages::{PendingMark, SyncError, SyncMessage};
use runner::SyncActor;

use domain::SettingsStore;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::{DetailAugmentor, PaginationController};

const CHANNEL_CAPACITY: usize = 32;

/// Spawn the sync actor.
///
/// Must be called from within a tokio runtime.
pub fn create_sync_actor(
    controller: Arc<PaginationController>,
    settings: Arc<dyn SettingsStore>,
    augmentor: Arc<DetailAugmentor>,
) -> SyncHandle {
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
    let actor = SyncActor::new(controller, settings, receiver);
    tokio::spawn(actor.run());

    SyncHandle::new(sender, Default::default(), augmentor)
}
