use domain::OrderingMode;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::services::PageOutcome;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Sync worker is not running")]
    WorkerStopped,
}

/// Modes with a page cycle queued or running.
pub(super) type PendingModes = Arc<Mutex<HashSet<OrderingMode>>>;

/// Holds a mode's pending slot; the slot is freed when this is dropped.
///
/// Travels inside [`SyncMessage::NextPage`], so a message that is never
/// delivered (cancelled send, stopped worker) frees the slot with it.
#[derive(Debug)]
pub struct PendingMark {
    modes: PendingModes,
    mode: OrderingMode,
}

impl PendingMark {
    /// `None` if the mode already has a pending cycle.
    pub(super) fn acquire(modes: &PendingModes, mode: OrderingMode) -> Option<Self> {
        if modes.lock().insert(mode) {
            Some(Self {
                modes: Arc::clone(modes),
                mode,
            })
        } else {
            None
        }
    }
}

impl Drop for PendingMark {
    fn drop(&mut self) {
        self.modes.lock().remove(&self.mode);
    }
}

/// Sync actor messages. A `reply` of `None` is fire-and-forget.
pub enum SyncMessage {
    /// Run one page cycle for a mode.
    NextPage {
        mode: OrderingMode,
        pending: PendingMark,
        reply: Option<oneshot::Sender<PageOutcome>>,
    },
    /// Persist the active mode, then load its first page if nothing is cached.
    SwitchMode {
        mode: OrderingMode,
        reply: Option<oneshot::Sender<PageOutcome>>,
    },
    /// Load the first page of a mode if nothing is cached, without making it
    /// active.
    EnsureInitialized {
        mode: OrderingMode,
        reply: Option<oneshot::Sender<PageOutcome>>,
    },
    /// One-shot startup check for the active mode.
    Initialize {
        reply: Option<oneshot::Sender<PageOutcome>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_is_exclusive_until_dropped() {
        let modes = PendingModes::default();

        let mark = PendingMark::acquire(&modes, OrderingMode::TopRated).unwrap();
        assert!(PendingMark::acquire(&modes, OrderingMode::TopRated).is_none());
        assert!(PendingMark::acquire(&modes, OrderingMode::MostPopular).is_some());

        drop(mark);
        assert!(!modes.lock().contains(&OrderingMode::TopRated));
        assert!(PendingMark::acquire(&modes, OrderingMode::TopRated).is_some());
    }
}
