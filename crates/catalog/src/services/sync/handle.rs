use domain::OrderingMode;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::messages::{PendingMark, PendingModes, SyncError, SyncMessage};
use crate::services::{DetailAugmentor, DetailOutcome, PageOutcome, SkipReason};
use std::sync::Arc;

/// Public interface of the sync actor.
///
/// A mode with a queued or running page cycle is pending; further page
/// requests for it are dropped until that cycle completes.
#[derive(Clone)]
pub struct SyncHandle {
    sender: mpsc::Sender<SyncMessage>,
    pending: PendingModes,
    augmentor: Arc<DetailAugmentor>,
}

impl SyncHandle {
    pub(super) fn new(
        sender: mpsc::Sender<SyncMessage>,
        pending: PendingModes,
        augmentor: Arc<DetailAugmentor>,
    ) -> Self {
        Self {
            sender,
            pending,
            augmentor,
        }
    }

    /// Queue a page cycle (fire-and-forget, returns immediately).
    ///
    /// Returns false if one is already pending for this mode.
    pub fn request_next_page(&self, mode: OrderingMode) -> bool {
        let Some(pending) = PendingMark::acquire(&self.pending, mode) else {
            tracing::debug!("Page request for {} already pending", mode);
            return false;
        };

        let sender = self.sender.clone();
        tokio::spawn(async move {
            let msg = SyncMessage::NextPage {
                mode,
                pending,
                reply: None,
            };
            if sender.send(msg).await.is_err() {
                tracing::warn!("Sync worker stopped, dropping page request for {}", mode);
            }
        });
        true
    }

    /// Queue a page cycle and wait for its outcome.
    pub async fn next_page(&self, mode: OrderingMode) -> Result<PageOutcome, SyncError> {
        let Some(pending) = PendingMark::acquire(&self.pending, mode) else {
            return Ok(PageOutcome::Skipped(SkipReason::InFlight));
        };

        self.request(|reply| SyncMessage::NextPage {
            mode,
            pending,
            reply,
        })
        .await
    }

    /// Make `mode` active and load it if nothing is cached for it.
    pub async fn switch_mode(&self, mode: OrderingMode) -> Result<PageOutcome, SyncError> {
        self.request(|reply| SyncMessage::SwitchMode { mode, reply }).await
    }

    /// Load the first page of `mode` if nothing is cached for it.
    pub async fn ensure_initialized(&self, mode: OrderingMode) -> Result<PageOutcome, SyncError> {
        self.request(|reply| SyncMessage::EnsureInitialized { mode, reply })
            .await
    }

    /// Run the startup check for the active mode.
    pub async fn initialize(&self) -> Result<PageOutcome, SyncError> {
        self.request(|reply| SyncMessage::Initialize { reply }).await
    }

    /// Refresh videos and reviews of a movie on a separate task.
    pub fn open_detail(&self, movie_id: i64) -> JoinHandle<DetailOutcome> {
        let augmentor = Arc::clone(&self.augmentor);
        tokio::spawn(async move { augmentor.augment(movie_id).await })
    }

    pub fn is_pending(&self, mode: OrderingMode) -> bool {
        self.pending.lock().contains(&mode)
    }

    async fn request<F>(&self, build: F) -> Result<PageOutcome, SyncError>
    where
        F: FnOnce(Option<oneshot::Sender<PageOutcome>>) -> SyncMessage,
    {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(build(Some(reply)))
            .await
            .map_err(|_| SyncError::WorkerStopped)?;
        rx.await.map_err(|_| SyncError::WorkerStopped)
    }
}
