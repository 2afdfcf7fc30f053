use chrono::Utc;
use domain::{OrderingMode, SettingsStore};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::messages::SyncMessage;
use crate::services::{CycleError, PageOutcome, PaginationController};

/// Sync actor
///
/// Handles one message at a time, so at most one page cycle runs in the
/// process.
pub(super) struct SyncActor {
    controller: Arc<PaginationController>,
    settings: Arc<dyn SettingsStore>,
    receiver: mpsc::Receiver<SyncMessage>,
}

impl SyncActor {
    pub(super) fn new(
        controller: Arc<PaginationController>,
        settings: Arc<dyn SettingsStore>,
        receiver: mpsc::Receiver<SyncMessage>,
    ) -> Self {
        Self {
            controller,
            settings,
            receiver,
        }
    }

    /// Run the actor main loop
    pub(super) async fn run(mut self) {
        tracing::debug!("Sync actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }

        tracing::debug!("Sync actor stopped");
    }

    async fn handle_message(&mut self, msg: SyncMessage) {
        match msg {
            SyncMessage::NextPage {
                mode,
                pending,
                reply,
            } => {
                let outcome = self.controller.request_next_page(mode, Utc::now()).await;
                // Free the slot before replying so the caller can ask again
                drop(pending);
                respond(reply, outcome);
            }

            SyncMessage::SwitchMode { mode, reply } => {
                let outcome = self.switch_mode(mode).await;
                respond(reply, outcome);
            }

            SyncMessage::EnsureInitialized { mode, reply } => {
                let outcome = self.controller.ensure_initialized(mode, Utc::now()).await;
                respond(reply, outcome);
            }

            SyncMessage::Initialize { reply } => {
                let outcome = self.controller.initialize(Utc::now()).await;
                respond(reply, outcome);
            }
        }
    }

    async fn switch_mode(&self, mode: OrderingMode) -> PageOutcome {
        if let Err(e) = self.settings.set_active_mode(mode).await {
            tracing::warn!("Failed to persist active mode {}: {}", mode, e);
            return PageOutcome::Failed(CycleError::Storage(e));
        }

        tracing::info!("Switched to {}", mode);
        self.controller.ensure_initialized(mode, Utc::now()).await
    }
}

fn respond(reply: Option<oneshot::Sender<PageOutcome>>, outcome: PageOutcome) {
    if let Some(reply) = reply {
        let _ = reply.send(outcome);
    }
}
