//! # Autosave Loop
//!
//! Consumes edit events for one component and turns them into store
//! updates:
//!
//! ```text
//! edit event ──▶ debouncer ──(quiet period)──▶ save ──▶ status
//! ```
//!
//! Selection-only events never schedule a save. The save call is
//! awaited inside the loop, so at most one update per component is in
//! flight; edits arriving meanwhile queue on the channel, re-enter the
//! debouncer afterwards, and produce one follow-up save. A failed save
//! surfaces as the `Error` status and is logged - local edits stay
//! intact and the next content edit carries the then-current snapshot.
//!
//! Status display: `Idle → Saving → Saved → Idle`, with the `Saved`
//! badge resetting after a fixed delay. Errors stay visible until the
//! next save attempt.

use crate::debounce::{Debouncer, DEBOUNCE_WINDOW};
use crate::store::{ComponentPatch, StoreBackend};
use figdocs_doc::Document;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error};

/// How long the `Saved` badge stays up before returning to `Idle`.
pub const SAVED_RESET_DELAY: Duration = Duration::from_secs(2);

/// Save indicator state, as the editing surface displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

/// One edit, as reported by the editor session.
#[derive(Debug, Clone)]
pub enum EditEvent {
    /// Node or run content changed; carries the full snapshot to
    /// persist once the window closes.
    Content(Document),

    /// Caret or range moved. Never persisted.
    SelectionOnly,
}

/// Channel ends handed to the editor surface.
#[derive(Debug, Clone)]
pub struct AutosaveHandle {
    events: mpsc::UnboundedSender<EditEvent>,
    status: watch::Receiver<SaveStatus>,
}

impl AutosaveHandle {
    /// Report a content edit with the current document snapshot.
    pub fn edited(&self, snapshot: Document) {
        let _ = self.events.send(EditEvent::Content(snapshot));
    }

    /// Report a selection-only change.
    pub fn selection_moved(&self) {
        let _ = self.events.send(EditEvent::SelectionOnly);
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<EditEvent> {
        self.events.clone()
    }

    pub fn status(&self) -> SaveStatus {
        *self.status.borrow()
    }

    pub fn status_watch(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }
}

/// The per-component autosave worker.
pub struct Autosave {
    component_id: String,
    store: StoreBackend,
    debouncer: Debouncer,
    status: watch::Sender<SaveStatus>,
    events: mpsc::UnboundedReceiver<EditEvent>,
    saved_reset_at: Option<Instant>,
}

impl Autosave {
    pub fn new(component_id: impl Into<String>, store: StoreBackend) -> (Self, AutosaveHandle) {
        Self::with_window(component_id, store, DEBOUNCE_WINDOW)
    }

    pub fn with_window(
        component_id: impl Into<String>,
        store: StoreBackend,
        window: Duration,
    ) -> (Self, AutosaveHandle) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);

        let autosave = Self {
            component_id: component_id.into(),
            store,
            debouncer: Debouncer::new(window),
            status: status_tx,
            events: event_rx,
            saved_reset_at: None,
        };
        let handle = AutosaveHandle {
            events: event_tx,
            status: status_rx,
        };
        (autosave, handle)
    }

    /// Drive the loop until every handle is dropped, then flush any
    /// pending snapshot so a sub-window edit survives teardown.
    pub async fn run(mut self) {
        loop {
            let deadline = self.debouncer.deadline();
            let reset_at = self.saved_reset_at;

            tokio::select! {
                event = self.events.recv() => match event {
                    Some(EditEvent::Content(snapshot)) => {
                        self.debouncer.schedule(snapshot);
                    }
                    Some(EditEvent::SelectionOnly) => {
                        debug!(component_id = %self.component_id, "selection change, not persisting");
                    }
                    None => break,
                },

                _ = sleep_until(deadline.unwrap_or_else(far_future)), if deadline.is_some() => {
                    if let Some(snapshot) = self.debouncer.flush() {
                        self.save(snapshot).await;
                    }
                }

                _ = sleep_until(reset_at.unwrap_or_else(far_future)), if reset_at.is_some() => {
                    self.saved_reset_at = None;
                    let _ = self.status.send(SaveStatus::Idle);
                }
            }
        }

        if let Some(snapshot) = self.debouncer.flush() {
            self.save(snapshot).await;
        }
    }

    async fn save(&mut self, snapshot: Document) {
        self.saved_reset_at = None;
        let _ = self.status.send(SaveStatus::Saving);

        let patch = ComponentPatch::from_document(&snapshot);
        match self
            .store
            .update_component(&self.component_id, patch)
            .await
        {
            Ok(()) => {
                debug!(component_id = %self.component_id, "component saved");
                let _ = self.status.send(SaveStatus::Saved);
                self.saved_reset_at = Some(Instant::now() + SAVED_RESET_DELAY);
            }
            Err(err) => {
                error!(component_id = %self.component_id, %err, "failed to save component");
                let _ = self.status.send(SaveStatus::Error);
            }
        }
    }
}

fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86400)
}
