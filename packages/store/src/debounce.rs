//! # Debouncer
//!
//! Explicit state machine for coalescing edit bursts: a pending payload
//! plus a deadline, owned by the persistence bridge. No timers hide in
//! closures; lifecycle operations (`flush` on teardown, `cancel` on
//! abandon) are plain calls a test can drive.

use figdocs_doc::Document;
use std::time::Duration;
use tokio::time::Instant;

/// Quiet period after the last edit before a save fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<Document>,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Record the latest snapshot and restart the quiet period. Earlier
    /// snapshots scheduled within the window are superseded.
    pub fn schedule(&mut self, snapshot: Document) {
        self.pending = Some(snapshot);
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Take the pending snapshot immediately, clearing the deadline.
    pub fn flush(&mut self) -> Option<Document> {
        self.deadline = None;
        self.pending.take()
    }

    /// Drop the pending snapshot without saving it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// When the pending snapshot becomes due, if one is scheduled.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str) -> Document {
        Document::new_skeleton(title, None)
    }

    #[test]
    fn test_schedule_then_flush_returns_latest() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule(doc("one"));
        debouncer.schedule(doc("two"));

        let flushed = debouncer.flush().unwrap();
        assert_eq!(flushed.title_text(), "two");
        assert!(!debouncer.is_pending());
        assert!(debouncer.deadline().is_none());
    }

    #[test]
    fn test_flush_without_pending_is_none() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.flush().is_none());
    }

    #[test]
    fn test_cancel_drops_payload() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule(doc("one"));
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert!(debouncer.flush().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_extends_deadline() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(doc("one"));
        let first = debouncer.deadline().unwrap();

        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.schedule(doc("two"));
        let second = debouncer.deadline().unwrap();

        assert_eq!(second - first, Duration::from_millis(100));
    }
}
