//! # Figdocs Persistence Bridge
//!
//! Edits are applied to the in-memory document synchronously; this
//! crate makes them durable, eventually:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ session: commands → document + edit events  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ autosave: debounce window, status machine   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: REST / memory backends               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Guarantees: selection-only changes never reach the store; bursts of
//! edits coalesce into one save carrying the latest snapshot; at most
//! one save per component is in flight; a failed save never rolls back
//! or blocks local editing.

mod autosave;
mod debounce;
mod error;
mod session;
mod store;

pub use autosave::{
    Autosave, AutosaveHandle, EditEvent, SaveStatus, SAVED_RESET_DELAY,
};
pub use debounce::{Debouncer, DEBOUNCE_WINDOW};
pub use error::StoreError;
pub use session::EditorSession;
pub use store::{ComponentPatch, MemoryStore, RecordedSave, RestStore, StoreBackend};
