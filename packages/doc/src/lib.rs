//! # Figdocs Document Model
//!
//! Core editing engine for component documentation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ commands: key events → semantic operations  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model + marks: node sequence, inline runs   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ schema: repair pass after every operation   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every document holds the same fixed layout: title, description, an
//! embedded Figma preview, the derived property table, then free-form
//! rich text. The schema repair pass runs after every command, so the
//! layout invariant holds no matter what the user deletes or retypes.
//!
//! The serialized form (`kind` discriminant, `children` run array) is
//! exactly what the hosted store persists in the `documentation` column;
//! load → normalize → save → reload reproduces an equivalent document.
//!
//! ## Usage
//!
//! ```rust
//! use figdocs_doc::{apply, Command, Document, Point};
//!
//! let mut doc = Document::new_skeleton("Button", None);
//!
//! let change = apply(
//!     &mut doc,
//!     &Command::InsertText {
//!         at: Point::new(4, 0),
//!         text: "Buttons trigger actions.".to_string(),
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(doc.title_text(), "Button");
//! # let _ = change;
//! ```

mod commands;
mod errors;
mod marks;
mod model;
mod schema;
mod selection;

pub use commands::{
    apply, command_for_key, hotkey_mark, Change, ChangeKind, Command, KeyEvent, HOTKEYS,
};
pub use errors::DocError;
pub use marks::{is_mark_active, merge_runs, toggle_mark};
pub use model::{
    Document, InlineRun, Mark, MarkSet, Node, NodeKind, DESCRIPTION_PLACEHOLDER,
    TITLE_PLACEHOLDER,
};
pub use schema::{default_node_at, normalize, normalize_in_place, FREE_TAIL_START, MANDATED_KINDS};
pub use selection::{Point, Selection};
