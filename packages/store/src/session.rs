//! # Editor Session
//!
//! Binds one component id to its in-memory document, the current
//! selection, and the autosave channel. Commands apply synchronously -
//! the user always sees the edit immediately - and persistence lags by
//! the debounce window.
//!
//! Dependencies arrive through the constructor (the autosave handle is
//! built from an explicit store backend); nothing reads ambient
//! globals.

use crate::autosave::{AutosaveHandle, SaveStatus};
use figdocs_common::ComponentRecord;
use figdocs_doc::{
    apply, command_for_key, is_mark_active, ChangeKind, Command, DocError, Document, KeyEvent,
    Mark, Selection,
};

pub struct EditorSession {
    component_id: String,
    document: Document,
    selection: Selection,
    autosave: AutosaveHandle,
}

impl EditorSession {
    /// Open a session over a loaded document. The document is repaired
    /// on entry, so even a corrupted stored sequence renders validly.
    pub fn new(
        component_id: impl Into<String>,
        mut document: Document,
        autosave: AutosaveHandle,
    ) -> Self {
        document.normalize();
        Self {
            component_id: component_id.into(),
            document,
            selection: Selection::default(),
            autosave,
        }
    }

    /// Open a session over a record loaded from the store.
    pub fn from_record(record: &ComponentRecord, autosave: AutosaveHandle) -> Self {
        Self::new(record.id.clone(), record.documentation.clone(), autosave)
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    /// Apply one command; content changes are reported to autosave with
    /// the full post-edit snapshot, selection-only changes are not.
    pub fn command(&mut self, command: &Command) -> Result<ChangeKind, DocError> {
        let change = apply(&mut self.document, command)?;

        if let Some(caret) = change.caret {
            self.selection = Selection::caret(caret);
        }
        if let Command::SetSelection { selection } = command {
            self.selection = selection.clamped(&self.document);
        }

        match change.kind {
            ChangeKind::Content => self.autosave.edited(self.document.clone()),
            ChangeKind::SelectionOnly => self.autosave.selection_moved(),
        }
        Ok(change.kind)
    }

    /// Route a key press: formatting hotkeys first, insertion second.
    pub fn key_press(&mut self, event: KeyEvent) -> Result<Option<ChangeKind>, DocError> {
        match command_for_key(event, self.selection) {
            Some(command) => self.command(&command).map(Some),
            None => Ok(None),
        }
    }

    /// Whether the toolbar button for a mark should light up.
    pub fn mark_active(&self, mark: Mark) -> bool {
        is_mark_active(&self.document, &self.selection, mark)
    }
}
