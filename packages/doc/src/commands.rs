//! # Edit Commands
//!
//! High-level semantic operations on a documentation document.
//!
//! Each command is validated, applied, and followed by the schema repair
//! pass, so callers always observe a document satisfying the fixed
//! layout. Applying a command reports whether it changed content or only
//! the selection - the persistence bridge uses that distinction to skip
//! saves for caret movement.
//!
//! Keyboard behavior worth calling out:
//! - Enter in the title moves the caret into the description instead of
//!   splitting (the title is single-line by policy).
//! - Enter in the description jumps past the embed/props void block into
//!   the first paragraph.
//! - Formatting hotkeys are resolved before default text insertion and
//!   fully suppress it.

use crate::errors::DocError;
use crate::marks;
use crate::model::{Document, InlineRun, Mark, Node, NodeKind};
use crate::schema::{self, FREE_TAIL_START};
use crate::selection::{Point, Selection};
use serde::{Deserialize, Serialize};

/// Hotkey table: `mod` + key toggles the mark.
pub const HOTKEYS: [(char, Mark); 4] = [
    ('b', Mark::Bold),
    ('i', Mark::Italic),
    ('u', Mark::Underline),
    ('`', Mark::Code),
];

/// Mark bound to a `mod`+key chord, if any.
pub fn hotkey_mark(key: char) -> Option<Mark> {
    HOTKEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, mark)| *mark)
}

/// A key press as the editor surface reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: char,
    /// Cmd on macOS, Ctrl elsewhere.
    pub modifier: bool,
}

/// Resolve a key press against the current selection. Hotkeys win over
/// plain insertion; unknown chords resolve to nothing.
pub fn command_for_key(event: KeyEvent, selection: Selection) -> Option<Command> {
    if event.modifier {
        return hotkey_mark(event.key).map(|mark| Command::ToggleMark {
            range: selection,
            mark,
        });
    }
    Some(Command::InsertText {
        at: selection.start(),
        text: event.key.to_string(),
    })
}

/// Semantic edit operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Insert text at a caret position.
    InsertText { at: Point, text: String },

    /// Delete the character before the caret, merging paragraphs when
    /// the caret sits at a block start.
    DeleteBackward { at: Point },

    /// Delete every character in the range.
    DeleteRange { range: Selection },

    /// Enter key.
    SplitNode { at: Point },

    /// Remove a whole node. Mandated positions are repaired immediately.
    RemoveNode { index: usize },

    /// Retype a node. Mandated positions are repaired immediately.
    SetKind { index: usize, kind: NodeKind },

    /// Toggle an inline mark over the range.
    ToggleMark { range: Selection, mark: Mark },

    /// Move the caret or selection. Never persisted.
    SetSelection { selection: Selection },
}

/// What a command did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Node or run content changed; the document must be persisted.
    Content,
    /// Only the selection moved.
    SelectionOnly,
}

/// Outcome of applying one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub kind: ChangeKind,
    /// Where the caret lands, when the command implies a move.
    pub caret: Option<Point>,
}

impl Change {
    fn content(caret: Option<Point>) -> Self {
        Self {
            kind: ChangeKind::Content,
            caret,
        }
    }

    fn selection_only(caret: Option<Point>) -> Self {
        Self {
            kind: ChangeKind::SelectionOnly,
            caret,
        }
    }
}

/// Apply a command, then re-run the schema repair pass. The returned
/// caret is already clamped to the repaired document.
pub fn apply(doc: &mut Document, command: &Command) -> Result<Change, DocError> {
    let mut change = dispatch(doc, command)?;
    doc.normalize();
    change.caret = change.caret.map(|p| p.clamped(doc));
    Ok(change)
}

fn dispatch(doc: &mut Document, command: &Command) -> Result<Change, DocError> {
    match command {
        Command::InsertText { at, text } => insert_text(doc, *at, text),
        Command::DeleteBackward { at } => delete_backward(doc, *at),
        Command::DeleteRange { range } => delete_range(doc, *range),
        Command::SplitNode { at } => split_node(doc, *at),
        Command::RemoveNode { index } => remove_node(doc, *index),
        Command::SetKind { index, kind } => set_kind(doc, *index, *kind),
        Command::ToggleMark { range, mark } => {
            let touched = range_touches_markable(doc, range);
            marks::toggle_mark(doc, range, *mark);
            if touched {
                Ok(Change::content(None))
            } else {
                Ok(Change::selection_only(None))
            }
        }
        Command::SetSelection { selection } => {
            Ok(Change::selection_only(Some(selection.start())))
        }
    }
}

fn node_at(doc: &Document, index: usize) -> Result<&Node, DocError> {
    doc.get(index).ok_or(DocError::NodeNotFound(index))
}

fn insert_text(doc: &mut Document, at: Point, text: &str) -> Result<Change, DocError> {
    let node = node_at(doc, at.node)?;
    if node.kind.is_void() {
        // Keystrokes never reach void content.
        return Ok(Change::selection_only(Some(at)));
    }
    let len = node.char_len();
    if at.offset > len {
        return Err(DocError::OffsetOutOfRange {
            node: at.node,
            offset: at.offset,
            len,
        });
    }
    if text.is_empty() {
        return Ok(Change::selection_only(Some(at)));
    }

    let node = &mut doc.nodes_mut()[at.node];
    if node.children.is_empty() {
        node.children.push(InlineRun::plain(""));
    }
    let (run_index, local) = run_position(node, at.offset);
    let run = &mut node.children[run_index];
    let byte = byte_offset(&run.text, local);
    run.text.insert_str(byte, text);

    let caret = Point::new(at.node, at.offset + text.chars().count());
    Ok(Change::content(Some(caret)))
}

fn delete_backward(doc: &mut Document, at: Point) -> Result<Change, DocError> {
    let node = node_at(doc, at.node)?;
    if node.kind.is_void() {
        return Ok(Change::selection_only(Some(at)));
    }

    if at.offset == 0 {
        return merge_with_previous(doc, at.node);
    }

    let range = Selection::range(Point::new(at.node, at.offset - 1), at);
    delete_range(doc, range)
}

/// Backspace at a block start joins the node into its predecessor, but
/// only between free-tail rich-text nodes. The title has nothing above
/// it, the description will not merge into the single-line title, and
/// the first paragraph will not merge across the void block.
fn merge_with_previous(doc: &mut Document, index: usize) -> Result<Change, DocError> {
    node_at(doc, index)?;
    if index <= FREE_TAIL_START {
        return Ok(Change::selection_only(Some(Point::new(index, 0))));
    }
    let prev = index - 1;
    if doc.get(prev).map(|n| n.kind.is_void()).unwrap_or(true) {
        return Ok(Change::selection_only(Some(Point::new(index, 0))));
    }

    let removed = doc.nodes_mut().remove(index);
    let target = &mut doc.nodes_mut()[prev];
    let caret = Point::new(prev, target.char_len());
    let mut runs = std::mem::take(&mut target.children);
    runs.extend(removed.children);
    target.children = marks::merge_runs(runs);
    Ok(Change::content(Some(caret)))
}

fn delete_range(doc: &mut Document, range: Selection) -> Result<Change, DocError> {
    if range.is_collapsed() {
        return Ok(Change::selection_only(Some(range.start())));
    }
    let (start, end) = (range.start(), range.end());
    node_at(doc, start.node)?;
    node_at(doc, end.node)?;

    if start.node == end.node {
        let node = &mut doc.nodes_mut()[start.node];
        if node.kind.is_void() {
            return Ok(Change::selection_only(Some(start)));
        }
        remove_chars(node, start.offset, end.offset);
        return Ok(Change::content(Some(start)));
    }

    // Multi-node ranges trim the boundary nodes and drop the interior.
    // Void nodes inside the range are left for the repair pass, which
    // reinstates the mandated block anyway.
    for index in (start.node + 1..end.node).rev() {
        doc.nodes_mut().remove(index);
    }
    let end_node = start.node + 1;
    {
        let node = &mut doc.nodes_mut()[end_node];
        if !node.kind.is_void() {
            let upper = end.offset.min(node.char_len());
            remove_chars(node, 0, upper);
        }
    }
    {
        let node = &mut doc.nodes_mut()[start.node];
        if !node.kind.is_void() {
            let len = node.char_len();
            remove_chars(node, start.offset.min(len), len);
        }
    }
    Ok(Change::content(Some(start)))
}

fn split_node(doc: &mut Document, at: Point) -> Result<Change, DocError> {
    let node = node_at(doc, at.node)?;

    match node.kind {
        // Single-line by policy: the caret drops into the description.
        NodeKind::Title => Ok(Change::selection_only(Some(Point::new(1, 0)))),

        // Jump past the embed/props block into the body. The repair
        // pass guarantees the paragraph is there.
        NodeKind::Description => {
            Ok(Change::selection_only(Some(Point::new(FREE_TAIL_START, 0))))
        }

        kind if kind.is_void() => Ok(Change::selection_only(Some(at))),

        _ => {
            let node = &mut doc.nodes_mut()[at.node];
            let tail_runs = split_runs(node, at.offset);
            let kind = node.kind;
            doc.nodes_mut()
                .insert(at.node + 1, Node::new(kind, tail_runs));
            Ok(Change::content(Some(Point::new(at.node + 1, 0))))
        }
    }
}

fn remove_node(doc: &mut Document, index: usize) -> Result<Change, DocError> {
    node_at(doc, index)?;
    doc.nodes_mut().remove(index);
    Ok(Change::content(Some(Point::new(index.saturating_sub(1), 0))))
}

fn set_kind(doc: &mut Document, index: usize, kind: NodeKind) -> Result<Change, DocError> {
    node_at(doc, index)?;
    let node = &mut doc.nodes_mut()[index];
    if node.kind == kind {
        return Ok(Change::selection_only(None));
    }
    node.kind = kind;
    if kind.is_void() {
        node.children = vec![InlineRun::plain("")];
    }
    if kind != NodeKind::Embed {
        node.url = None;
    }
    Ok(Change::content(None))
}

fn range_touches_markable(doc: &Document, range: &Selection) -> bool {
    if range.is_collapsed() {
        return false;
    }
    let (start, end) = (range.start(), range.end());
    (start.node..=end.node).any(|index| {
        doc.get(index)
            .map(|node| {
                if !node.kind.accepts_marks() {
                    return false;
                }
                let from = if index == start.node { start.offset } else { 0 };
                let to = if index == end.node {
                    end.offset.min(node.char_len())
                } else {
                    node.char_len()
                };
                from < to
            })
            .unwrap_or(false)
    })
}

/// Run index + offset within that run for a character offset in a node.
fn run_position(node: &Node, offset: usize) -> (usize, usize) {
    let mut pos = 0;
    for (index, run) in node.children.iter().enumerate() {
        let end = pos + run.char_len();
        if offset <= end {
            return (index, offset - pos);
        }
        pos = end;
    }
    let last = node.children.len().saturating_sub(1);
    (last, node.children.get(last).map(|r| r.char_len()).unwrap_or(0))
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Remove characters `[from, to)` across the node's runs.
fn remove_chars(node: &mut Node, from: usize, to: usize) {
    if from >= to {
        return;
    }
    let mut out: Vec<InlineRun> = Vec::with_capacity(node.children.len());
    let mut pos = 0;
    for run in node.children.drain(..) {
        let len = run.char_len();
        let (run_start, run_end) = (pos, pos + len);
        pos = run_end;

        if run_end <= from || run_start >= to {
            out.push(run);
            continue;
        }
        let keep_head = from.saturating_sub(run_start);
        let keep_tail_from = (to - run_start).min(len);
        let chars: Vec<char> = run.text.chars().collect();
        let mut text: String = chars[..keep_head].iter().collect();
        text.extend(chars[keep_tail_from..].iter());
        out.push(InlineRun::marked(text, run.marks));
    }
    node.children = marks::merge_runs(out);
}

/// Split a node's runs at a character offset, truncating the node and
/// returning the tail runs with their marks intact.
fn split_runs(node: &mut Node, offset: usize) -> Vec<InlineRun> {
    let mut head: Vec<InlineRun> = Vec::new();
    let mut tail: Vec<InlineRun> = Vec::new();
    let mut pos = 0;

    for run in node.children.drain(..) {
        let len = run.char_len();
        let (run_start, run_end) = (pos, pos + len);
        pos = run_end;

        if run_end <= offset {
            head.push(run);
        } else if run_start >= offset {
            tail.push(run);
        } else {
            let cut = offset - run_start;
            let chars: Vec<char> = run.text.chars().collect();
            head.push(InlineRun::marked(
                chars[..cut].iter().collect::<String>(),
                run.marks.clone(),
            ));
            tail.push(InlineRun::marked(
                chars[cut..].iter().collect::<String>(),
                run.marks,
            ));
        }
    }

    node.children = marks::merge_runs(head);
    marks::merge_runs(tail)
}
