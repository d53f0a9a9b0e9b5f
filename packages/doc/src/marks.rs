//! # Inline Mark Engine
//!
//! Adds and removes character-level formatting over the current
//! selection. Toggling follows the all-or-nothing rule: when every
//! character in the range already carries the mark it is removed from
//! all of them, otherwise it is added to all of them. `is_mark_active`
//! uses the weaker any-character rule, which is what toolbar buttons
//! reflect.
//!
//! Runs are split at the range boundaries so a toggle never bleeds into
//! neighbouring text, then adjacent runs with identical mark sets are
//! merged back together. Void nodes and the title/description pair are
//! skipped: those are plain text by convention.

use crate::model::{Document, InlineRun, Mark, Node};
use crate::selection::Selection;

/// Character span `[from, to)` of the selection within node `index`,
/// or None when the node is outside the selection or ineligible.
fn span_in_node(doc: &Document, sel: &Selection, index: usize) -> Option<(usize, usize)> {
    let (start, end) = (sel.start(), sel.end());
    if index < start.node || index > end.node {
        return None;
    }
    let node = doc.get(index)?;
    if !node.kind.accepts_marks() {
        return None;
    }

    let from = if index == start.node { start.offset } else { 0 };
    let to = if index == end.node {
        end.offset
    } else {
        node.char_len()
    };
    let to = to.min(node.char_len());
    if from >= to {
        return None;
    }
    Some((from, to))
}

/// True when any character in the selection carries the mark. Collapsed
/// selections consult the run the caret sits in, preferring the run that
/// ends at the caret so a just-typed mark stays lit.
pub fn is_mark_active(doc: &Document, sel: &Selection, mark: Mark) -> bool {
    if sel.is_collapsed() {
        let point = sel.anchor;
        let node = match doc.get(point.node) {
            Some(n) if n.kind.accepts_marks() => n,
            _ => return false,
        };
        return run_at(node, point.offset).is_some_and(|run| run.marks.contains(&mark));
    }

    (sel.start().node..=sel.end().node).any(|index| {
        let Some((from, to)) = span_in_node(doc, sel, index) else {
            return false;
        };
        let node = doc.get(index).expect("span implies node");
        runs_overlapping(node, from, to).any(|run| run.marks.contains(&mark))
    })
}

/// True when every selected character carries the mark. Vacuously false
/// for a selection containing no markable characters.
fn every_char_marked(doc: &Document, sel: &Selection, mark: Mark) -> bool {
    let mut saw_any = false;
    for index in sel.start().node..=sel.end().node {
        let Some((from, to)) = span_in_node(doc, sel, index) else {
            continue;
        };
        let node = doc.get(index).expect("span implies node");
        for run in runs_overlapping(node, from, to) {
            saw_any = true;
            if !run.marks.contains(&mark) {
                return false;
            }
        }
    }
    saw_any
}

/// Toggle a mark over the selection. Returns true when the mark ended up
/// applied, false when it was removed or nothing was eligible.
pub fn toggle_mark(doc: &mut Document, sel: &Selection, mark: Mark) -> bool {
    let add = !every_char_marked(doc, sel, mark);

    let mut touched = false;
    for index in sel.start().node..=sel.end().node {
        let Some((from, to)) = span_in_node(doc, sel, index) else {
            continue;
        };
        let node = doc
            .nodes_mut()
            .get_mut(index)
            .expect("span implies node");
        set_mark_in_node(node, from, to, mark, add);
        touched = true;
    }

    add && touched
}

/// Split the node's runs at `from`/`to` and set the mark on the covered
/// middle, then merge equal-marked neighbours back together.
fn set_mark_in_node(node: &mut Node, from: usize, to: usize, mark: Mark, add: bool) {
    let mut out: Vec<InlineRun> = Vec::with_capacity(node.children.len() + 2);
    let mut pos = 0;

    for run in node.children.drain(..) {
        let len = run.char_len();
        let (run_start, run_end) = (pos, pos + len);
        pos = run_end;

        if len == 0 || run_end <= from || run_start >= to {
            out.push(run);
            continue;
        }

        let cut_a = from.saturating_sub(run_start);
        let cut_b = (to - run_start).min(len);
        let chars: Vec<char> = run.text.chars().collect();

        if cut_a > 0 {
            out.push(InlineRun::marked(
                chars[..cut_a].iter().collect::<String>(),
                run.marks.clone(),
            ));
        }

        let mut marks = run.marks.clone();
        if add {
            marks.insert(mark);
        } else {
            marks.remove(&mark);
        }
        out.push(InlineRun::marked(
            chars[cut_a..cut_b].iter().collect::<String>(),
            marks,
        ));

        if cut_b < len {
            out.push(InlineRun::marked(
                chars[cut_b..].iter().collect::<String>(),
                run.marks,
            ));
        }
    }

    node.children = merge_runs(out);
}

/// Merge adjacent runs with identical mark sets and drop empty runs,
/// keeping one empty run when nothing remains.
pub fn merge_runs(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    let mut out: Vec<InlineRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.marks == run.marks => last.text.push_str(&run.text),
            _ => out.push(run),
        }
    }
    if out.is_empty() {
        out.push(InlineRun::plain(""));
    }
    out
}

fn run_at(node: &Node, offset: usize) -> Option<&InlineRun> {
    let mut pos = 0;
    for run in &node.children {
        let end = pos + run.char_len();
        // Bias to the run ending at the caret.
        if offset > pos && offset <= end {
            return Some(run);
        }
        pos = end;
    }
    node.children.first().filter(|_| offset == 0)
}

fn runs_overlapping(node: &Node, from: usize, to: usize) -> impl Iterator<Item = &InlineRun> {
    let mut pos = 0;
    node.children.iter().filter(move |run| {
        let (start, end) = (pos, pos + run.char_len());
        pos = end;
        end > from && start < to && start != end
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MarkSet, NodeKind};
    use crate::selection::Point;

    fn doc_with_paragraph(text: &str) -> Document {
        let mut doc = Document::new_skeleton("t", None);
        doc.nodes_mut()[4] = Node::paragraph(text);
        doc
    }

    fn para_sel(from: usize, to: usize) -> Selection {
        Selection::range(Point::new(4, from), Point::new(4, to))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut doc = doc_with_paragraph("hello world");
        let sel = para_sel(0, 5);

        assert!(toggle_mark(&mut doc, &sel, Mark::Bold));
        assert!(is_mark_active(&doc, &sel, Mark::Bold));
        assert_eq!(doc.get(4).unwrap().children.len(), 2);
        assert_eq!(doc.get(4).unwrap().children[0].text, "hello");

        assert!(!toggle_mark(&mut doc, &sel, Mark::Bold));
        assert!(!is_mark_active(&doc, &sel, Mark::Bold));
        // Runs merge back into one after the round trip.
        assert_eq!(doc.get(4).unwrap().children.len(), 1);
        assert_eq!(doc.get(4).unwrap().text(), "hello world");
    }

    #[test]
    fn test_toggle_round_trip_restores_state() {
        let original = doc_with_paragraph("hello world");
        let sel = para_sel(3, 8);

        let mut doc = original.clone();
        toggle_mark(&mut doc, &sel, Mark::Bold);
        toggle_mark(&mut doc, &sel, Mark::Bold);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_mixed_selection_becomes_fully_marked() {
        let mut doc = doc_with_paragraph("hello world");
        toggle_mark(&mut doc, &para_sel(0, 5), Mark::Italic);

        // "hello" italic, " world" plain: toggling the whole line adds.
        toggle_mark(&mut doc, &para_sel(0, 11), Mark::Italic);
        let node = doc.get(4).unwrap();
        assert_eq!(node.children.len(), 1);
        assert!(node.children[0].marks.contains(&Mark::Italic));
    }

    #[test]
    fn test_split_preserves_existing_marks() {
        let mut doc = doc_with_paragraph("abcdef");
        toggle_mark(&mut doc, &para_sel(0, 6), Mark::Bold);
        toggle_mark(&mut doc, &para_sel(2, 4), Mark::Code);

        let node = doc.get(4).unwrap();
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[1].text, "cd");
        assert!(node.children[1].marks.contains(&Mark::Bold));
        assert!(node.children[1].marks.contains(&Mark::Code));
        assert!(!node.children[0].marks.contains(&Mark::Code));
    }

    #[test]
    fn test_active_is_any_character() {
        let mut doc = doc_with_paragraph("hello world");
        toggle_mark(&mut doc, &para_sel(0, 5), Mark::Bold);

        // Only part of this range is bold, but that lights the button.
        assert!(is_mark_active(&doc, &para_sel(3, 11), Mark::Bold));
        assert!(!is_mark_active(&doc, &para_sel(6, 11), Mark::Bold));
    }

    #[test]
    fn test_collapsed_caret_reads_preceding_run() {
        let mut doc = doc_with_paragraph("hello world");
        toggle_mark(&mut doc, &para_sel(0, 5), Mark::Bold);

        let caret = Selection::caret(Point::new(4, 5));
        assert!(is_mark_active(&doc, &caret, Mark::Bold));

        let caret = Selection::caret(Point::new(4, 7));
        assert!(!is_mark_active(&doc, &caret, Mark::Bold));
    }

    #[test]
    fn test_title_and_voids_are_skipped() {
        let mut doc = Document::new_skeleton("Button", None);
        let all = Selection::range(Point::new(0, 0), Point::new(4, 0));

        assert!(!toggle_mark(&mut doc, &all, Mark::Bold));
        for node in doc.nodes() {
            for run in &node.children {
                assert!(run.marks.is_empty());
            }
        }
        assert!(!is_mark_active(&doc, &all, Mark::Bold));
    }

    #[test]
    fn test_cross_node_toggle() {
        let mut doc = doc_with_paragraph("first");
        doc.nodes_mut().push(Node::paragraph("second"));

        let sel = Selection::range(Point::new(4, 2), Point::new(5, 3));
        toggle_mark(&mut doc, &sel, Mark::Underline);

        assert_eq!(doc.get(4).unwrap().children[1].text, "rst");
        assert!(doc.get(4).unwrap().children[1]
            .marks
            .contains(&Mark::Underline));
        assert_eq!(doc.get(5).unwrap().children[0].text, "sec");
        assert!(doc.get(5).unwrap().children[0]
            .marks
            .contains(&Mark::Underline));
        assert!(doc.get(5).unwrap().children[1].marks.is_empty());
    }

    #[test]
    fn test_merge_runs_collapses_equal_marks() {
        let mut marks = MarkSet::new();
        marks.insert(Mark::Bold);
        let merged = merge_runs(vec![
            InlineRun::marked("a", marks.clone()),
            InlineRun::marked("b", marks.clone()),
            InlineRun::plain("c"),
            InlineRun::plain(""),
            InlineRun::plain("d"),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "ab");
        assert_eq!(merged[1].text, "cd");
    }

    #[test]
    fn test_props_node_never_marked() {
        let mut doc = Document::new_skeleton("t", None);
        let sel = Selection::range(Point::new(3, 0), Point::new(3, 0));
        assert!(!toggle_mark(&mut doc, &sel, Mark::Code));
        assert_eq!(doc.get(3).unwrap().kind, NodeKind::Props);
    }
}
