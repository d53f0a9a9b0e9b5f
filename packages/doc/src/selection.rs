//! Caret and range positions over the flat node sequence.
//!
//! A point addresses a character boundary: node index plus character
//! offset across that node's runs. A selection is an anchor/focus pair;
//! collapsed means caret. Focus may precede anchor (backwards drag), so
//! consumers use `start()`/`end()` for the ordered ends.

use crate::model::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub node: usize,
    pub offset: usize,
}

impl Point {
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Clamp to a valid position within the document.
    pub fn clamped(self, doc: &Document) -> Self {
        if doc.is_empty() {
            return Self::new(0, 0);
        }
        let node = self.node.min(doc.len() - 1);
        let offset = self.offset.min(doc.get(node).map(|n| n.char_len()).unwrap_or(0));
        Self { node, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn caret(point: Point) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn range(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start(&self) -> Point {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> Point {
        self.anchor.max(self.focus)
    }

    pub fn clamped(self, doc: &Document) -> Self {
        Self {
            anchor: self.anchor.clamped(doc),
            focus: self.focus.clamped(doc),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::caret(Point::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    #[test]
    fn test_collapsed() {
        let sel = Selection::caret(Point::new(0, 3));
        assert!(sel.is_collapsed());

        let sel = Selection::range(Point::new(0, 3), Point::new(1, 0));
        assert!(!sel.is_collapsed());
    }

    #[test]
    fn test_backwards_range_orders_ends() {
        let sel = Selection::range(Point::new(4, 7), Point::new(4, 2));
        assert_eq!(sel.start(), Point::new(4, 2));
        assert_eq!(sel.end(), Point::new(4, 7));
    }

    #[test]
    fn test_clamp_to_document() {
        let doc = Document::new_skeleton("Button", None);
        let point = Point::new(99, 99).clamped(&doc);
        assert_eq!(point.node, 4);
        assert_eq!(point.offset, 0);

        let point = Point::new(0, 99).clamped(&doc);
        assert_eq!(point, Point::new(0, 6));
    }
}
