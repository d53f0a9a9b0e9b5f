//! # Document Model
//!
//! The persisted shape of one component's documentation: an ordered
//! sequence of block nodes, each holding a flat list of inline runs.
//!
//! The serialized form is exactly what the hosted store receives in the
//! `documentation` column: `kind` as a discriminant string, `children` as
//! an array of `{ text, marks }` objects. Void kinds (embed, props) carry
//! a single empty run so the stored shape stays uniform.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Character-level inline formatting attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

/// Ordered mark set. BTreeSet keeps serialization deterministic.
pub type MarkSet = BTreeSet<Mark>;

/// One formatted run of text inside a block node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRun {
    pub text: String,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub marks: MarkSet,
}

impl InlineRun {
    /// Unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: MarkSet::new(),
        }
    }

    /// Run carrying the given marks.
    pub fn marked(text: impl Into<String>, marks: MarkSet) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Block-level node kinds.
///
/// `Embed` and `Props` are void: their content is system-derived (the
/// Figma preview and the derived property table) and never edited by
/// keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Title,
    Description,
    Embed,
    Props,
    Paragraph,
    #[serde(rename = "heading-one")]
    Heading1,
    #[serde(rename = "heading-two")]
    Heading2,
    #[serde(rename = "list-item")]
    ListItem,
}

impl NodeKind {
    pub fn is_void(&self) -> bool {
        matches!(self, NodeKind::Embed | NodeKind::Props)
    }

    /// Title and Description are plain-text by convention: the mark
    /// engine skips them even though the schema does not forbid marks.
    pub fn accepts_marks(&self) -> bool {
        !self.is_void() && !matches!(self, NodeKind::Title | NodeKind::Description)
    }
}

/// One block of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,

    pub children: Vec<InlineRun>,

    /// External preview address. Only meaningful on `Embed` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<InlineRun>) -> Self {
        Self {
            kind,
            children,
            url: None,
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Title, vec![InlineRun::plain(text)])
    }

    pub fn description(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Description, vec![InlineRun::plain(text)])
    }

    pub fn embed(url: Option<String>) -> Self {
        Self {
            kind: NodeKind::Embed,
            children: vec![InlineRun::plain("")],
            url,
        }
    }

    pub fn props() -> Self {
        Self::new(NodeKind::Props, vec![InlineRun::plain("")])
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph, vec![InlineRun::plain(text)])
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.children.iter().map(|r| r.text.as_str()).collect()
    }

    /// Total length in characters across runs.
    pub fn char_len(&self) -> usize {
        self.children.iter().map(|r| r.char_len()).sum()
    }
}

/// The full ordered node sequence for one component.
///
/// Serialization is transparent: a `Document` round-trips as the bare
/// node array the store persists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    nodes: Vec<Node>,
}

/// Placeholder shown when the title node is empty.
pub const TITLE_PLACEHOLDER: &str = "Untitled";

/// Placeholder shown when the description node is empty.
pub const DESCRIPTION_PLACEHOLDER: &str = "Enter description here...";

impl Document {
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Five-node skeleton created when a component is imported from a
    /// Figma file: title, description, preview embed, derived prop table,
    /// one empty trailing paragraph.
    pub fn new_skeleton(title: impl Into<String>, embed_url: Option<String>) -> Self {
        Self {
            nodes: vec![
                Node::title(title),
                Node::description(""),
                Node::embed(embed_url),
                Node::props(),
                Node::paragraph(""),
            ],
        }
    }

    /// Minimal title + paragraph skeleton created by the manual
    /// create-component flow. Normalization upgrades it to the full
    /// layout on first edit.
    pub fn two_node_skeleton(title: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::title(title), Node::paragraph("")],
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Raw text of the title node. The store's `title` column is always
    /// re-derived from this at save time.
    pub fn title_text(&self) -> String {
        self.nodes.first().map(|n| n.text()).unwrap_or_default()
    }

    /// Title with the empty-text placeholder applied.
    pub fn title_display(&self) -> String {
        let text = self.title_text();
        if text.is_empty() {
            TITLE_PLACEHOLDER.to_string()
        } else {
            text
        }
    }

    pub fn description_text(&self) -> String {
        self.nodes.get(1).map(|n| n.text()).unwrap_or_default()
    }

    /// Description with the empty-text placeholder applied.
    pub fn description_display(&self) -> String {
        let text = self.description_text();
        if text.is_empty() {
            DESCRIPTION_PLACEHOLDER.to_string()
        } else {
            text
        }
    }

    /// Parse a stored documentation value. The caller still runs
    /// `normalize` afterwards; this only rejects JSON that is not a
    /// node sequence at all.
    pub fn from_json(json: &str) -> Result<Self, crate::errors::DocError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, crate::errors::DocError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_serialization_omits_empty_marks() {
        let run = InlineRun::plain("hello");
        let json = serde_json::to_string(&run).unwrap();
        assert_eq!(json, r#"{"text":"hello"}"#);
    }

    #[test]
    fn test_run_serialization_lists_marks_in_order() {
        let mut marks = MarkSet::new();
        marks.insert(Mark::Italic);
        marks.insert(Mark::Bold);

        let run = InlineRun::marked("hi", marks);
        let json = serde_json::to_string(&run).unwrap();
        assert_eq!(json, r#"{"text":"hi","marks":["bold","italic"]}"#);
    }

    #[test]
    fn test_node_kind_discriminants() {
        assert_eq!(
            serde_json::to_string(&NodeKind::Title).unwrap(),
            r#""title""#
        );
        assert_eq!(
            serde_json::to_string(&NodeKind::Heading1).unwrap(),
            r#""heading-one""#
        );
    }

    #[test]
    fn test_void_kinds() {
        assert!(NodeKind::Embed.is_void());
        assert!(NodeKind::Props.is_void());
        assert!(!NodeKind::Paragraph.is_void());
        assert!(!NodeKind::Title.is_void());
    }

    #[test]
    fn test_marks_skip_title_and_description() {
        assert!(!NodeKind::Title.accepts_marks());
        assert!(!NodeKind::Description.accepts_marks());
        assert!(!NodeKind::Props.accepts_marks());
        assert!(NodeKind::Paragraph.accepts_marks());
        assert!(NodeKind::ListItem.accepts_marks());
    }

    #[test]
    fn test_document_serializes_as_bare_array() {
        let doc = Document::two_node_skeleton("Button");
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["kind"], "title");
        assert_eq!(json[0]["children"][0]["text"], "Button");
    }

    #[test]
    fn test_title_placeholder() {
        let doc = Document::new_skeleton("", None);
        assert_eq!(doc.title_text(), "");
        assert_eq!(doc.title_display(), "Untitled");
        assert_eq!(doc.description_display(), "Enter description here...");
    }

    #[test]
    fn test_from_json_rejects_non_sequences() {
        assert!(Document::from_json(r#"{"kind":"title"}"#).is_err());

        let doc =
            Document::from_json(r#"[{"kind":"title","children":[{"text":"Button"}]}]"#).unwrap();
        assert_eq!(doc.title_text(), "Button");
        let round = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(round, doc);
    }

    #[test]
    fn test_skeleton_shape() {
        let doc = Document::new_skeleton("Card", Some("https://example.test/embed".into()));
        let kinds: Vec<NodeKind> = doc.nodes().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Title,
                NodeKind::Description,
                NodeKind::Embed,
                NodeKind::Props,
                NodeKind::Paragraph,
            ]
        );
        assert_eq!(
            doc.get(2).unwrap().url.as_deref(),
            Some("https://example.test/embed")
        );
    }
}
