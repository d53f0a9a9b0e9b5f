//! # Fixed-Position Schema & Normalizer
//!
//! Every documentation document must satisfy one layout:
//!
//! ```text
//! 0: title         (plain text, single line)
//! 1: description   (plain text)
//! 2: embed         (void - external preview)
//! 3: props         (void - derived property table)
//! 4+: paragraph / heading / list-item (rich text)
//! ```
//!
//! The normalizer is the repair pass that restores this invariant after
//! any edit: missing mandated nodes are appended in schema order, nodes
//! of the wrong kind at a mandated position are retyped in place, and
//! void kinds that stray into the free tail are downgraded to paragraphs.
//! It runs after every edit operation, before the document is rendered
//! or persisted, so the invariant never visibly breaks.
//!
//! Normalization is pure and idempotent: `normalize(normalize(n)) ==
//! normalize(n)` for any input, including empty, truncated, and
//! reordered sequences.

use crate::model::{Document, InlineRun, Node, NodeKind};

/// Kinds mandated for positions 0 through 4. Position 4 is the trailing
/// paragraph appended when shorter documents are repaired; beyond it the
/// tail is unconstrained apart from the no-stray-voids rule.
pub const MANDATED_KINDS: [NodeKind; 5] = [
    NodeKind::Title,
    NodeKind::Description,
    NodeKind::Embed,
    NodeKind::Props,
    NodeKind::Paragraph,
];

/// Index of the first unconstrained position.
pub const FREE_TAIL_START: usize = 4;

/// Repair a node sequence in place. Returns true if anything changed.
pub fn normalize_in_place(nodes: &mut Vec<Node>) -> bool {
    let mut changed = false;

    // Retype the mandated prefix. Children are preserved where the target
    // kind allows; a retype into or out of a void kind resets content,
    // since void content is system-derived.
    for (index, kind) in MANDATED_KINDS.iter().take(FREE_TAIL_START).enumerate() {
        if let Some(node) = nodes.get_mut(index) {
            if node.kind != *kind {
                retype(node, *kind);
                changed = true;
            }
        }
    }

    // Append whatever is missing, through the trailing paragraph.
    while nodes.len() < MANDATED_KINDS.len() {
        nodes.push(default_node_at(nodes.len()));
        changed = true;
    }

    // Voids never live in the free tail.
    for node in nodes.iter_mut().skip(FREE_TAIL_START) {
        if node.kind.is_void() {
            retype(node, NodeKind::Paragraph);
            changed = true;
        }
    }

    // Every node keeps at least one run so character offsets stay valid.
    for node in nodes.iter_mut() {
        if node.children.is_empty() {
            node.children.push(InlineRun::plain(""));
            changed = true;
        }
    }

    changed
}

/// Pure form of the repair pass.
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    let mut nodes = nodes;
    normalize_in_place(&mut nodes);
    nodes
}

/// The node inserted when position `index` is missing entirely.
pub fn default_node_at(index: usize) -> Node {
    match MANDATED_KINDS.get(index) {
        Some(NodeKind::Title) => Node::title(""),
        Some(NodeKind::Description) => Node::description(""),
        Some(NodeKind::Embed) => Node::embed(None),
        Some(NodeKind::Props) => Node::props(),
        _ => Node::paragraph(""),
    }
}

fn retype(node: &mut Node, kind: NodeKind) {
    let was_void = node.kind.is_void();
    node.kind = kind;

    if kind.is_void() || was_void {
        node.children = vec![InlineRun::plain("")];
    }
    if kind != NodeKind::Embed {
        node.url = None;
    }
}

impl Document {
    /// Run the schema repair pass. Returns true if the document changed.
    pub fn normalize(&mut self) -> bool {
        normalize_in_place(self.nodes_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mark, MarkSet};

    fn kinds(nodes: &[Node]) -> Vec<NodeKind> {
        nodes.iter().map(|n| n.kind).collect()
    }

    #[test]
    fn test_empty_sequence_builds_full_skeleton() {
        let nodes = normalize(vec![]);
        assert_eq!(kinds(&nodes), MANDATED_KINDS);
    }

    #[test]
    fn test_truncated_sequence_appends_missing() {
        let nodes = normalize(vec![Node::title("Button"), Node::description("A button")]);
        assert_eq!(kinds(&nodes), MANDATED_KINDS);
        assert_eq!(nodes[0].text(), "Button");
        assert_eq!(nodes[1].text(), "A button");
    }

    #[test]
    fn test_wrong_kind_is_retyped_preserving_text() {
        let nodes = normalize(vec![
            Node::paragraph("actually the title"),
            Node::paragraph("actually the description"),
        ]);
        assert_eq!(nodes[0].kind, NodeKind::Title);
        assert_eq!(nodes[0].text(), "actually the title");
        assert_eq!(nodes[1].kind, NodeKind::Description);
        assert_eq!(nodes[1].text(), "actually the description");
    }

    #[test]
    fn test_retype_into_void_drops_content() {
        let nodes = normalize(vec![
            Node::title("t"),
            Node::description("d"),
            Node::paragraph("leaked text"),
        ]);
        assert_eq!(nodes[2].kind, NodeKind::Embed);
        assert_eq!(nodes[2].text(), "");
    }

    #[test]
    fn test_deleted_embed_is_repaired() {
        // User deleted the embed at position 2: everything shifts up.
        let nodes = normalize(vec![
            Node::title("t"),
            Node::description("d"),
            Node::props(),
            Node::paragraph("body"),
        ]);
        assert_eq!(kinds(&nodes)[..4], MANDATED_KINDS[..4]);
    }

    #[test]
    fn test_stray_void_in_tail_becomes_paragraph() {
        let mut input = Document::new_skeleton("t", None).into_nodes();
        input.push(Node::embed(Some("https://example.test".into())));
        let nodes = normalize(input);
        assert_eq!(nodes[5].kind, NodeKind::Paragraph);
        assert_eq!(nodes[5].url, None);
    }

    #[test]
    fn test_tail_headings_are_left_alone() {
        let mut input = Document::new_skeleton("t", None).into_nodes();
        input.push(Node::new(
            NodeKind::Heading1,
            vec![InlineRun::plain("Usage")],
        ));
        input.push(Node::new(
            NodeKind::ListItem,
            vec![InlineRun::plain("point")],
        ));
        let nodes = normalize(input);
        assert_eq!(nodes[5].kind, NodeKind::Heading1);
        assert_eq!(nodes[6].kind, NodeKind::ListItem);
    }

    #[test]
    fn test_marks_survive_retype_between_text_kinds() {
        let mut marks = MarkSet::new();
        marks.insert(Mark::Bold);
        let nodes = normalize(vec![Node::new(
            NodeKind::Heading1,
            vec![InlineRun::marked("loud title", marks.clone())],
        )]);
        assert_eq!(nodes[0].kind, NodeKind::Title);
        assert_eq!(nodes[0].children[0].marks, marks);
    }

    #[test]
    fn test_idempotent_on_arbitrary_input() {
        let inputs = vec![
            vec![],
            vec![Node::props()],
            vec![Node::embed(None), Node::embed(None), Node::title("x")],
            vec![
                Node::paragraph("a"),
                Node::props(),
                Node::title("b"),
                Node::paragraph("c"),
                Node::embed(None),
                Node::props(),
            ],
            Document::new_skeleton("ok", None).into_nodes(),
        ];

        for input in inputs {
            let once = normalize(input.clone());
            let twice = normalize(once.clone());
            assert_eq!(once, twice, "normalize must be idempotent for {input:?}");
        }
    }

    #[test]
    fn test_two_node_skeleton_upgrade() {
        let mut doc = Document::two_node_skeleton("Button");
        assert!(doc.normalize());
        assert_eq!(kinds(doc.nodes()), MANDATED_KINDS);
        // The old paragraph at index 1 becomes the description, keeping
        // whatever the user had typed there.
        assert_eq!(doc.nodes()[1].kind, NodeKind::Description);
    }

    #[test]
    fn test_normalized_document_reports_no_change() {
        let mut doc = Document::new_skeleton("Button", None);
        assert!(!doc.normalize());
    }
}
