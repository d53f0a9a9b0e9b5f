//! # Import Planner
//!
//! Turns the published component list of a file into the set of
//! component sets a design system can still import: collapse variants
//! to their containing frames, subtract what was already imported, and
//! attach the variant names plus the embed URL each candidate needs.

use crate::rest::PublishedComponent;
use figdocs_doc::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One importable component set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportCandidate {
    pub name: String,

    /// Node id of the component set frame.
    pub node_id: String,

    #[serde(default)]
    pub page_name: Option<String>,

    /// Names of the published variants inside the set.
    pub variants: Vec<String>,

    /// Live-embed address stored on the imported component.
    pub figma_url: String,
}

impl ImportCandidate {
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// The five-node documentation skeleton inserted when this
    /// candidate is imported.
    pub fn skeleton(&self) -> Document {
        Document::new_skeleton(self.name.clone(), Some(self.figma_url.clone()))
    }
}

/// Embed address for a node of the file, in the shape the preview
/// surface consumes. Whitespace becomes `-` so the address survives
/// file names with spaces.
pub fn embed_url(file_key: &str, file_name: &str, node_id: &str) -> String {
    let url = format!(
        "https://www.figma.com/embed?embed_host=astra&url=https://www.figma.com/file/{file_key}/{file_name}?node-id={node_id}"
    );
    url.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Collapse the published component list to unique component sets and
/// drop the ones already imported.
///
/// A component with an unnamed containing frame stands for itself: its
/// own name and node id identify the set. First occurrence wins when
/// several variants share a frame.
pub fn plan_import(
    file_key: &str,
    file_name: &str,
    published: &[PublishedComponent],
    existing_node_ids: &HashSet<String>,
) -> Vec<ImportCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates: Vec<ImportCandidate> = Vec::new();

    for component in published {
        let (node_id, name, page_name) = match &component.containing_frame {
            Some(frame) => {
                let node_id = frame
                    .node_id
                    .clone()
                    .unwrap_or_else(|| component.node_id.clone());
                let name = frame.name.clone().unwrap_or_else(|| component.name.clone());
                (node_id, name, frame.page_name.clone())
            }
            None => (component.node_id.clone(), component.name.clone(), None),
        };

        if !seen.insert(node_id.clone()) || existing_node_ids.contains(&node_id) {
            continue;
        }

        let variants: Vec<String> = published
            .iter()
            .filter(|candidate| candidate.set_node_id() == Some(node_id.as_str()))
            .map(|candidate| candidate.name.clone())
            .collect();

        let figma_url = embed_url(file_key, file_name, &node_id);
        candidates.push(ImportCandidate {
            name,
            node_id,
            page_name,
            variants,
            figma_url,
        });
    }

    candidates
}
