//! Typed shapes of the Figma REST responses this system reads.
//!
//! Only the fields the derivation and import paths consume are modeled;
//! everything else in the payloads is ignored on deserialize.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `GET /v1/files/{key}` - file name plus the component and style maps,
/// both keyed by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResponse {
    pub name: String,

    #[serde(default)]
    pub components: HashMap<String, FileComponent>,

    #[serde(default)]
    pub styles: HashMap<String, FileStyle>,
}

/// One component entry in the file response. Variants point at their
/// component set through `componentSetId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileComponent {
    #[serde(default)]
    pub key: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, rename = "componentSetId")]
    pub component_set_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStyle {
    #[serde(default)]
    pub key: String,

    pub name: String,

    #[serde(default, rename = "styleType")]
    pub style_type: String,

    #[serde(default)]
    pub description: String,
}

/// `GET /v1/files/{key}/components` - the published component list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedComponentsResponse {
    #[serde(default)]
    pub meta: Option<ComponentsMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentsMeta {
    #[serde(default)]
    pub components: Vec<PublishedComponent>,
}

/// One published component. For a variant, `name` encodes the
/// property=value pairs and `containing_frame` names the component set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedComponent {
    #[serde(default)]
    pub key: String,

    pub node_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub containing_frame: Option<ContainingFrame>,
}

/// The frame (component set) a published component lives in. Field
/// names inside this object are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainingFrame {
    #[serde(default, rename = "nodeId")]
    pub node_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "pageName")]
    pub page_name: Option<String>,
}

/// `GET /v1/files/{key}/styles` - the published style list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedStylesResponse {
    #[serde(default)]
    pub meta: Option<StylesMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylesMeta {
    #[serde(default)]
    pub styles: Vec<PublishedStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedStyle {
    #[serde(default)]
    pub key: String,

    pub node_id: String,

    pub name: String,

    #[serde(default)]
    pub style_type: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl PublishedComponent {
    /// Node id of the component set this variant belongs to, when the
    /// containing frame is known.
    pub fn set_node_id(&self) -> Option<&str> {
        self.containing_frame
            .as_ref()
            .and_then(|frame| frame.node_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_response_ignores_unknown_fields() {
        let json = r#"{
            "name": "Design System",
            "lastModified": "2023-01-10T10:00:00Z",
            "components": {
                "1:2": {"key": "k1", "name": "Size=Small", "componentSetId": "9:9"}
            },
            "document": {"id": "0:0"}
        }"#;

        let file: FileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(file.name, "Design System");
        assert_eq!(
            file.components["1:2"].component_set_id.as_deref(),
            Some("9:9")
        );
        assert!(file.styles.is_empty());
    }

    #[test]
    fn test_published_components_wire_shape() {
        let json = r#"{
            "meta": {
                "components": [
                    {
                        "key": "abc",
                        "node_id": "1:2",
                        "name": "Size=Small, State=Default",
                        "containing_frame": {
                            "nodeId": "9:9",
                            "name": "Button",
                            "pageName": "Components"
                        }
                    }
                ]
            }
        }"#;

        let response: PublishedComponentsResponse = serde_json::from_str(json).unwrap();
        let components = response.meta.unwrap().components;
        assert_eq!(components[0].set_node_id(), Some("9:9"));
        assert_eq!(
            components[0].containing_frame.as_ref().unwrap().page_name,
            Some("Components".to_string())
        );
    }

    #[test]
    fn test_component_without_frame() {
        let json = r#"{"node_id": "3:1", "name": "Logo"}"#;
        let component: PublishedComponent = serde_json::from_str(json).unwrap();
        assert_eq!(component.set_node_id(), None);
    }
}
