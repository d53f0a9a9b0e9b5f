//! Record shapes returned by the hosted store.
//!
//! Field names match the store's column names, so these deserialize
//! straight off the REST responses.

use crate::error::CommonError;
use crate::result::CommonResult;
use chrono::{DateTime, Utc};
use figdocs_doc::Document;
use serde::{Deserialize, Serialize};

/// A design system: a named collection of components linked to one
/// Figma file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSystem {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Key of the linked Figma file; every metadata fetch is scoped to it.
    pub figma_file_key: String,

    #[serde(default)]
    pub theme: Option<String>,

    pub created_by: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One documented component inside a design system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Embed address of the component's Figma preview.
    #[serde(default)]
    pub figma_url: Option<String>,

    /// Identifier of the component set (containing frame) in the Figma
    /// file; the property deriver filters variants by it.
    #[serde(default, rename = "nodeId")]
    pub node_id: Option<String>,

    pub design_system: String,

    /// The persisted documentation node sequence.
    #[serde(default)]
    pub documentation: Document,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    pub created_by: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-user profile, holding the Figma personal access token used for
/// metadata fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,

    #[serde(default)]
    pub figma_token: Option<String>,
}

impl Profile {
    /// The Figma token, required before any metadata fetch. Import and
    /// property views gate on this and show their connect prompt when
    /// it is absent.
    pub fn require_figma_token(&self) -> CommonResult<&str> {
        self.figma_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| CommonError::from("profile has no Figma token"))
    }
}
