//! # Property Derivation
//!
//! Figma encodes a variant's properties in its name: comma-separated
//! `key=value` segments like `"Size=Small, State=Hover"`. This module
//! turns the variant names of one component set into a property table:
//! one row per property, with the set of observed values and an
//! inferred type.
//!
//! Type inference is deliberately narrow: a property is `Boolean` only
//! when every observed value is literally `"True"` or `"False"`
//! (case-sensitive exact match); everything else is `String`.

use crate::rest::FileResponse;
use serde::{Deserialize, Serialize};

/// Inferred type of one variant property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropType {
    Boolean,
    String,
}

impl std::fmt::Display for PropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropType::Boolean => write!(f, "Boolean"),
            PropType::String => write!(f, "String"),
        }
    }
}

/// One row of the derived property table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRow {
    pub name: String,

    /// De-duplicated observed values, in first-seen order.
    pub values: Vec<String>,

    #[serde(rename = "type")]
    pub prop_type: PropType,
}

/// Parse one variant name into `(key, value)` pairs.
///
/// Segments split on `,`, each pair on the first `=`. A segment without
/// `=` never aborts the derivation: it yields the trimmed segment as a
/// key with an empty value.
pub fn parse_variant_name(name: &str) -> Vec<(String, String)> {
    name.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (segment.to_string(), String::new()),
        })
        .collect()
}

/// Derive the property table from a set of variant names.
///
/// Row order is the union of keys in first-seen order; values are the
/// de-duplicated observations for that key, also in first-seen order.
pub fn derive_rows<'a, I>(variant_names: I) -> Vec<PropertyRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rows: Vec<PropertyRow> = Vec::new();

    for name in variant_names {
        for (key, value) in parse_variant_name(name) {
            let row = match rows.iter_mut().find(|row| row.name == key) {
                Some(row) => row,
                None => {
                    rows.push(PropertyRow {
                        name: key,
                        values: Vec::new(),
                        prop_type: PropType::String,
                    });
                    rows.last_mut().expect("just pushed")
                }
            };
            if !row.values.contains(&value) {
                row.values.push(value);
            }
        }
    }

    for row in &mut rows {
        row.prop_type = infer_type(&row.values);
    }
    rows
}

/// Property table for the component set `node_id`, from the variant
/// entries of a full-file response. `None` when the file has no
/// variants for that set - callers render nothing rather than an empty
/// table, keeping "no data" distinct from "fetch failed".
pub fn derive_for_set(file: &FileResponse, node_id: &str) -> Option<Vec<PropertyRow>> {
    let names: Vec<&str> = file
        .components
        .values()
        .filter(|component| component.component_set_id.as_deref() == Some(node_id))
        .map(|component| component.name.as_str())
        .collect();

    if names.is_empty() {
        return None;
    }
    Some(derive_rows(names))
}

fn infer_type(values: &[String]) -> PropType {
    let boolean = !values.is_empty()
        && values
            .iter()
            .all(|value| value == "True" || value == "False");
    if boolean {
        PropType::Boolean
    } else {
        PropType::String
    }
}
