//! # Figdocs Figma Metadata
//!
//! Everything this system reads from the Figma REST API, and what it
//! derives from those reads.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ client: authenticated REST reads            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ cache: per-file-key TTL + shared fetches    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ props / import: derived tables and plans    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Fetch failures (bad token, missing file, network) stay distinct from
//! legitimately-empty results at every layer: `FigmaError` is never
//! conflated with "zero variants".

mod cache;
mod client;
mod error;
mod import;
mod props;
mod rest;

pub use cache::{MetadataCache, DEFAULT_TTL};
pub use client::{classify_status, FigmaClient, DEFAULT_BASE_URL};
pub use error::FigmaError;
pub use import::{embed_url, plan_import, ImportCandidate};
pub use props::{derive_for_set, derive_rows, parse_variant_name, PropType, PropertyRow};
pub use rest::{
    ComponentsMeta, ContainingFrame, FileComponent, FileResponse, FileStyle,
    PublishedComponent, PublishedComponentsResponse, PublishedStyle, PublishedStylesResponse,
    StylesMeta,
};
