use thiserror::Error;

/// Fetch failures are always distinct from legitimately-empty results:
/// a caller that gets `Ok` with no variants renders nothing, a caller
/// that gets one of these renders a "couldn't fetch" state.
#[derive(Error, Debug)]
pub enum FigmaError {
    #[error("Figma token missing or rejected")]
    Unauthorized,

    #[error("Figma file not found: {0}")]
    FileNotFound(String),

    #[error("Figma API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
