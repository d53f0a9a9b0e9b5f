use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store rejected update with status {0}")]
    Rejected(u16),

    #[error("component not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("save failed: {0}")]
    Failed(String),
}
