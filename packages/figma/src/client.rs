//! # Figma REST Client
//!
//! Thin async wrapper over the three metadata reads this system makes.
//! Auth is the personal access token in the `X-Figma-Token` header.
//! Failures map onto distinct variants so callers can tell a rejected
//! token from a missing file from a network fault.

use crate::error::FigmaError;
use crate::rest::{
    FileResponse, PublishedComponent, PublishedComponentsResponse, PublishedStyle,
    PublishedStylesResponse,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com";

const USER_AGENT: &str = "figdocs";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl FigmaClient {
    pub fn new(token: impl Into<String>) -> Result<Self, FigmaError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Point the client somewhere else (tests, proxies).
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, FigmaError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Full file metadata: name, component map, style map.
    pub async fn file(&self, file_key: &str) -> Result<FileResponse, FigmaError> {
        self.get_json(file_key, &format!("/v1/files/{file_key}"))
            .await
    }

    /// Published components of the file. An unpublished file yields an
    /// empty list, not an error.
    pub async fn published_components(
        &self,
        file_key: &str,
    ) -> Result<Vec<PublishedComponent>, FigmaError> {
        let response: PublishedComponentsResponse = self
            .get_json(file_key, &format!("/v1/files/{file_key}/components"))
            .await?;
        Ok(response.meta.map(|meta| meta.components).unwrap_or_default())
    }

    /// Published styles of the file.
    pub async fn published_styles(
        &self,
        file_key: &str,
    ) -> Result<Vec<PublishedStyle>, FigmaError> {
        let response: PublishedStylesResponse = self
            .get_json(file_key, &format!("/v1/files/{file_key}/styles"))
            .await?;
        Ok(response.meta.map(|meta| meta.styles).unwrap_or_default())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        file_key: &str,
        path: &str,
    ) -> Result<T, FigmaError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching figma metadata");

        let response = self
            .http
            .get(&url)
            .header("X-Figma-Token", &self.token)
            .send()
            .await?;

        let status = response.status();
        if let Some(error) = classify_status(status.as_u16(), file_key) {
            return Err(error);
        }
        Ok(response.json::<T>().await?)
    }
}

/// Map a non-success status onto the matching error. Success statuses
/// map to None.
pub fn classify_status(status: u16, file_key: &str) -> Option<FigmaError> {
    match status {
        200..=299 => None,
        401 | 403 => Some(FigmaError::Unauthorized),
        404 => Some(FigmaError::FileNotFound(file_key.to_string())),
        other => Some(FigmaError::Api {
            status: other,
            message: format!("unexpected response for file {file_key}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        assert!(classify_status(200, "abc").is_none());
        assert!(classify_status(204, "abc").is_none());
    }

    #[test]
    fn test_classify_auth_failures() {
        assert!(matches!(
            classify_status(401, "abc"),
            Some(FigmaError::Unauthorized)
        ));
        assert!(matches!(
            classify_status(403, "abc"),
            Some(FigmaError::Unauthorized)
        ));
    }

    #[test]
    fn test_classify_missing_file() {
        match classify_status(404, "abc") {
            Some(FigmaError::FileNotFound(key)) => assert_eq!(key, "abc"),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_statuses() {
        assert!(matches!(
            classify_status(429, "abc"),
            Some(FigmaError::Api { status: 429, .. })
        ));
        assert!(matches!(
            classify_status(500, "abc"),
            Some(FigmaError::Api { status: 500, .. })
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = FigmaClient::with_base_url("token", "http://localhost:9999/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
