use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "figdocs.config.json";

const DEFAULT_TOKEN_ENV: &str = "FIGMA_TOKEN";

/// Figdocs configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Default Figma file key for commands that take none
    #[serde(default)]
    pub figma_file_key: Option<String>,

    /// Figma API base URL override (tests, proxies)
    #[serde(default)]
    pub figma_api_url: Option<String>,

    /// Environment variable holding the Figma personal access token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// The Figma token, from the configured environment variable.
    pub fn token(&self) -> Result<String> {
        std::env::var(&self.token_env)
            .map_err(|_| anyhow!("Figma token missing: set the {} env var", self.token_env))
    }

    /// File key from the command line, falling back to the config.
    pub fn resolve_file_key(&self, flag: Option<String>) -> Result<String> {
        flag.or_else(|| self.figma_file_key.clone()).ok_or_else(|| {
            anyhow!(
                "no Figma file key: pass --file-key or set figmaFileKey in {DEFAULT_CONFIG_NAME}"
            )
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            figma_file_key: None,
            figma_api_url: None,
            token_env: default_token_env(),
        }
    }
}
