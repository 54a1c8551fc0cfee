use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GmailError, Result};

/// Largest number of ids Gmail accepts in one `batchDelete` call
pub const MAX_BATCH_SIZE: usize = 1000;

/// Largest `maxResults` Gmail accepts for `messages.list`
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_cache")]
    pub token_cache: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_cache: default_token_cache(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            page_size: default_page_size(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_token_cache() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_user_id() -> String {
    "me".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GmailError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config = Self::parse(&content)?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Parse and validate TOML configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| GmailError::ConfigError(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.auth.token_cache.as_os_str().is_empty() {
            return Err(GmailError::ConfigError(
                "auth.token_cache cannot be empty".to_string(),
            ));
        }

        if self.cleanup.user_id.trim().is_empty() {
            return Err(GmailError::ConfigError(
                "cleanup.user_id cannot be empty".to_string(),
            ));
        }

        if self.cleanup.page_size == 0 {
            return Err(GmailError::ConfigError(
                "cleanup.page_size must be at least 1".to_string(),
            ));
        }
        if self.cleanup.page_size > MAX_PAGE_SIZE {
            return Err(GmailError::ConfigError(format!(
                "cleanup.page_size cannot exceed {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.cleanup.batch_size == 0 {
            return Err(GmailError::ConfigError(
                "cleanup.batch_size must be at least 1".to_string(),
            ));
        }
        if self.cleanup.batch_size > MAX_BATCH_SIZE {
            return Err(GmailError::ConfigError(format!(
                "cleanup.batch_size cannot exceed {} (Gmail batchDelete limit)",
                MAX_BATCH_SIZE
            )));
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
