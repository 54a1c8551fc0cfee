//! Token cache and the load / refresh / authorize decision

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::Result;

/// A token expiring within this many seconds is treated as already expired
///
/// Matches the google-auth refresh threshold (3m45s).
pub const EXPIRY_SKEW_SECONDS: i64 = 225;

/// OAuth2 token as persisted in the token cache
///
/// Uses the Google "authorized user" JSON layout so existing `token.json`
/// files written by other Google client libraries load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Bearer access token
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Kept for compatibility with other Google clients; refresh always
    /// goes to Google's default token endpoint
    #[serde(default)]
    pub token_uri: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Access token expiry; `None` means the provider gave no lifetime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// True when the access token has expired (or is about to) at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now >= expiry - Duration::seconds(EXPIRY_SKEW_SECONDS),
            None => false,
        }
    }

    /// True when the token can be used as-is at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && !self.is_expired_at(now)
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token
            .as_deref()
            .map_or(false, |token| !token.is_empty())
    }
}

/// Obtains new tokens from the OAuth2 provider
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Exchange the refresh token of an expired token for a new access token
    async fn refresh(&self, token: &StoredToken) -> Result<StoredToken>;

    /// Run the interactive authorization flow
    async fn authorize(&self) -> Result<StoredToken>;
}

/// Token cache on disk plus the authorizer used when the cache is unusable
pub struct CredentialStore<A> {
    token_path: PathBuf,
    authorizer: A,
}

impl<A: Authorizer> CredentialStore<A> {
    pub fn new(token_path: impl Into<PathBuf>, authorizer: A) -> Self {
        Self {
            token_path: token_path.into(),
            authorizer,
        }
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Return a usable token
    ///
    /// A cached token that is still valid is returned untouched. An expired
    /// token with a refresh token is refreshed; anything else goes through
    /// the interactive flow. New tokens are written back to the cache.
    /// Authorization errors are returned to the caller, never retried.
    pub async fn obtain(&self) -> Result<StoredToken> {
        let cached = self.load().await;
        let now = Utc::now();

        let token = match cached {
            Some(token) if token.is_valid_at(now) => {
                info!("Using cached token from {:?}", self.token_path);
                return Ok(token);
            }
            Some(token) if token.is_expired_at(now) && token.can_refresh() => {
                info!("Access token expired, refreshing");
                let mut refreshed = self.authorizer.refresh(&token).await?;
                if refreshed.refresh_token.is_none() {
                    refreshed.refresh_token = token.refresh_token;
                }
                refreshed
            }
            _ => {
                info!("No usable token found, starting interactive authorization");
                self.authorizer.authorize().await?
            }
        };

        self.save(&token).await?;
        Ok(token)
    }

    /// Read the cached token, `None` when missing or unreadable
    pub async fn load(&self) -> Option<StoredToken> {
        if !self.token_path.exists() {
            debug!("No token cache at {:?}", self.token_path);
            return None;
        }

        let json = match tokio::fs::read_to_string(&self.token_path).await {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to read token cache {:?}: {}", self.token_path, e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Ignoring malformed token cache {:?}: {}", self.token_path, e);
                None
            }
        }
    }

    /// Write a token to the cache
    pub async fn save(&self, token: &StoredToken) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(token)?;
        tokio::fs::write(&self.token_path, json).await?;
        debug!("Saved token to {:?}", self.token_path);
        Ok(())
    }
}
