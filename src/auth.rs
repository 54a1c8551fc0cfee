//! OAuth2 authentication management for Gmail API

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use google_gmail1::{hyper_rustls, hyper_util, yup_oauth2, Gmail};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use yup_oauth2::authorized_user::AuthorizedUserSecret;
use yup_oauth2::storage::{TokenInfo, TokenStorage};
use yup_oauth2::ApplicationSecret;

use crate::credentials::{Authorizer, StoredToken};
use crate::error::{GmailError, Result};

/// Full mailbox scope; `messages.batchDelete` accepts nothing narrower
pub const FULL_ACCESS_SCOPE: &str = "https://mail.google.com/";

/// Scopes requested during authorization and refresh
pub const REQUIRED_SCOPES: &[&str] = &[FULL_ACCESS_SCOPE];

/// Type alias for Gmail Hub to simplify type signatures
pub type GmailHub = Gmail<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>;

/// Install the process-wide rustls crypto provider
///
/// Must run before any TLS client (authenticator or hub) is built.
pub fn install_crypto_provider() -> Result<()> {
    // On non-Windows platforms, use aws-lc-rs; on Windows, use ring
    #[cfg(not(windows))]
    let provider = rustls::crypto::aws_lc_rs::default_provider();
    #[cfg(windows)]
    let provider = rustls::crypto::ring::default_provider();

    provider.install_default().map_err(|_| {
        GmailError::AuthError("Failed to install default crypto provider".to_string())
    })
}

/// Build a Gmail hub authenticated with `token`
///
/// When the token carries a refresh token and client pair, the hub gets a
/// yup-oauth2 authenticator that refreshes the access token on expiry, so a
/// long run outlives the cached token. The token cache is not rewritten.
/// Otherwise the access token is used as a fixed bearer.
pub async fn initialize_gmail_hub(token: &StoredToken) -> Result<GmailHub> {
    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| {
                    GmailError::AuthError(format!("Failed to load TLS roots: {}", e))
                })?
                .https_only()
                .enable_http1()
                .build(),
        );

    if let Some(secret) = hub_refresh_secret(token) {
        let auth = yup_oauth2::AuthorizedUserAuthenticator::builder(secret)
            .build()
            .await
            .map_err(|e| GmailError::AuthError(format!("Failed to build authenticator: {}", e)))?;
        tracing::debug!("Gmail hub refreshes its access token on expiry");
        return Ok(Gmail::new(client, auth));
    }

    tracing::debug!("No refresh token available, Gmail hub uses a fixed access token");
    Ok(Gmail::new(client, token.token.clone()))
}

/// Secret for a refreshing hub authenticator, `None` if the token cannot refresh
fn hub_refresh_secret(token: &StoredToken) -> Option<AuthorizedUserSecret> {
    if !token.can_refresh() || token.client_id.is_empty() {
        return None;
    }

    Some(authorized_user_secret(
        token.client_id.clone(),
        token.client_secret.clone(),
        token.refresh_token.clone()?,
    ))
}

fn authorized_user_secret(
    client_id: String,
    client_secret: String,
    refresh_token: String,
) -> AuthorizedUserSecret {
    AuthorizedUserSecret {
        client_id,
        client_secret,
        refresh_token,
        key_type: "authorized_user".to_string(),
    }
}

/// Authorizer using the installed-app flow from an OAuth2 client secrets file
pub struct InstalledFlowAuthorizer {
    credentials_path: PathBuf,
}

impl InstalledFlowAuthorizer {
    /// # Arguments
    /// * `credentials_path` - Path to the OAuth2 client secrets JSON file
    pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
        }
    }

    async fn read_secret(&self) -> Result<ApplicationSecret> {
        yup_oauth2::read_application_secret(&self.credentials_path)
            .await
            .map_err(|e| {
                GmailError::AuthError(format!(
                    "Failed to read credentials from {:?}: {}",
                    self.credentials_path, e
                ))
            })
    }
}

#[async_trait]
impl Authorizer for InstalledFlowAuthorizer {
    async fn refresh(&self, token: &StoredToken) -> Result<StoredToken> {
        let refresh_token = token
            .refresh_token
            .clone()
            .ok_or_else(|| GmailError::AuthError("Token has no refresh token".to_string()))?;

        // Older caches may lack the client pair; fall back to the secrets file
        let (client_id, client_secret) = if token.client_id.is_empty() {
            let secret = self.read_secret().await?;
            (secret.client_id, secret.client_secret)
        } else {
            (token.client_id.clone(), token.client_secret.clone())
        };

        let secret =
            authorized_user_secret(client_id.clone(), client_secret.clone(), refresh_token.clone());

        let auth = yup_oauth2::AuthorizedUserAuthenticator::builder(secret)
            .build()
            .await
            .map_err(|e| GmailError::AuthError(format!("Failed to build authenticator: {}", e)))?;

        let access = auth
            .token(REQUIRED_SCOPES)
            .await
            .map_err(|e| GmailError::AuthError(format!("Failed to refresh token: {}", e)))?;

        let access_token = access
            .token()
            .ok_or_else(|| GmailError::AuthError("Refresh returned no access token".to_string()))?
            .to_string();

        Ok(StoredToken {
            token: access_token,
            refresh_token: Some(refresh_token),
            token_uri: token.token_uri.clone(),
            client_id,
            client_secret,
            scopes: token.scopes.clone(),
            expiry: access
                .expiration_time()
                .and_then(|at| DateTime::<Utc>::from_timestamp(at.unix_timestamp(), 0)),
        })
    }

    async fn authorize(&self) -> Result<StoredToken> {
        let secret = self.read_secret().await?;
        let captured = CapturedToken::default();

        // HTTPRedirect opens a local listener on a random port for the browser redirect
        let auth = yup_oauth2::InstalledFlowAuthenticator::builder(
            secret.clone(),
            yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
        )
        .with_storage(Box::new(captured.clone()))
        .build()
        .await
        .map_err(|e| GmailError::AuthError(format!("Failed to build authenticator: {}", e)))?;

        auth.token(REQUIRED_SCOPES)
            .await
            .map_err(|e| GmailError::AuthError(format!("Failed to obtain token: {}", e)))?;

        let info = captured.take().ok_or_else(|| {
            GmailError::AuthError("Authorization flow returned no token".to_string())
        })?;

        let access_token = info.access_token.ok_or_else(|| {
            GmailError::AuthError("Authorization flow returned no access token".to_string())
        })?;

        Ok(StoredToken {
            token: access_token,
            refresh_token: info.refresh_token,
            token_uri: secret.token_uri,
            client_id: secret.client_id,
            client_secret: secret.client_secret,
            scopes: REQUIRED_SCOPES.iter().map(|s| s.to_string()).collect(),
            expiry: info
                .expires_at
                .and_then(|at| DateTime::<Utc>::from_timestamp(at.unix_timestamp(), 0)),
        })
    }
}

/// In-memory yup-oauth2 storage that keeps the raw token, refresh token included
#[derive(Clone, Default)]
struct CapturedToken(Arc<Mutex<Option<TokenInfo>>>);

impl CapturedToken {
    fn take(&self) -> Option<TokenInfo> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[async_trait]
impl TokenStorage for CapturedToken {
    async fn set(&self, _scopes: &[&str], token: TokenInfo) -> anyhow::Result<()> {
        let mut slot = self
            .0
            .lock()
            .map_err(|_| anyhow::anyhow!("token capture lock poisoned"))?;
        *slot = Some(token);
        Ok(())
    }

    async fn get(&self, _scopes: &[&str]) -> Option<TokenInfo> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }
}
