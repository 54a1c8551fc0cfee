//! Gmail Cleaner
//!
//! Removes inbox messages older than one year and everything in the spam
//! folder through the Gmail API, with a dry-run mode that only reports.
//!
//! # Overview
//!
//! - **Authentication**: OAuth2 installed-app flow with a cached, refreshable token
//! - **Search**: paginated `messages.list` queries for each cleanup target
//! - **Deletion**: sequential `messages.batchDelete` calls of up to 1000 ids
//!
//! # Example Usage
//!
//! ```no_run
//! use gmail_cleaner::{auth, cli, client::ProductionGmailClient, config::Config};
//! use gmail_cleaner::credentials::CredentialStore;
//! use gmail_cleaner::deleter::DeleteExecutor;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     auth::install_crypto_provider()?;
//!     let config = Config::load("config.toml".as_ref()).await?;
//!
//!     let store = CredentialStore::new(
//!         &config.auth.token_cache,
//!         auth::InstalledFlowAuthorizer::new("credentials.json"),
//!     );
//!     let token = store.obtain().await?;
//!
//!     let client = ProductionGmailClient::with_config(
//!         auth::initialize_gmail_hub(&token).await?,
//!         &config.cleanup,
//!     );
//!     let report = cli::run_cleanup(&client, &DeleteExecutor::default(), true).await;
//!     println!("{}", report.summary());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - yup-oauth2 authorizer and Gmail hub construction
//! - [`cli`] - Command-line interface and cleanup pipeline
//! - [`client`] - Gmail client trait and production implementation
//! - [`config`] - Configuration management
//! - [`credentials`] - Token cache and refresh/authorize decision
//! - [`deleter`] - Batched deletion and dry-run reporting
//! - [`error`] - Error types and result aliases
//! - [`models`] - Core data structures
//! - [`search`] - Paginated message search

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod deleter;
pub mod error;
pub mod models;
pub mod search;

// Re-export commonly used types for convenience
pub use error::{GmailError, Result};

pub use models::{CleanupTarget, MessagePage};

pub use config::{AuthConfig, CleanupConfig, Config};

pub use client::{GmailClient, ProductionGmailClient};

pub use credentials::{Authorizer, CredentialStore, StoredToken};

pub use deleter::DeleteExecutor;

pub use cli::{Cli, Report};
