//! Common test utilities and fixtures

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use gmail_cleaner::client::GmailClient;
use gmail_cleaner::credentials::{Authorizer, StoredToken};
use gmail_cleaner::error::Result;
use gmail_cleaner::models::MessagePage;
use mockall::mock;

/// Create `count` message ids `<prefix>-0`, `<prefix>-1`, ...
pub fn message_ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}-{}", prefix, i)).collect()
}

/// Create a list page from string slices
pub fn page(ids: &[&str], next_page_token: Option<&str>) -> MessagePage {
    MessagePage::new(
        ids.iter().map(|id| id.to_string()).collect(),
        next_page_token.map(|t| t.to_string()),
    )
}

/// Create a cached token with the given access token and expiry
pub fn create_test_token(access: &str, expiry: Option<DateTime<Utc>>) -> StoredToken {
    StoredToken {
        token: access.to_string(),
        refresh_token: Some("refresh-token".to_string()),
        token_uri: "https://oauth2.googleapis.com/token".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        scopes: vec!["https://mail.google.com/".to_string()],
        expiry,
    }
}

/// A token that expired an hour ago
pub fn expired_token(access: &str) -> StoredToken {
    create_test_token(access, Some(Utc::now() - Duration::hours(1)))
}

/// A token valid for another hour
pub fn fresh_token(access: &str) -> StoredToken {
    create_test_token(access, Some(Utc::now() + Duration::hours(1)))
}

// Mock implementation of GmailClient for testing
mock! {
    pub GmailClient {}

    #[async_trait::async_trait]
    impl GmailClient for GmailClient {
        async fn list_messages(&self, query: &str, page_token: Option<String>) -> Result<MessagePage>;
        async fn batch_delete(&self, message_ids: &[String]) -> Result<()>;
    }
}

// Mock implementation of Authorizer for testing
mock! {
    pub Authorizer {}

    #[async_trait::async_trait]
    impl Authorizer for Authorizer {
        async fn refresh(&self, token: &StoredToken) -> Result<StoredToken>;
        async fn authorize(&self) -> Result<StoredToken>;
    }
}
