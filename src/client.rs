//! Gmail API client

use async_trait::async_trait;
use google_gmail1::api::BatchDeleteMessagesRequest;
use tracing::debug;

use crate::auth::{GmailHub, FULL_ACCESS_SCOPE};
use crate::config::CleanupConfig;
use crate::error::Result;
use crate::models::MessagePage;

/// Trait defining the Gmail operations the cleaner needs, for easier testing
#[async_trait]
pub trait GmailClient: Send + Sync {
    /// Fetch one page of message ids matching a query
    ///
    /// `page_token` is the continuation token of the previous page, `None`
    /// for the first request.
    async fn list_messages(&self, query: &str, page_token: Option<String>) -> Result<MessagePage>;

    /// Permanently delete messages in one `batchDelete` call (up to 1000 ids)
    async fn batch_delete(&self, message_ids: &[String]) -> Result<()>;
}

/// Gmail client backed by the google-gmail1 hub
pub struct ProductionGmailClient {
    hub: GmailHub,
    user_id: String,
    page_size: u32,
}

impl ProductionGmailClient {
    /// Create a new production Gmail client
    ///
    /// # Arguments
    /// * `hub` - Gmail API hub instance
    /// * `user_id` - Mailbox to operate on, `me` for the authenticated user
    /// * `page_size` - `maxResults` for list requests
    pub fn new(hub: GmailHub, user_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            hub,
            user_id: user_id.into(),
            page_size,
        }
    }

    pub fn with_config(hub: GmailHub, config: &CleanupConfig) -> Self {
        Self::new(hub, config.user_id.clone(), config.page_size)
    }
}

#[async_trait]
impl GmailClient for ProductionGmailClient {
    async fn list_messages(&self, query: &str, page_token: Option<String>) -> Result<MessagePage> {
        let mut call = self
            .hub
            .users()
            .messages_list(&self.user_id)
            .q(query)
            .max_results(self.page_size);

        if let Some(token) = page_token.as_deref() {
            call = call.page_token(token);
        }

        let (_, response) = call.add_scope(FULL_ACCESS_SCOPE).doit().await?;

        let ids: Vec<String> = response
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|msg_ref| msg_ref.id)
            .collect();

        // Gmail omits the token on the last page; an empty one means the same
        let next_page_token = response.next_page_token.filter(|token| !token.is_empty());

        debug!(
            "Listed {} messages for '{}' (more pages: {})",
            ids.len(),
            query,
            next_page_token.is_some()
        );

        Ok(MessagePage::new(ids, next_page_token))
    }

    async fn batch_delete(&self, message_ids: &[String]) -> Result<()> {
        let request = BatchDeleteMessagesRequest {
            ids: Some(message_ids.to_vec()),
        };

        self.hub
            .users()
            .messages_batch_delete(request, &self.user_id)
            .add_scope(FULL_ACCESS_SCOPE)
            .doit()
            .await?;

        debug!("Batch deleted {} messages", message_ids.len());
        Ok(())
    }
}
