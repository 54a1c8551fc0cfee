//! Paginated message search

use tracing::{debug, error, info};

use crate::client::GmailClient;
use crate::error::Result;
use crate::models::CleanupTarget;

/// Collect every message id matching the target's query
///
/// Pages are followed until Gmail stops returning a continuation token.
/// A failed request ends the search early: the error is logged and the ids
/// gathered from earlier pages are returned.
pub async fn search<C>(client: &C, target: CleanupTarget) -> Vec<String>
where
    C: GmailClient + ?Sized,
{
    let mut message_ids = Vec::new();

    if let Err(e) = collect_pages(client, target.query(), &mut message_ids).await {
        error!("Error searching {} emails: {}", target.description(), e);
    }

    info!("Found {} {} emails.", message_ids.len(), target.description());
    message_ids
}

async fn collect_pages<C>(client: &C, query: &str, message_ids: &mut Vec<String>) -> Result<()>
where
    C: GmailClient + ?Sized,
{
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = client.list_messages(query, page_token.take()).await?;
        pages += 1;
        debug!("Page {} for '{}': {} messages", pages, query, page.ids.len());

        message_ids.extend(page.ids);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => return Ok(()),
        }
    }
}
