//! Batched deletion with a dry-run mode

use tracing::{debug, error, info};

use crate::client::GmailClient;
use crate::config::MAX_BATCH_SIZE;
use crate::error::Result;
use crate::models::CleanupTarget;

/// Deletes message ids in fixed-size `batchDelete` chunks
#[derive(Debug, Clone, Copy)]
pub struct DeleteExecutor {
    batch_size: usize,
}

impl Default for DeleteExecutor {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

impl DeleteExecutor {
    /// Batch size is clamped to `1..=MAX_BATCH_SIZE`
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Delete (or, with `simulate`, only report) the given messages
    ///
    /// Returns the number of messages deleted or that would be deleted.
    /// Chunks are sent one after another; if any chunk fails the whole
    /// call reports 0, even when earlier chunks were already deleted.
    pub async fn execute<C>(
        &self,
        client: &C,
        message_ids: &[String],
        simulate: bool,
        target: CleanupTarget,
    ) -> usize
    where
        C: GmailClient + ?Sized,
    {
        if simulate {
            simulate_delete(message_ids, target);
            return message_ids.len();
        }

        if message_ids.is_empty() {
            info!("No messages to delete.");
            return 0;
        }

        match self.delete_in_batches(client, message_ids).await {
            Ok(()) => {
                info!(
                    "Requested deletion of {} messages from {}.",
                    message_ids.len(),
                    target.label()
                );
                message_ids.len()
            }
            Err(e) => {
                error!("Error deleting messages: {}", e);
                0
            }
        }
    }

    async fn delete_in_batches<C>(&self, client: &C, message_ids: &[String]) -> Result<()>
    where
        C: GmailClient + ?Sized,
    {
        let batches = (message_ids.len() + self.batch_size - 1) / self.batch_size;

        for (index, chunk) in message_ids.chunks(self.batch_size).enumerate() {
            client.batch_delete(chunk).await?;
            debug!("Deleted batch {}/{} ({} messages)", index + 1, batches, chunk.len());
        }

        Ok(())
    }
}

fn simulate_delete(message_ids: &[String], target: CleanupTarget) {
    if message_ids.is_empty() {
        info!("No messages to delete in {}.", target.label());
    } else {
        info!(
            "[DRY RUN] {} messages would be deleted from {}.",
            message_ids.len(),
            target.label()
        );
        debug!("Message IDs: {:?}", message_ids);
    }
}
