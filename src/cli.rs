//! Command-line interface and cleanup pipeline

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::client::GmailClient;
use crate::deleter::DeleteExecutor;
use crate::models::CleanupTarget;
use crate::search;

#[derive(Parser, Debug)]
#[command(name = "gmail-cleaner")]
#[command(version)]
#[command(about = "Gmail Cleaner Utility: Delete spam and old inbox emails.", long_about = None)]
pub struct Cli {
    /// Path to OAuth2 credentials file
    #[arg(long, default_value = "credentials.json")]
    pub credentials: PathBuf,

    /// Simulate deletions without actually deleting emails
    #[arg(long)]
    pub dry_run: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Verbose logging (lists message IDs during a dry run)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of one cleanup run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub dry_run: bool,
    pub inbox_deleted: usize,
    pub spam_deleted: usize,
}

impl Report {
    pub fn summary(&self) -> String {
        if self.dry_run {
            format!(
                "[DRY RUN] Would have deleted {} old inbox emails and {} spam emails.",
                self.inbox_deleted, self.spam_deleted
            )
        } else {
            format!(
                "Deleted {} old inbox emails and {} spam emails.",
                self.inbox_deleted, self.spam_deleted
            )
        }
    }
}

/// Search both targets, then delete (or simulate deleting) what was found
///
/// All searches finish before any deletion starts.
pub async fn run_cleanup<C>(client: &C, executor: &DeleteExecutor, dry_run: bool) -> Report
where
    C: GmailClient + ?Sized,
{
    if dry_run {
        info!("Running in DRY RUN mode - no messages will be deleted");
    }

    let old_inbox_ids = search::search(client, CleanupTarget::OldInbox).await;
    let spam_ids = search::search(client, CleanupTarget::Spam).await;

    let inbox_deleted = executor
        .execute(client, &old_inbox_ids, dry_run, CleanupTarget::OldInbox)
        .await;
    let spam_deleted = executor
        .execute(client, &spam_ids, dry_run, CleanupTarget::Spam)
        .await;

    let report = Report {
        dry_run,
        inbox_deleted,
        spam_deleted,
    };
    info!("{}", report.summary());
    report
}
