//! End-to-end tests of the cleanup sequence against a mocked Gmail client

mod common;

use common::{page, MockGmailClient};
use gmail_cleaner::cli::{run_cleanup, Report};
use gmail_cleaner::deleter::DeleteExecutor;
use gmail_cleaner::error::GmailError;
use mockall::Sequence;

const INBOX_QUERY: &str = "in:inbox older_than:1y";
const SPAM_QUERY: &str = "in:spam";

#[tokio::test]
async fn test_dry_run_searches_but_never_deletes() {
    let mut client = MockGmailClient::new();
    client
        .expect_list_messages()
        .withf(|query: &str, _: &Option<String>| query == INBOX_QUERY)
        .times(1)
        .returning(|_, _| Ok(page(&["i1", "i2", "i3"], None)));
    client
        .expect_list_messages()
        .withf(|query: &str, _: &Option<String>| query == SPAM_QUERY)
        .times(1)
        .returning(|_, _| Ok(page(&["s1"], None)));
    client.expect_batch_delete().never();

    let report = run_cleanup(&client, &DeleteExecutor::default(), true).await;

    assert_eq!(
        report,
        Report {
            dry_run: true,
            inbox_deleted: 3,
            spam_deleted: 1,
        }
    );
}

#[tokio::test]
async fn test_searches_complete_before_deletes() {
    let mut client = MockGmailClient::new();
    let mut seq = Sequence::new();

    client
        .expect_list_messages()
        .withf(|query: &str, _: &Option<String>| query == INBOX_QUERY)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(page(&["i1", "i2"], None)));
    client
        .expect_list_messages()
        .withf(|query: &str, _: &Option<String>| query == SPAM_QUERY)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(page(&["s1"], None)));
    client
        .expect_batch_delete()
        .withf(|ids: &[String]| ids == ["i1", "i2"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    client
        .expect_batch_delete()
        .withf(|ids: &[String]| ids == ["s1"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let report = run_cleanup(&client, &DeleteExecutor::default(), false).await;

    assert_eq!(report.inbox_deleted, 2);
    assert_eq!(report.spam_deleted, 1);
    assert_eq!(report.summary(), "Deleted 2 old inbox emails and 1 spam emails.");
}

#[tokio::test]
async fn test_inbox_delete_failure_does_not_stop_spam_cleanup() {
    let mut client = MockGmailClient::new();
    let mut seq = Sequence::new();

    client
        .expect_list_messages()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(page(&["i1"], None)));
    client
        .expect_list_messages()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(page(&["s1", "s2"], None)));
    client
        .expect_batch_delete()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(GmailError::NetworkError("connection reset".to_string())));
    client
        .expect_batch_delete()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let report = run_cleanup(&client, &DeleteExecutor::default(), false).await;

    assert_eq!(report.inbox_deleted, 0);
    assert_eq!(report.spam_deleted, 2);
}

#[tokio::test]
async fn test_failed_search_deletes_partial_results() {
    let mut client = MockGmailClient::new();
    let mut seq = Sequence::new();

    client
        .expect_list_messages()
        .withf(|query: &str, token: &Option<String>| query == INBOX_QUERY && token.is_none())
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(page(&["i1"], Some("next"))));
    client
        .expect_list_messages()
        .withf(|query: &str, token: &Option<String>| query == INBOX_QUERY && token.is_some())
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(GmailError::RateLimited("HTTP 429: Too Many Requests".to_string())));
    client
        .expect_list_messages()
        .withf(|query: &str, _: &Option<String>| query == SPAM_QUERY)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(page(&[], None)));
    client
        .expect_batch_delete()
        .withf(|ids: &[String]| ids == ["i1"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let report = run_cleanup(&client, &DeleteExecutor::default(), false).await;

    assert_eq!(report.inbox_deleted, 1);
    assert_eq!(report.spam_deleted, 0);
}
