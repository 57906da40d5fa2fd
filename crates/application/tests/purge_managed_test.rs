use hostsync_application::use_cases::PurgeManagedUseCase;
use hostsync_domain::{DomainError, RulePayload, SyncStage};
use std::sync::Arc;

mod helpers;
use helpers::{list_name, settings, CountingThrottle, MockGatewayClient, RecordingReporter};

fn purge(client: Arc<MockGatewayClient>) -> (PurgeManagedUseCase, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    let use_case = PurgeManagedUseCase::new(
        client,
        Arc::new(CountingThrottle::new()),
        reporter.clone(),
        &settings(1000),
    );
    (use_case, reporter)
}

async fn seed_managed(client: &MockGatewayClient) {
    for n in 1..=2 {
        let id = client
            .add_list(&list_name(n), vec![format!("d{}.example.com", n)])
            .await;
        client
            .add_rule(&RulePayload::block_list(&list_name(n), &id, 999_999 - i64::from(n)))
            .await;
    }
    client
        .add_rule(&RulePayload::override_domain("nas.example.com", "10.0.0.1", 10_000))
        .await;
}

#[tokio::test]
async fn test_purge_removes_managed_rules_then_lists() {
    let client = Arc::new(MockGatewayClient::new());
    seed_managed(&client).await;
    let (use_case, reporter) = purge(client.clone());

    let report = use_case.execute().await;

    assert!(report.is_success());
    assert_eq!(report.stage, SyncStage::Done);
    assert_eq!(report.stats.rules_removed, 3);
    assert_eq!(report.stats.lists_removed, 2);
    assert_eq!(report.stats.failures, 0);
    assert!(client.lists().await.is_empty());
    assert!(client.rules().await.is_empty());

    let calls = client.calls().await;
    let last_rule = calls.iter().rposition(|c| c.starts_with("delete_rule")).unwrap();
    let first_list = calls.iter().position(|c| c.starts_with("delete_list")).unwrap();
    assert!(last_rule < first_list);
    assert!(reporter.has_log("--- FINAL REPORT ---"));
}

#[tokio::test]
async fn test_purge_leaves_foreign_rules_and_lists() {
    let client = Arc::new(MockGatewayClient::new());
    seed_managed(&client).await;
    let foreign_list = client
        .add_list("Corporate allowlist", vec!["intranet.example.com".to_string()])
        .await;
    client
        .add_rule(&RulePayload::block_list("Corporate rule", &foreign_list, 500))
        .await;
    let (use_case, _) = purge(client.clone());

    let report = use_case.execute().await;

    assert_eq!(report.stats.rules_removed, 3);
    assert_eq!(report.stats.lists_removed, 2);
    let lists = client.lists().await;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].id, foreign_list);
    let rules = client.rules().await;
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name, "Corporate rule");
}

#[tokio::test]
async fn test_purge_counts_failures_and_keeps_going() {
    let client = Arc::new(MockGatewayClient::new());
    seed_managed(&client).await;
    client.fail_on("delete_rule").await;
    let (use_case, reporter) = purge(client.clone());

    let report = use_case.execute().await;

    assert!(report.is_success());
    // Three rule deletes fail, then both lists are refused while still in use.
    assert_eq!(report.stats.failures, 5);
    assert_eq!(report.stats.lists_removed, 0);
    assert!(reporter.has_log("Failed to delete rule"));
    assert!(reporter.has_log("Failed to delete list"));
}

#[tokio::test]
async fn test_purge_aborts_when_rules_cannot_be_read() {
    let client = Arc::new(MockGatewayClient::new());
    seed_managed(&client).await;
    client.fail_on("list_rules").await;
    let (use_case, reporter) = purge(client.clone());

    let report = use_case.execute().await;

    assert_eq!(report.stage, SyncStage::Error);
    assert!(matches!(report.error, Some(DomainError::AbortedRun(_))));
    assert_eq!(client.mutation_count(), 0);
    assert!(reporter.has_log("CRITICAL ERROR"));
}

#[tokio::test]
async fn test_purge_on_empty_account_is_a_noop() {
    let client = Arc::new(MockGatewayClient::new());
    let (use_case, _) = purge(client.clone());

    let report = use_case.execute().await;

    assert!(report.is_success());
    assert_eq!(client.mutation_count(), 0);
}
