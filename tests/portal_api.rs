//! End-to-end behaviour of the portal data layer as page components see it.

use futures_util::future::join_all;
use mahanadu_portal::config::{LatencyConfig, PortalConfig};
use mahanadu_portal::helper::fixture_helpers;
use mahanadu_portal::helper::latency_helpers::RandomLatency;
use mahanadu_portal::models::db_operations::ledger_db_operations::{MemoryStorage, SubmissionLedger};
use mahanadu_portal::{Envelope, Fields, PageMeta, PortalApi, RecordType};
use serde_json::json;
use std::time::Duration;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("fields must be an object")
}

fn config_in(dir: &std::path::Path) -> PortalConfig {
    PortalConfig {
        latency: LatencyConfig { min_ms: 0, max_ms: 0 },
        database_path: dir.display().to_string(),
        log_level: "info".to_string(),
        fixtures_path: None,
    }
}

// =============================================================================
// Query layer
// =============================================================================

#[tokio::test]
async fn third_page_of_fourteen_posts() {
    let api = PortalApi::in_memory().unwrap();
    let envelope = api.fetch_posts(3, 6).await;

    let posts = envelope.data().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![13, 14]);
    assert_eq!(
        envelope.meta(),
        Some(&PageMeta { current_page: 3, per_page: 6, total: 14, total_pages: 3 })
    );
}

#[tokio::test]
async fn pages_concatenate_to_the_whole_collection() {
    let api = PortalApi::in_memory().unwrap();
    let mut seen = Vec::new();
    for page in 1..=5 {
        seen.extend(api.fetch_posts(page, 4).await.into_result().unwrap());
    }
    let ids: Vec<i64> = seen.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=14).collect::<Vec<_>>());
}

#[tokio::test]
async fn unknown_post_id_reports_not_found() {
    let api = PortalApi::in_memory().unwrap();
    let envelope = api.fetch_post_by_id(999).await;
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({ "success": false, "error": "Post not found" })
    );
}

#[tokio::test]
async fn static_reads_are_idempotent_across_ledger_writes() {
    let api = PortalApi::in_memory().unwrap();
    let settings = api.fetch_settings().await;
    let districts = api.fetch_districts().await;
    let gallery = api.fetch_gallery().await;
    let profiles = api.fetch_profiles().await;

    api.submit_contact(fields(json!({ "name": "A", "message": "hi" }))).await;

    assert_eq!(api.fetch_settings().await, settings);
    assert_eq!(api.fetch_districts().await, districts);
    assert_eq!(api.fetch_gallery().await, gallery);
    assert_eq!(api.fetch_profiles().await, profiles);
}

// =============================================================================
// Submission ledger through the facade
// =============================================================================

#[tokio::test]
async fn donation_is_enriched_and_listed_unchanged() {
    let api = PortalApi::in_memory().unwrap();
    let record = api
        .record_donation(fields(json!({ "name": "A", "amount": 500 })))
        .await
        .into_result()
        .unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["name"], json!("A"));
    assert_eq!(value["amount"], json!(500));
    assert_eq!(value["status"], json!("pending"));
    assert!(value["id"].is_i64());
    let submitted_at = value["submitted_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(submitted_at).is_ok());

    let listed = api.list_submissions("donations").await.into_result().unwrap();
    assert_eq!(listed, vec![record]);
}

#[tokio::test]
async fn appends_are_listed_in_order_with_increasing_ids() {
    let api = PortalApi::in_memory().unwrap();
    let mut expected = Vec::new();
    for n in 0..10 {
        let record = api
            .submit_complaint(fields(json!({ "subject": format!("complaint {}", n) })))
            .await
            .into_result()
            .unwrap();
        expected.push(record);
    }
    let listed = api.list_records(RecordType::Complaints).await.into_result().unwrap();
    assert_eq!(listed, expected);
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn submissions_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let stored = {
        let api = PortalApi::from_config(&config).unwrap();
        api.submit_membership(fields(json!({ "fullName": "Ravi", "district": "Khammam" })))
            .await
            .into_result()
            .unwrap()
    };

    let api = PortalApi::from_config(&config).unwrap();
    let listed = api.list_submissions("memberships").await.into_result().unwrap();
    assert_eq!(listed, vec![stored.clone()]);

    let next = api.submit_membership(Fields::new()).await.into_result().unwrap();
    assert!(next.id > stored.id);
    assert_ne!(next.membership_id, stored.membership_id);
}

// =============================================================================
// Latency and concurrency
// =============================================================================

#[tokio::test(start_paused = true)]
async fn concurrent_calls_all_resolve_and_lose_no_submissions() {
    let api = PortalApi::new(
        fixture_helpers::bundled_store().unwrap(),
        SubmissionLedger::new(MemoryStorage::new()),
        RandomLatency::new(Duration::from_millis(100), Duration::from_millis(600)),
    );

    let submissions = (0..25).map(|n| {
        let api = api.clone();
        async move { api.submit_contact(fields(json!({ "n": n }))).await }
    });
    let results: Vec<Envelope<_>> = join_all(submissions).await;
    assert!(results.iter().all(Envelope::is_success));

    let listed = api.list_submissions("contacts").await.into_result().unwrap();
    assert_eq!(listed.len(), 25);
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test(start_paused = true)]
async fn every_operation_waits_for_the_simulated_latency() {
    let api = PortalApi::in_memory()
        .unwrap()
        .with_latency(RandomLatency::new(Duration::from_millis(100), Duration::from_millis(600)));

    let started = tokio::time::Instant::now();
    api.fetch_settings().await;
    assert!(started.elapsed() >= Duration::from_millis(100));

    let started = tokio::time::Instant::now();
    api.list_submissions("nope").await;
    assert!(started.elapsed() >= Duration::from_millis(100));
}
