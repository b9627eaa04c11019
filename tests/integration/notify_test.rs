//! Integration tests for the producer ingestion endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

fn event(trx: &str) -> serde_json::Value {
    json!({
        "trx": trx,
        "user": "cashier-01",
        "title": "Payment received",
        "pesan": "Order paid",
        "amount": 150000,
        "time": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_first_submission_accepted_then_ignored() {
    let app = TestApp::new().await;

    let first = app.notify(event("T1"), None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, json!({ "ok": true, "sent": 0 }));

    for _ in 0..3 {
        let again = app.notify(event("T1"), None).await;
        assert_eq!(again.status, StatusCode::OK);
        assert_eq!(again.body, json!({ "ok": true, "ignored": true }));
    }

    assert_eq!(app.state.journal.len(), 1);
}

#[tokio::test]
async fn test_non_string_fields_accepted() {
    let app = TestApp::new().await;

    let response = app
        .notify(
            json!({ "trx": "N1", "user": 42, "title": 7, "pesan": 123, "amount": "15.000" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true, "sent": 0 }));
    assert!(app.state.journal.contains("N1"));
}

#[tokio::test]
async fn test_journal_file_written_on_accept() {
    let app = TestApp::new().await;

    app.notify(event("T1"), None).await;
    app.notify(event("T2"), None).await;

    let raw = std::fs::read_to_string(&app.journal_path).unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["T1".to_string(), "T2".to_string()]);
}

#[tokio::test]
async fn test_dedup_survives_restart() {
    let first = TestApp::new().await;
    first.notify(event("T1"), None).await;

    let restarted = TestApp::with_journal(&first.journal_path, "").await;
    assert!(restarted.state.journal.contains("T1"));

    let response = restarted.notify(event("T1"), None).await;
    assert_eq!(response.body, json!({ "ok": true, "ignored": true }));
}

#[tokio::test]
async fn test_corrupt_journal_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.json");
    std::fs::write(&path, "{not json").unwrap();

    let app = TestApp::with_journal(&path, "").await;
    assert!(app.state.journal.is_empty());

    let response = app.notify(event("T1"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sent"], 0);
}

#[tokio::test]
async fn test_shared_secret_enforced() {
    let app = TestApp::with_secret("s3cret").await;

    let missing = app.notify(event("T1"), None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["ok"], false);
    assert_eq!(missing.body["error"], "UNAUTHORIZED");

    let wrong = app.notify(event("T1"), Some("guess")).await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert!(app.state.journal.is_empty());

    let ok = app.notify(event("T1"), Some("s3cret")).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["ok"], true);
}

#[tokio::test]
async fn test_missing_trx_rejected() {
    let app = TestApp::new().await;

    let response = app.notify(json!({ "title": "no id" }), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["ok"], false);
    assert_eq!(response.body["error"], "INVALID_INPUT");

    let empty = app.notify(json!({ "trx": "" }), None).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    assert!(app.state.journal.is_empty());
}

#[tokio::test]
async fn test_missing_trx_rejected_with_secret() {
    let app = TestApp::with_secret("s3cret").await;

    let response = app.notify(json!({ "title": "no id" }), Some("s3cret")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_malformed_body() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/notify", Some("{broken".to_string()), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_INPUT");

    let secured = TestApp::with_secret("s3cret").await;
    let response = secured
        .request("POST", "/api/notify", Some("{broken".to_string()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    app.notify(event("T1"), None).await;
    app.notify(event("T1"), None).await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["connections"], 0);
    assert_eq!(response.body["journal_entries"], 1);
    assert_eq!(response.body["metrics"]["events_accepted"], 1);
    assert_eq!(response.body["metrics"]["events_duplicate"], 1);
}
