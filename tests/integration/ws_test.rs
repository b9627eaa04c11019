//! Integration tests for listener WebSocket connections.

mod helpers;

use std::time::Duration;

use futures::{SinkExt, Stream, StreamExt};
use serde_json::{Value, json};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use helpers::TestApp;

/// Reads frames until a text frame arrives.
async fn next_text<S>(ws: &mut S) -> Value
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let read = async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str::<Value>(text.as_str()).unwrap();
                }
                Some(Ok(_)) => continue,
                other => panic!("connection ended: {:?}", other),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), read)
        .await
        .expect("timed out waiting for a text frame")
}

#[tokio::test]
async fn test_listener_receives_broadcast() {
    let app = TestApp::new().await;
    let addr = app.spawn_server().await;

    let (mut ws, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    app.wait_for_connections(1).await;

    let response = app
        .notify(json!({ "trx": "T1", "title": "Paid", "pesan": "Order #1 paid" }), None)
        .await;
    assert_eq!(response.body, json!({ "ok": true, "sent": 1 }));

    let notification = next_text(&mut ws).await;
    assert_eq!(notification["type"], "notification");
    assert_eq!(notification["trx"], "T1");
    assert_eq!(notification["title"], "Paid");
    assert_eq!(notification["pesan"], "Order #1 paid");

    let duplicate = app.notify(json!({ "trx": "T1" }), None).await;
    assert_eq!(duplicate.body["ignored"], true);

    let next = app.notify(json!({ "trx": "T2" }), None).await;
    assert_eq!(next.body["sent"], 1);
    assert_eq!(next_text(&mut ws).await["trx"], "T2");
}

#[tokio::test]
async fn test_listener_receives_record_unchanged() {
    let app = TestApp::new().await;
    let addr = app.spawn_server().await;

    let (mut ws, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    app.wait_for_connections(1).await;

    let response = app
        .notify(json!({ "trx": "N1", "user": 42, "title": 7, "pesan": 123 }), None)
        .await;
    assert_eq!(response.body, json!({ "ok": true, "sent": 1 }));

    assert_eq!(
        next_text(&mut ws).await,
        json!({ "type": "notification", "trx": "N1", "user": 42, "title": 7, "pesan": 123 })
    );
}

#[tokio::test]
async fn test_hello_records_resume_token() {
    let app = TestApp::new().await;
    let addr = app.spawn_server().await;

    let (mut ws, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    app.wait_for_connections(1).await;

    ws.send(Message::text(r#"{"type":"hello","lastTrx":"T9"}"#))
        .await
        .unwrap();
    ws.send(Message::text("garbage")).await.unwrap();

    let handle = app.state.realtime.registry.all_connections().pop().unwrap();
    for _ in 0..200 {
        if handle.resume_from().is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(handle.resume_from().as_deref(), Some("T9"));
    assert_eq!(app.state.realtime.registry.connection_count(), 1);
}

#[tokio::test]
async fn test_closed_listener_unregistered() {
    let app = TestApp::new().await;
    let addr = app.spawn_server().await;

    let (mut staying, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    let (mut leaving, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    app.wait_for_connections(2).await;

    leaving.close(None).await.unwrap();
    app.wait_for_connections(1).await;

    let response = app.notify(json!({ "trx": "T1" }), None).await;
    assert_eq!(response.body["sent"], 1);
    assert_eq!(next_text(&mut staying).await["trx"], "T1");
}

#[tokio::test]
async fn test_hub_shutdown_closes_listeners() {
    let app = TestApp::new().await;
    let addr = app.spawn_server().await;

    let (mut ws, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    app.wait_for_connections(1).await;

    app.state.realtime.shutdown();
    app.wait_for_connections(0).await;

    let closed = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await;
    assert!(closed.is_ok(), "listener was not closed");
}
