//! WebSocket upgrade handler.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use notihub_realtime::connection::ConnectionEvent;
use notihub_realtime::message::OutboundFrame;

use crate::state::AppState;

/// Upper bound on flushing the close frame after the read side ends.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// GET /ws: listener WebSocket upgrade
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Drives an established listener connection until it closes or is evicted.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let registry = state.realtime.registry.clone();

    let (handle, mut outbound_rx) = registry.register();
    let conn_id = handle.id;
    let termination = handle.termination();

    info!(conn_id = %conn_id, "WebSocket connection established");

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            let (message, last) = match frame {
                OutboundFrame::Text(text) => (Message::Text(text.to_string().into()), false),
                OutboundFrame::Ping => (Message::Ping(Bytes::new()), false),
                OutboundFrame::Close => (Message::Close(None), true),
            };
            if ws_tx.send(message).await.is_err() || last {
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    loop {
        tokio::select! {
            _ = termination.cancelled() => {
                debug!(conn_id = %conn_id, "Connection terminated by hub");
                break;
            }
            next = ws_rx.next() => match next {
                Some(Ok(Message::Text(text))) => {
                    registry.handle_event(&conn_id, ConnectionEvent::Text(text.as_str().to_owned()));
                }
                Some(Ok(Message::Pong(_))) => {
                    registry.handle_event(&conn_id, ConnectionEvent::Pong);
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    }

    registry.handle_event(&conn_id, ConnectionEvent::Closed);
    drop(handle);

    if tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut writer)
        .await
        .is_err()
    {
        writer.abort();
    }

    info!(conn_id = %conn_id, "WebSocket connection closed");
}
