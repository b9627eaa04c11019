//! Inbound and outbound WebSocket message type definitions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use notihub_core::types::EventRecord;

/// Messages sent by a listener to the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Handshake declaring the last event the listener already has.
    Hello {
        /// Advisory resumption token.
        #[serde(rename = "lastTrx", default)]
        last_trx: Option<String>,
    },
}

/// Messages sent by the hub to listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// An accepted event, fields exactly as submitted.
    Notification(EventRecord),
}

/// A frame queued for one connection's transport writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Pre-serialized text payload, shared across all recipients.
    Text(Arc<str>),
    /// Liveness probe.
    Ping,
    /// Ask the writer to close the transport.
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_wire_shape() {
        let mut record = EventRecord::with_id("T9");
        record.title = Some(json!("Paid"));
        record.amount = Some(json!(2500));

        let value = serde_json::to_value(OutboundMessage::Notification(record)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "notification",
                "trx": "T9",
                "title": "Paid",
                "amount": 2500
            })
        );
    }

    #[test]
    fn test_hello_parsing() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"type":"hello","lastTrx":"T5"}"#).unwrap();
        assert_eq!(
            msg,
            InboundMessage::Hello {
                last_trx: Some("T5".into())
            }
        );

        let msg: InboundMessage = serde_json::from_str(r#"{"type":"hello","lastTrx":null}"#).unwrap();
        assert_eq!(msg, InboundMessage::Hello { last_trx: None });

        assert!(serde_json::from_str::<InboundMessage>(r#"{"type":"bogus"}"#).is_err());
    }
}
