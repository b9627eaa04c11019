//! The notification event exchanged between producers and listeners.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// One notification submitted by a producer.
///
/// Only `id` is retained after acceptance (in the journal); everything
/// else is passed through to listeners untouched, whatever JSON type the
/// producer used. Fields the producer omitted are omitted on the way out.
/// Field names on the wire follow the producer protocol: `trx`, `user`,
/// `title`, `pesan`, `amount`, `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventRecord {
    /// Event identifier, the dedup key.
    #[serde(rename = "trx", default)]
    #[validate(length(min = 1, message = "trx is required"))]
    pub id: String,
    /// Producer (user) that raised the event.
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<Value>,
    /// Short title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// Message body.
    #[serde(rename = "pesan", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    /// Optional amount, number or string as sent by the producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    /// Producer-side timestamp.
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
}

impl EventRecord {
    /// Creates a record carrying only an identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
