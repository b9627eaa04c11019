//! Real-time WebSocket engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Liveness probe period in seconds. A silent listener is evicted
    /// between one and two periods after it stops answering.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
    /// Per-connection outbound buffer size.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl RealtimeConfig {
    /// Probe period as a [`Duration`].
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_seconds.max(1))
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            ping_interval_seconds: default_ping_interval(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_ping_interval() -> u64 {
    15
}

fn default_channel_buffer() -> usize {
    256
}
