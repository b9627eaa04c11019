//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use notihub_core::config::RealtimeConfig;

use crate::broadcast::dispatcher::BroadcastDispatcher;
use crate::connection::heartbeat::LivenessMonitor;
use crate::connection::registry::ConnectionRegistry;
use crate::metrics::HubMetrics;

/// Central real-time engine that coordinates the WebSocket subsystems.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Broadcast dispatcher.
    pub dispatcher: Arc<BroadcastDispatcher>,
    /// Liveness monitor.
    pub monitor: Arc<LivenessMonitor>,
    /// Metrics collector.
    pub metrics: Arc<HubMetrics>,
    /// Stops background tasks.
    shutdown: CancellationToken,
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: &RealtimeConfig, metrics: Arc<HubMetrics>) -> Self {
        let registry = Arc::new(ConnectionRegistry::new(
            config.channel_buffer_size,
            metrics.clone(),
        ));
        let dispatcher = Arc::new(BroadcastDispatcher::new(registry.clone(), metrics.clone()));
        let monitor = Arc::new(LivenessMonitor::new(
            registry.clone(),
            config.ping_interval(),
            metrics.clone(),
        ));

        info!(
            ping_interval_seconds = config.ping_interval().as_secs(),
            "Real-time engine initialized"
        );

        Self {
            registry,
            dispatcher,
            monitor,
            metrics,
            shutdown: CancellationToken::new(),
        }
    }

    /// Spawns the liveness monitor.
    pub fn start(&self) -> JoinHandle<()> {
        tokio::spawn(self.monitor.clone().run(self.shutdown.child_token()))
    }

    /// Stops background tasks and closes every listener connection.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");
        self.shutdown.cancel();
        self.registry.close_all();
    }
}
