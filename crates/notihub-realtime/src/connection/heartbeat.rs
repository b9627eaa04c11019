//! Ping/pong liveness monitor for listener connections.
//!
//! One timer drives every connection. On each tick a connection whose
//! previous probe went unanswered is evicted; every other connection has
//! its liveness flag cleared and receives a fresh probe. A pong sets the
//! flag again, so a listener survives only by answering each probe within
//! one period, and a silent one is gone within `[T, 2T)`.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::message::types::OutboundFrame;
use crate::metrics::HubMetrics;

use super::registry::ConnectionRegistry;

/// Result of a single probe tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Connections that were sent a probe.
    pub probed: usize,
    /// Connections evicted for missing the previous probe.
    pub evicted: usize,
}

/// Periodically probes every registered connection.
#[derive(Debug)]
pub struct LivenessMonitor {
    /// Registry being monitored.
    registry: Arc<ConnectionRegistry>,
    /// Probe period.
    period: Duration,
    /// Metrics.
    metrics: Arc<HubMetrics>,
}

impl LivenessMonitor {
    /// Creates a monitor with the given probe period.
    pub fn new(registry: Arc<ConnectionRegistry>, period: Duration, metrics: Arc<HubMetrics>) -> Self {
        Self {
            registry,
            period,
            metrics,
        }
    }

    /// Probe period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs one probe tick over every registered connection.
    pub fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();

        for handle in self.registry.all_connections() {
            if !handle.begin_probe() {
                warn!(conn_id = %handle.id, "Listener missed liveness probe, evicting");
                if self.registry.unregister(&handle.id).is_some() {
                    self.metrics.connection_evicted();
                    report.evicted += 1;
                }
                continue;
            }

            if let Err(e) = handle.send(OutboundFrame::Ping) {
                debug!(conn_id = %handle.id, error = %e, "Liveness probe not queued");
            }
            report.probed += 1;
        }

        if report.evicted > 0 || report.probed > 0 {
            debug!(
                probed = report.probed,
                evicted = report.evicted,
                "Liveness sweep complete"
            );
        }

        report
    }

    /// Runs the probe loop until `cancel` fires.
    ///
    /// The first probe goes out one full period after start.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        let mut interval = time::interval_at(time::Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    self.sweep();
                }
            }
        }

        debug!("Liveness monitor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::registry::ConnectionEvent;

    fn setup(period: Duration) -> (Arc<ConnectionRegistry>, Arc<LivenessMonitor>) {
        let metrics = Arc::new(HubMetrics::new());
        let registry = Arc::new(ConnectionRegistry::new(8, metrics.clone()));
        let monitor = Arc::new(LivenessMonitor::new(registry.clone(), period, metrics));
        (registry, monitor)
    }

    #[tokio::test]
    async fn test_silent_connection_evicted_on_second_tick() {
        let (registry, monitor) = setup(Duration::from_secs(15));
        let (handle, mut rx) = registry.register();

        let first = monitor.sweep();
        assert_eq!(first, SweepReport { probed: 1, evicted: 0 });
        assert_eq!(rx.recv().await, Some(OutboundFrame::Ping));
        assert_eq!(registry.connection_count(), 1);

        let second = monitor.sweep();
        assert_eq!(second, SweepReport { probed: 0, evicted: 1 });
        assert_eq!(registry.connection_count(), 0);
        assert!(handle.termination().is_cancelled());
    }

    #[tokio::test]
    async fn test_responsive_connection_never_evicted() {
        let (registry, monitor) = setup(Duration::from_secs(15));
        let (handle, mut rx) = registry.register();

        for _ in 0..10 {
            monitor.sweep();
            assert_eq!(rx.recv().await, Some(OutboundFrame::Ping));
            registry.handle_event(&handle.id, ConnectionEvent::Pong);
        }

        assert_eq!(registry.connection_count(), 1);
        assert!(handle.is_open());
    }

    #[tokio::test]
    async fn test_mixed_population() {
        let (registry, monitor) = setup(Duration::from_secs(15));
        let (live, _rx_live) = registry.register();
        let (_dead, _rx_dead) = registry.register();

        monitor.sweep();
        live.mark_alive();
        let report = monitor.sweep();

        assert_eq!(report, SweepReport { probed: 1, evicted: 1 });
        assert!(registry.get(&live.id).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_eviction_within_two_periods() {
        let period = Duration::from_secs(15);
        let (registry, monitor) = setup(period);
        let (handle, mut rx) = registry.register();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(monitor.clone().run(cancel.clone()));

        time::sleep(period - Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(registry.connection_count(), 1);

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().ok(), Some(OutboundFrame::Ping));
        assert_eq!(registry.connection_count(), 1);

        time::sleep(period).await;
        assert_eq!(registry.connection_count(), 0);
        assert!(handle.termination().is_cancelled());

        cancel.cancel();
        task.await.unwrap();
    }
}
