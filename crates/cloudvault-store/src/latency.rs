//! Latency implementations.

use async_trait::async_trait;
use tracing::trace;

use cloudvault_core::config::latency::LatencyConfig;
use cloudvault_core::traits::Latency;
use cloudvault_core::types::Operation;

/// Sleeps on the tokio timer for each operation's configured delay.
#[derive(Debug, Clone, Default)]
pub struct SimulatedLatency {
    config: LatencyConfig,
}

impl SimulatedLatency {
    /// Create a latency source from configuration.
    pub fn new(config: LatencyConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Latency for SimulatedLatency {
    async fn simulate(&self, operation: Operation) {
        let delay = self.config.delay_for(operation);
        if delay.is_zero() {
            return;
        }
        trace!(%operation, delay_ms = delay.as_millis() as u64, "Simulating latency");
        tokio::time::sleep(delay).await;
    }
}

/// Resolves immediately. Used by tests and scripted runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn simulate(&self, _operation: Operation) {}
}
