//! Artificial network latency.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::types::Operation;

/// Emulates the round-trip time of a backend call.
///
/// Services await this before touching their store. Implementations decide
/// whether to actually sleep, which keeps tests deterministic.
#[async_trait]
pub trait Latency: Debug + Send + Sync + 'static {
    /// Wait as long as `operation` is configured to take.
    async fn simulate(&self, operation: Operation);
}
