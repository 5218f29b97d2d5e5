//! Inter-user pacing for the notification cycle.

use std::time::Duration;

use async_trait::async_trait;

/// The throttle awaited between users in a cycle.
///
/// Kept out of the engine as an injected seam so tests run with zero
/// delay and deployments can tune the gap against platform rate limits.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait out one inter-user gap.
    async fn pause(&self);
}

/// Fixed-delay pacer; the production throttle.
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Pacer that never waits, for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {}
}
