//! Simulated API services for MockDrive.
//!
//! Each service wraps the mock store (or its own in-memory state) behind
//! async operations that sleep a configured latency first, so callers see
//! the timing behavior of a real backend:
//! - file operations (list, create, upload, rename, delete)
//! - a simulated shell
//! - sharing permissions
//! - public page publishing

mod files;
mod public_pages;
mod sharing;
mod shell;

use std::time::Duration;

use rand::Rng;

use crate::config::SimulationConfig;

pub use files::FileService;
pub use public_pages::{PublicPage, PublicPageService};
pub use sharing::{PermissionLevel, SharePermission, SharedItem, SharingService};
pub use shell::{CommandOutcome, ShellService};

/// Artificial delay applied before a simulated operation.
#[derive(Debug, Clone)]
pub struct Latency {
    base: Duration,
    jitter_ms: u64,
}

impl Latency {
    /// Create a latency of `base_ms` plus up to `jitter_ms` of random
    /// extra delay.
    pub fn from_ms(base_ms: u64, jitter_ms: u64) -> Self {
        Self {
            base: Duration::from_millis(base_ms),
            jitter_ms,
        }
    }

    /// Latency for listing operations.
    pub fn for_list(sim: &SimulationConfig) -> Self {
        Self::from_ms(sim.list_delay_ms, sim.jitter_ms)
    }

    /// Latency for create/rename/delete operations.
    pub fn for_mutate(sim: &SimulationConfig) -> Self {
        Self::from_ms(sim.mutate_delay_ms, sim.jitter_ms)
    }

    /// Latency for uploads.
    pub fn for_upload(sim: &SimulationConfig) -> Self {
        Self::from_ms(sim.upload_delay_ms, sim.jitter_ms)
    }

    /// Latency for shell commands.
    pub fn for_shell(sim: &SimulationConfig) -> Self {
        Self::from_ms(sim.shell_delay_ms, sim.jitter_ms)
    }

    /// Sleep for the configured delay. A zero base with zero jitter
    /// returns immediately, which is what tests run with.
    pub async fn pause(&self) {
        let mut delay = self.base;
        if self.jitter_ms > 0 {
            let extra = rand::rng().random_range(0..=self.jitter_ms);
            delay += Duration::from_millis(extra);
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_zero_latency_returns_immediately() {
        let latency = Latency::from_ms(0, 0);
        let start = Instant::now();
        latency.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_base_latency_is_waited() {
        let latency = Latency::from_ms(20, 0);
        let start = Instant::now();
        latency.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_from_config() {
        let sim = SimulationConfig::default();
        assert_eq!(Latency::for_upload(&sim).base, Duration::from_millis(1200));
        assert_eq!(Latency::for_shell(&sim).base, Duration::from_millis(500));
    }
}
