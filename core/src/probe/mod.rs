//! First-available-port probing.
//!
//! Sweeps a candidate range in ascending order, testing each port with a
//! short TCP connect attempt, and returns the first port nothing is
//! listening on. A sweep where every candidate is busy triggers a re-sweep
//! governed by the retry policy.

mod checker;

pub use checker::{PortChecker, TcpChecker};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default number of full sweeps before a bounded probe gives up.
pub const DEFAULT_MAX_SWEEPS: u32 = 10;

/// Default pause between sweeps.
pub const DEFAULT_SWEEP_DELAY: Duration = Duration::from_millis(100);

/// Half-open range `[start, end)` of candidate ports, scanned ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    /// Create a range, rejecting empty or inverted input up front.
    ///
    /// An empty range would scan zero candidates per sweep and the retry
    /// loop would never make progress, so it is an error at construction.
    pub fn new(start: u16, end: u16) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of candidate ports in the range.
    pub fn len(&self) -> u16 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// How long to keep re-sweeping a fully busy range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Re-sweep until a free port appears. Mirrors the historical panel
    /// behavior; can block forever if the range never frees up.
    Unbounded,
    /// Fail with [`Error::Exhausted`] after `max_sweeps` full passes.
    Bounded { max_sweeps: u32 },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Bounded {
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

/// Finds the lowest-numbered free TCP port in a range.
///
/// Generic over the connectivity checker so the sweep and retry logic can
/// be exercised without live sockets.
pub struct PortProbe<C: PortChecker = TcpChecker> {
    checker: C,
    policy: RetryPolicy,
    sweep_delay: Duration,
}

impl PortProbe<TcpChecker> {
    /// Create a probe that dials real sockets, with the default bounded
    /// retry policy.
    pub fn new() -> Self {
        Self::with_checker(TcpChecker::default())
    }
}

impl Default for PortProbe<TcpChecker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PortChecker> PortProbe<C> {
    /// Create a probe backed by a custom checker.
    pub fn with_checker(checker: C) -> Self {
        Self {
            checker,
            policy: RetryPolicy::default(),
            sweep_delay: DEFAULT_SWEEP_DELAY,
        }
    }

    /// Set the retry policy.
    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the pause between sweeps of a fully busy range.
    pub fn sweep_delay(mut self, delay: Duration) -> Self {
        self.sweep_delay = delay;
        self
    }

    /// Find the lowest free port in `range`.
    ///
    /// Each sweep restarts at `range.start`, so the result is always the
    /// first port in ascending order that was free during the most recent
    /// sweep. A fully busy sweep sleeps briefly and retries per the policy.
    pub async fn find_available_port(&self, range: PortRange) -> Result<u16> {
        // Ranges built by hand rather than through `new` are re-checked here.
        if range.is_empty() {
            return Err(Error::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }

        let mut sweeps = 0u32;
        loop {
            if let Some(port) = self.sweep(range).await {
                return Ok(port);
            }
            sweeps += 1;
            if let RetryPolicy::Bounded { max_sweeps } = self.policy {
                if sweeps >= max_sweeps {
                    return Err(Error::Exhausted {
                        start: range.start,
                        end: range.end,
                        sweeps,
                    });
                }
            }
            tokio::time::sleep(self.sweep_delay).await;
        }
    }

    /// One ascending pass over the range.
    ///
    /// Returns the first port not accepting connections, or `None` when
    /// every candidate is busy.
    async fn sweep(&self, range: PortRange) -> Option<u16> {
        for port in range.start..range.end {
            if self.checker.is_in_use(port).await {
                debug!(port, "port is in use, trying the next one");
            } else {
                return Some(port);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Checker with a fixed set of busy ports.
    struct FixedChecker {
        busy: HashSet<u16>,
    }

    impl FixedChecker {
        fn new(busy: &[u16]) -> Self {
            Self {
                busy: busy.iter().copied().collect(),
            }
        }
    }

    impl PortChecker for FixedChecker {
        async fn is_in_use(&self, port: u16) -> bool {
            self.busy.contains(&port)
        }
    }

    /// Checker where one port frees up after a few probes.
    struct EventuallyFreeChecker {
        port: u16,
        probes_until_free: u32,
        seen: AtomicU32,
    }

    impl PortChecker for EventuallyFreeChecker {
        async fn is_in_use(&self, port: u16) -> bool {
            if port != self.port {
                return true;
            }
            self.seen.fetch_add(1, Ordering::SeqCst) + 1 < self.probes_until_free
        }
    }

    fn probe_with(busy: &[u16]) -> PortProbe<FixedChecker> {
        PortProbe::with_checker(FixedChecker::new(busy))
            .policy(RetryPolicy::Bounded { max_sweeps: 2 })
            .sweep_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_returns_start_when_free() {
        let probe = probe_with(&[]);
        let range = PortRange::new(7860, 7865).unwrap();
        assert_eq!(probe.find_available_port(range).await.unwrap(), 7860);
    }

    #[tokio::test]
    async fn test_returns_lowest_free_port() {
        let probe = probe_with(&[7860, 7861]);
        let range = PortRange::new(7860, 7865).unwrap();
        assert_eq!(probe.find_available_port(range).await.unwrap(), 7862);
    }

    #[tokio::test]
    async fn test_idempotent_when_state_unchanged() {
        let probe = probe_with(&[7860]);
        let range = PortRange::new(7860, 7865).unwrap();
        let first = probe.find_available_port(range).await.unwrap();
        let second = probe.find_available_port(range).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 7861);
    }

    #[tokio::test]
    async fn test_exhausted_after_sweep_budget() {
        let probe = probe_with(&[7860, 7861, 7862, 7863, 7864]);
        let range = PortRange::new(7860, 7865).unwrap();
        let err = probe.find_available_port(range).await.unwrap_err();
        match err {
            Error::Exhausted { start, end, sweeps } => {
                assert_eq!((start, end), (7860, 7865));
                assert_eq!(sweeps, 2);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unbounded_retries_until_port_frees_up() {
        // All ports busy for two full sweeps, then 7861 frees up.
        let checker = EventuallyFreeChecker {
            port: 7861,
            probes_until_free: 3,
            seen: AtomicU32::new(0),
        };
        let probe = PortProbe::with_checker(checker)
            .policy(RetryPolicy::Unbounded)
            .sweep_delay(Duration::ZERO);
        let range = PortRange::new(7860, 7862).unwrap();
        assert_eq!(probe.find_available_port(range).await.unwrap(), 7861);
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert!(matches!(
            PortRange::new(7865, 7860),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            PortRange::new(7860, 7860),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_range_len() {
        let range = PortRange::new(7860, 7865).unwrap();
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
    }
}
