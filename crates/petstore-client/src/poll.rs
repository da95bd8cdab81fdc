// crates/petstore-client/src/poll.rs
// ============================================================================
// Module: Poll Helper
// Description: Bounded retry for eventually-consistent reads and deletes.
// Purpose: Re-run an expectation block until it passes or a deadline elapses.
// Dependencies: tokio, tracing
// ============================================================================

//! ## Overview
//! The public pet store sometimes answers 404 for a record created a moment
//! earlier. [`eventually`] re-runs a whole request-and-expect block at a
//! fixed interval until it passes. When the deadline is reached the last
//! completed attempt's own failure is returned rather than a generic timeout.
//!
//! Only expectation failures are retried. A dispatch failure (connection
//! refused, TLS error) ends polling immediately, since waiting does not make
//! an unreachable host reachable.
//!
//! Each attempt is also bounded by the time left before the deadline, so a
//! hung request cannot hold the caller past `max_wait`. An attempt cut off
//! this way reports the previous attempt's failure; only when no attempt
//! completed at all is a deadline expectation failure synthesized.
//!
//! The wrapped block may run several times and must be safe to repeat.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio::time::sleep;
use tokio::time::timeout;

use crate::error::PetstoreError;

/// Deadline and cadence for [`eventually`].
///
/// # Invariants
/// - An action failing on attempts `1..K` and passing on attempt `K` is
///   reported as passed whenever `(K - 1) * interval <= max_wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Longest time, from the first attempt, at which a new attempt may start.
    pub max_wait: Duration,
    /// Pause between attempts.
    pub interval: Duration,
}

impl PollPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(max_wait: Duration, interval: Duration) -> Self {
        Self {
            max_wait,
            interval,
        }
    }

    /// Creates a policy from whole seconds.
    #[must_use]
    pub const fn from_secs(max_wait_secs: u64, interval_secs: u64) -> Self {
        Self::new(Duration::from_secs(max_wait_secs), Duration::from_secs(interval_secs))
    }

    /// Stretches the deadline by `factor`, keeping the interval.
    #[must_use]
    pub fn scaled(self, factor: u32) -> Self {
        Self {
            max_wait: self.max_wait.saturating_mul(factor.max(1)),
            interval: self.interval,
        }
    }
}

/// Runs `action` until it succeeds or `policy.max_wait` elapses.
///
/// # Errors
///
/// Returns the final attempt's [`PetstoreError::Expectation`] when no
/// attempt passed in time (or the one before an attempt that was still
/// running at the deadline), any non-expectation error as soon as it occurs,
/// and [`PetstoreError::Config`] for a zero interval.
pub async fn eventually<T, F, Fut>(policy: PollPolicy, mut action: F) -> Result<T, PetstoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PetstoreError>>,
{
    if policy.interval.is_zero() {
        return Err(PetstoreError::Config("poll interval must be non-zero".to_string()));
    }
    let start = Instant::now();
    let mut attempt = 0u32;
    let mut last_error: Option<PetstoreError> = None;
    loop {
        attempt = attempt.saturating_add(1);
        let remaining = policy.max_wait.saturating_sub(start.elapsed());
        let Ok(result) = timeout(remaining, action()).await else {
            tracing::debug!(attempt, "poll deadline reached during attempt");
            return Err(last_error.unwrap_or_else(|| {
                PetstoreError::Expectation(format!(
                    "attempt {attempt} did not finish within {} ms",
                    policy.max_wait.as_millis()
                ))
            }));
        };
        match result {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempt, "poll block passed after retry");
                }
                return Ok(value);
            }
            Err(err) if !err.is_expectation() => return Err(err),
            Err(err) => {
                let next_start = start.elapsed().saturating_add(policy.interval);
                if next_start > policy.max_wait {
                    tracing::debug!(attempt, error = %err, "poll deadline reached");
                    return Err(err);
                }
                tracing::debug!(attempt, error = %err, "poll attempt failed, retrying");
                last_error = Some(err);
                sleep(policy.interval).await;
            }
        }
    }
}
