//! Exponential backoff retry for API operations
//!
//! [`retry_with_backoff`] wraps any asynchronous operation and re-invokes it
//! on transient failure, sleeping between attempts. The wait grows
//! multiplicatively from [`RetryPolicy::initial_delay`] up to
//! [`RetryPolicy::max_delay`], with optional jitter so concurrent retries
//! desynchronize.
//!
//! Retry decisions follow [`Error::is_retryable`]: client-side errors
//! (400/401/403/404/422) propagate immediately, while 429, 5xx, transport
//! failures, and unclassified errors are re-attempted up to the budget. A 429
//! carrying a `Retry-After` hint uses that value as the wait for the attempt
//! instead of the computed backoff.
//!
//! # Example
//!
//! ```no_run
//! # use vaulty_sdk::{RetryPolicy, retry_with_backoff};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = RetryPolicy::default();
//! let value = retry_with_backoff(|| async { fetch().await }, &policy).await?;
//! # Ok(())
//! # }
//! # async fn fetch() -> vaulty_sdk::Result<u32> { Ok(1) }
//! ```

use crate::errors::{ApiError, Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Backoff and retry budget for API operations
///
/// Immutable value object; one instance lives on the client and may be
/// overridden per call. `max_retries = 0` means a single attempt with no
/// retries.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Ceiling applied to the computed delay, before jitter
    pub max_delay: Duration,
    /// Multiplier applied per retry
    pub backoff_factor: f64,
    /// Randomize each delay by a uniform 0.5..=1.5 factor
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: crate::DEFAULT_RETRIES,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_factor: 2.0,
            jitter: true,
        }
    }
}

/// Compute the wait before retry number `attempt` (0-based), pre-jitter cap
///
/// The first retry waits `initial_delay` (exponent 0), the second
/// `initial_delay * backoff_factor`, and so on, capped at `max_delay`.
pub(crate) fn compute_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let raw = policy.initial_delay.as_secs_f64() * policy.backoff_factor.powi(attempt as i32);
    let capped = raw.min(policy.max_delay.as_secs_f64());

    let secs = if policy.jitter {
        capped * rand::Rng::gen_range(&mut rand::thread_rng(), 0.5..=1.5)
    } else {
        capped
    };

    Duration::from_secs_f64(secs)
}

/// Run `operation`, retrying transient failures with exponential backoff
///
/// Performs at most `policy.max_retries + 1` invocations. Success returns
/// immediately; a non-retryable error propagates immediately; when the budget
/// is exhausted the last error propagates unchanged. The sleep between
/// attempts is a cooperative suspension point and unwinds cleanly if the
/// surrounding task is cancelled.
pub async fn retry_with_backoff<T, F, Fut>(mut operation: F, policy: &RetryPolicy) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() {
                    debug!(error = %err, "not retryable, propagating");
                    return Err(err);
                }
                if attempt >= policy.max_retries {
                    debug!(attempts = attempt + 1, "retry budget exhausted");
                    return Err(err);
                }

                // A Retry-After hint overrides the computed backoff for this
                // attempt only.
                let delay = match &err {
                    Error::Api(ApiError::RateLimit {
                        retry_after: Some(secs),
                        ..
                    }) => Duration::from_secs(*secs),
                    _ => compute_delay(policy, attempt),
                };

                debug!(
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "retrying after delay"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
