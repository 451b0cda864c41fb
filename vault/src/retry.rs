//! Fixed-interval retry executor.
//!
//! The executor does not classify failures: every `Err` from the operation
//! counts as a failed attempt. Deciding what is worth retrying belongs to the
//! operation closure.

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::config::VaultConfig;

/// Default number of attempts (no retry).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Default wait between attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// A successful result together with the attempt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempted<T> {
    /// Value returned by the successful attempt
    pub value: T,
    /// 1-based attempt number
    pub attempts: u32,
}

impl<T> Attempted<T> {
    /// Discard the attempt count.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the attempt count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attempted<U> {
        Attempted {
            value: f(self.value),
            attempts: self.attempts,
        }
    }
}

/// Every attempt failed. Holds the final error unchanged.
#[derive(Error, Debug)]
#[error("failed after {attempts} attempt(s): {source}")]
pub struct ExhaustedRetries<E: std::error::Error + 'static> {
    /// Number of attempts made
    pub attempts: u32,
    /// Error from the last attempt
    #[source]
    pub source: E,
}

impl<E: std::error::Error + 'static> ExhaustedRetries<E> {
    /// Error from the last attempt.
    pub const fn last_error(&self) -> &E {
        &self.source
    }

    /// Take the last error.
    pub fn into_inner(self) -> E {
        self.source
    }
}

/// Run `operation` until it succeeds or `max_attempts` invocations have
/// failed, sleeping `interval` between attempts.
///
/// The operation receives the 1-based attempt number. A `max_attempts` of
/// zero is treated as one.
///
/// # Errors
///
/// Returns [`ExhaustedRetries`] with the last attempt's error when no
/// attempt succeeded.
pub fn with_retries<T, E, F>(
    mut operation: F,
    max_attempts: u32,
    interval: Duration,
) -> Result<Attempted<T>, ExhaustedRetries<E>>
where
    E: std::error::Error + 'static,
    F: FnMut(u32) -> Result<T, E>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        debug!(attempt, max_attempts, "attempting operation");
        match operation(attempt) {
            Ok(value) => {
                return Ok(Attempted {
                    value,
                    attempts: attempt,
                });
            }
            Err(source) if attempt >= max_attempts => {
                return Err(ExhaustedRetries {
                    attempts: attempt,
                    source,
                });
            }
            Err(_) => {
                thread::sleep(interval);
                attempt += 1;
            }
        }
    }
}

/// Attempt bound and interval for [`with_retries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total invocations allowed, including the first
    pub max_attempts: u32,
    /// Wait between attempts
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL)
    }
}

impl RetryPolicy {
    /// Create a policy.
    #[must_use]
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Single attempt, no retry.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Set the attempt bound.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the wait between attempts.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Execute an operation under this policy.
    ///
    /// # Errors
    ///
    /// See [`with_retries`].
    pub fn execute<T, E, F>(&self, operation: F) -> Result<Attempted<T>, ExhaustedRetries<E>>
    where
        E: std::error::Error + 'static,
        F: FnMut(u32) -> Result<T, E>,
    {
        with_retries(operation, self.max_attempts, self.interval)
    }
}

impl From<&VaultConfig> for RetryPolicy {
    fn from(config: &VaultConfig) -> Self {
        Self::new(config.max_attempts, config.retry_interval)
    }
}
