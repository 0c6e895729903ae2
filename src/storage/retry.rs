//! Bounded retry with exponential backoff

use std::time::Duration;

use crate::config::RetrySettings;
use crate::error::BudgetwiseResult;

/// Upper bound on a single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Retries an operation while it fails with a retryable error
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff: initial_backoff.min(MAX_BACKOFF),
            multiplier: if multiplier.is_finite() && multiplier >= 1.0 {
                multiplier
            } else {
                1.0
            },
        }
    }

    /// A single attempt, no retries
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO, 1.0)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent. The last error is returned.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> BudgetwiseResult<T>
    where
        F: FnMut() -> BudgetwiseResult<T>,
    {
        let mut backoff = self.initial_backoff;
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(
                        operation = what,
                        attempt,
                        max_attempts = self.max_attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "retrying"
                    );
                    std::thread::sleep(backoff);
                    backoff = self.next_backoff(backoff);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl RetryPolicy {
    fn next_backoff(&self, backoff: Duration) -> Duration {
        Duration::try_from_secs_f64(backoff.as_secs_f64() * self.multiplier)
            .unwrap_or(MAX_BACKOFF)
            .min(MAX_BACKOFF)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self::new(
            settings.max_attempts,
            Duration::from_millis(settings.initial_backoff_ms),
            settings.multiplier,
        )
    }
}
