//! Bounded retry around a [`Detector`].

use std::time::Duration;

use hide_config::DetectorConfig;
use hide_core::{MeasurementResult, ReferenceSheet};
use tracing::{debug, warn};

use crate::client::{DetectionRequest, Detector};
use crate::error::DetectError;
use crate::response::Detection;

/// Longest `Retry-After` honoured between attempts.
pub const MAX_SERVER_WAIT: Duration = Duration::from_secs(30);

/// How often, and how patiently, a detection is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Fixed delay between attempts. None follows the last attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &DetectorConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff(),
        }
    }

    /// Retry without waiting.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }

    /// Wait before the attempt that follows `error`.
    ///
    /// A rate limit's `Retry-After` raises the fixed backoff, capped at
    /// [`MAX_SERVER_WAIT`].
    #[must_use]
    pub fn delay_after(&self, error: &DetectError) -> Duration {
        match error {
            DetectError::RateLimited {
                retry_after_secs: Some(secs),
            } => self.backoff.max(Duration::from_secs(*secs).min(MAX_SERVER_WAIT)),
            _ => self.backoff,
        }
    }
}

/// Run `detector` until it succeeds or the policy is spent.
///
/// # Errors
///
/// Non-retryable errors (see [`DetectError::is_retryable`]) return at once.
/// Otherwise, after the last failed attempt, returns
/// [`DetectError::Exhausted`] wrapping that attempt's error.
pub async fn detect_with_retry<D: Detector>(
    detector: &D,
    request: &DetectionRequest,
    policy: &RetryPolicy,
) -> Result<Detection, DetectError> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match detector.detect(request).await {
            Ok(detection) => {
                debug!(attempt, "detection succeeded");
                return Ok(detection);
            }
            Err(error) if !error.is_retryable() => return Err(error),
            Err(error) => {
                warn!(%error, attempt, max_attempts = attempts, "detection attempt failed");
                if attempt >= attempts {
                    return Err(DetectError::Exhausted {
                        attempts,
                        last: Box::new(error),
                    });
                }
                tokio::time::sleep(policy.delay_after(&error)).await;
                attempt += 1;
            }
        }
    }
}

/// Detect with retry and convert to a calibrated measurement.
///
/// # Errors
///
/// See [`detect_with_retry`].
pub async fn measure<D: Detector>(
    detector: &D,
    request: &DetectionRequest,
    policy: &RetryPolicy,
    sheet: ReferenceSheet,
) -> Result<MeasurementResult, DetectError> {
    let detection = detect_with_retry(detector, request, policy).await?;
    Ok(detection.into_result(sheet))
}
