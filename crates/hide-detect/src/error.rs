//! Detection error types.

use thiserror::Error;

/// Errors that can occur while preparing or running a detection.
#[derive(Debug, Error)]
pub enum DetectError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited{}", retry_hint(.retry_after_secs))]
    RateLimited {
        /// Seconds from the `Retry-After` header, when it carried a number.
        retry_after_secs: Option<u64>,
    },

    /// The response body was not a usable detection.
    #[error("parse error: {0}")]
    Parse(String),

    /// Endpoint or API key missing.
    #[error("detector not configured: {0}")]
    NotConfigured(String),

    /// The image could not be decoded or encoded.
    #[error("image error: {0}")]
    Image(String),

    #[error("image is {bytes} bytes; the limit is {limit}")]
    TooLarge { bytes: usize, limit: usize },

    /// Every attempt failed. `last` is the final attempt's error.
    #[error("detection failed after {attempts} attempts (the service may be overloaded): {last}")]
    Exhausted {
        attempts: u32,
        last: Box<DetectError>,
    },
}

impl DetectError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Configuration and input problems fail the same way every time.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Api { .. } | Self::RateLimited { .. } | Self::Parse(_) => true,
            Self::NotConfigured(_) | Self::Image(_) | Self::TooLarge { .. } | Self::Exhausted { .. } => {
                false
            }
        }
    }
}

#[allow(clippy::ref_option)]
fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    retry_after_secs.map_or_else(String::new, |secs| format!(", retry after {secs}s"))
}

impl From<image::ImageError> for DetectError {
    fn from(error: image::ImageError) -> Self {
        Self::Image(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_final() {
        assert!(!DetectError::NotConfigured("api_key".into()).is_retryable());
        assert!(!DetectError::TooLarge { bytes: 2, limit: 1 }.is_retryable());
        assert!(DetectError::Api { status: 503, message: String::new() }.is_retryable());
        assert!(DetectError::Parse("truncated".into()).is_retryable());
    }

    #[test]
    fn exhausted_message_carries_cause() {
        let err = DetectError::Exhausted {
            attempts: 3,
            last: Box::new(DetectError::Api {
                status: 503,
                message: "overloaded".into(),
            }),
        };
        let text = err.to_string();
        assert!(text.contains("3 attempts"));
        assert!(text.contains("API error (503): overloaded"));
    }

    #[test]
    fn rate_limit_message_mentions_wait_only_when_known() {
        let known = DetectError::RateLimited {
            retry_after_secs: Some(12),
        };
        let unknown = DetectError::RateLimited {
            retry_after_secs: None,
        };
        assert_eq!(known.to_string(), "rate limited, retry after 12s");
        assert_eq!(unknown.to_string(), "rate limited");
    }
}
