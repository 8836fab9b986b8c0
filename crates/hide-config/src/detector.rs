//! Remote segmentation service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_backoff_ms() -> u64 {
    1000
}

const fn default_temperature() -> f32 {
    0.1
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectorConfig {
    /// Full URL the measurement request is POSTed to.
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token for the service.
    #[serde(default)]
    pub api_key: String,

    /// Model name forwarded to the service. Empty uses the service default.
    #[serde(default)]
    pub model: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per detection, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts, in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Sampling temperature. Low values keep the geometry stable.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            model: String::new(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            temperature: default_temperature(),
        }
    }
}

impl DetectorConfig {
    /// Check if the endpoint and API key are both set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "detector.max_attempts",
                "must be at least 1",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("detector.timeout_secs", "must be positive"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid(
                "detector.temperature",
                format!("{} is outside 0.0..=2.0", self.temperature),
            ));
        }
        if !self.endpoint.is_empty()
            && !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://"))
        {
            return Err(ConfigError::invalid(
                "detector.endpoint",
                "must be an http:// or https:// URL",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = DetectorConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn configured_when_endpoint_and_key_set() {
        let config = DetectorConfig {
            endpoint: "https://segment.example.com/v1/measure".into(),
            api_key: "key123".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn zero_attempts_is_invalid() {
        let config = DetectorConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "detector.max_attempts"
        ));
    }

    #[test]
    fn non_http_endpoint_is_invalid() {
        let config = DetectorConfig {
            endpoint: "ftp://segment.example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
