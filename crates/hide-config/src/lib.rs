//! # hide-config
//!
//! Layered configuration loading for hidemeter using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HIDEMETER_*` prefix, `__` as separator)
//! 2. Project-level `.hidemeter/config.toml`
//! 3. User-level `~/.config/hidemeter/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HIDEMETER_DETECTOR__API_KEY` -> `detector.api_key`,
//! `HIDEMETER_EDITOR__ZOOM_STEP` -> `editor.zoom_step`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use hide_config::HideConfig;
//!
//! let config = HideConfig::load_with_dotenv().expect("config");
//!
//! if config.detector.is_configured() {
//!     println!("Detector: {}", config.detector.endpoint);
//! }
//! ```

mod calibration;
mod detector;
mod editor;
mod error;
mod storage;

pub use calibration::CalibrationConfig;
pub use detector::DetectorConfig;
pub use editor::EditorConfig;
pub use error::ConfigError;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "HIDEMETER_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HideConfig {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
}

impl HideConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".hidemeter/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detector.validate()?;
        self.editor.validate()?;
        self.calibration.validate()
    }

    /// Detector section, or an error if the endpoint or key is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the detector is unset.
    pub fn require_detector(&self) -> Result<&DetectorConfig, ConfigError> {
        if self.detector.is_configured() {
            Ok(&self.detector)
        } else {
            Err(ConfigError::NotConfigured {
                section: "detector".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hidemeter").join("config.toml"))
    }
}
