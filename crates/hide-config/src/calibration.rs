//! Reference sheet and rescaling configuration.

use hide_core::ReferenceSheet;
use hide_core::calibration::DEFAULT_MIN_UNIT_AREA;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_min_original_unit_area() -> f64 {
    DEFAULT_MIN_UNIT_AREA
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CalibrationConfig {
    /// Paper size photographed next to the hide.
    #[serde(default)]
    pub reference_sheet: ReferenceSheet,

    /// Smallest original polygon area (grid units squared) that adjusting a
    /// result will rescale from.
    #[serde(default = "default_min_original_unit_area")]
    pub min_original_unit_area: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            reference_sheet: ReferenceSheet::default(),
            min_original_unit_area: default_min_original_unit_area(),
        }
    }
}

impl CalibrationConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_original_unit_area.is_finite() || self.min_original_unit_area < 0.0 {
            return Err(ConfigError::invalid(
                "calibration.min_original_unit_area",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}
