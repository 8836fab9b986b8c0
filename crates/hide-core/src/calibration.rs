//! Reference sheets and proportional area calibration.
//!
//! The metric area of a target polygon is its unit-grid area multiplied by
//! the ratio of a reference object's known real area to its unit-grid area.
//! Both polygons must come from the same photograph so they share a grid.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::geometry::Polygon;

/// Real area of an A4 sheet in square metres (210 mm x 297 mm).
pub const A4_AREA_M2: f64 = 0.06237;

/// Smallest original unit area accepted when deriving a relative-edit ratio.
pub const DEFAULT_MIN_UNIT_AREA: f64 = 1.0;

// ---------------------------------------------------------------------------
// ReferenceSheet
// ---------------------------------------------------------------------------

/// Standard paper sheet photographed next to the hide as a size reference.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSheet {
    /// 210 x 297 mm
    #[default]
    A4,
    /// 215.9 x 279.4 mm (8.5 x 11 inches)
    Letter,
    /// 297 x 420 mm
    A3,
}

impl ReferenceSheet {
    pub const ALL: [Self; 3] = [Self::A4, Self::Letter, Self::A3];

    /// Returns (width, height) in millimetres.
    #[must_use]
    pub const fn dimensions_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
            Self::A3 => (297.0, 420.0),
        }
    }

    /// Sheet area in square metres.
    #[must_use]
    pub fn area_m2(self) -> f64 {
        match self {
            Self::A4 => A4_AREA_M2,
            other => {
                let (w, h) = other.dimensions_mm();
                w * h / 1_000_000.0
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A4 => "a4",
            Self::Letter => "letter",
            Self::A3 => "a3",
        }
    }
}

impl fmt::Display for ReferenceSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceSheet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sheet| sheet.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown reference sheet '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// ScaleRatio
// ---------------------------------------------------------------------------

/// Square metres per square grid unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRatio(f64);

impl ScaleRatio {
    /// Ratio from a reference polygon of known real area.
    ///
    /// `None` when the reference is incomplete or encloses no area.
    #[must_use]
    pub fn from_reference(reference: &Polygon, real_area_m2: f64) -> Option<Self> {
        if !reference.is_complete() {
            return None;
        }
        Self::checked(real_area_m2, reference.area())
    }

    /// Ratio from a previously measured polygon and the area reported for it.
    ///
    /// Used when adjusting an existing result: dragging vertices rescales in
    /// proportion to the original measurement. `None` when the original
    /// polygon's unit area is below `min_unit_area` or the reported area is
    /// not a finite, non-negative number.
    #[must_use]
    pub fn from_original(
        original_target: &Polygon,
        original_area_m2: f64,
        min_unit_area: f64,
    ) -> Option<Self> {
        let unit_area = original_target.area();
        if unit_area < min_unit_area.max(f64::MIN_POSITIVE) {
            return None;
        }
        Self::checked(original_area_m2, unit_area)
    }

    fn checked(area_m2: f64, unit_area: f64) -> Option<Self> {
        if !area_m2.is_finite() || area_m2 < 0.0 || !unit_area.is_finite() || unit_area <= 0.0 {
            return None;
        }
        let ratio = area_m2 / unit_area;
        ratio.is_finite().then_some(Self(ratio))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Metric area of `target`. Zero for incomplete polygons.
    #[must_use]
    pub fn apply(self, target: &Polygon) -> f64 {
        target.area() * self.0
    }
}

/// Metric area of `target`, scaled by a reference of known real area.
///
/// Returns 0 when either polygon has fewer than three points. When the
/// reference encloses no area the scale is undefined and `previous_area_m2`
/// is returned unchanged.
#[must_use]
pub fn calibrate(
    reference: &Polygon,
    target: &Polygon,
    reference_real_area_m2: f64,
    previous_area_m2: f64,
) -> f64 {
    if !reference.is_complete() || !target.is_complete() {
        return 0.0;
    }
    ScaleRatio::from_reference(reference, reference_real_area_m2)
        .map_or(previous_area_m2, |ratio| ratio.apply(target))
}
