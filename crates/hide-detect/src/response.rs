//! Decoding the detection service's answer.
//!
//! The service replies with a JSON object, sometimes wrapped in a Markdown
//! code fence. Field names follow the upstream service (`detectedA4`,
//! `leatherVerticesFlat`, ...) or our own snake_case names.

use hide_core::measurement::MAX_CONFIDENCE;
use hide_core::{MeasurementResult, Polygon, ReferenceSheet};
use serde::Deserialize;

use crate::error::DetectError;

/// Raw detector output, before calibration.
///
/// The detection flags, the area and the target vertices are required; a
/// reply without them is a parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Detection {
    #[serde(alias = "detectedA4", alias = "detectedReference")]
    pub detected_reference: bool,

    #[serde(alias = "detectedLeather", alias = "detectedTarget")]
    pub detected_target: bool,

    /// Area the service estimated, in square metres.
    #[serde(alias = "estimatedAreaSqM")]
    pub area_m2: f64,

    #[serde(default)]
    pub explanation: String,

    /// Reported confidence. Clamped to 0-100 when converted.
    #[serde(default, alias = "confidenceScore")]
    pub confidence: f64,

    /// Target outline as `[x1, y1, x2, y2, ...]` on the 0-1000 grid.
    #[serde(alias = "leatherVerticesFlat", alias = "targetVerticesFlat")]
    pub vertices_flat: Vec<f64>,

    /// Reference sheet as an outline path.
    #[serde(default, alias = "a4Outline", alias = "referenceOutline")]
    pub reference_outline: String,
}

impl Detection {
    /// Target polygon. A trailing odd coordinate is dropped.
    #[must_use]
    pub fn target(&self) -> Polygon {
        Polygon::from_flat(&self.vertices_flat)
    }

    /// Convert to a measurement, recomputing the area from the detected
    /// reference when it is usable.
    #[must_use]
    pub fn into_result(self, sheet: ReferenceSheet) -> MeasurementResult {
        let target = self.target();
        let area_m2 = if self.area_m2.is_finite() && self.area_m2 > 0.0 {
            self.area_m2
        } else {
            0.0
        };
        MeasurementResult {
            detected_reference: self.detected_reference,
            detected_target: self.detected_target,
            area_m2,
            explanation: self.explanation,
            confidence: clamp_confidence(self.confidence),
            target,
            reference_outline: self.reference_outline,
            manual: false,
            edited: false,
        }
        .recalibrated(sheet)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_confidence(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, f64::from(MAX_CONFIDENCE)) as u8
    } else {
        0
    }
}

/// Remove a surrounding Markdown code fence, if any.
#[must_use]
pub fn strip_fences(body: &str) -> &str {
    let mut text = body.trim();
    if let Some(rest) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    {
        text = rest;
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Decode a response body into a [`Detection`].
///
/// # Errors
///
/// Returns [`DetectError::Parse`] if the body is empty or not a JSON object
/// with the expected fields.
pub fn decode_detection(body: &str) -> Result<Detection, DetectError> {
    let json = strip_fences(body);
    if json.is_empty() {
        return Err(DetectError::Parse("empty response from detector".into()));
    }
    serde_json::from_str(json).map_err(|e| DetectError::Parse(e.to_string()))
}
