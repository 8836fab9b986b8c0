//! Measurement results and saved history records.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::calibration::{ReferenceSheet, calibrate};
use crate::errors::CoreError;
use crate::geometry::Polygon;
use crate::outline::{parse_outline, to_outline};

/// Highest confidence score a result can carry.
pub const MAX_CONFIDENCE: u8 = 100;

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Automatic,
    Manual,
    Edited,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual => "manual",
            Self::Edited => "edited",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One measurement of a hide.
///
/// All polygons are on the 0-1000 grid. The reference object is kept as an
/// outline path so it can be rendered without re-deriving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeasurementResult {
    pub detected_reference: bool,
    pub detected_target: bool,
    pub area_m2: f64,
    pub explanation: String,
    /// 0 to 100.
    #[serde(deserialize_with = "confidence_score")]
    #[schemars(range(max = 100))]
    pub confidence: u8,
    pub target: Polygon,
    pub reference_outline: String,
    #[serde(default)]
    pub manual: bool,
    #[serde(default)]
    pub edited: bool,
}

impl MeasurementResult {
    /// Blank result for a fresh manual trace.
    #[must_use]
    pub fn blank_manual() -> Self {
        Self {
            detected_reference: true,
            detected_target: true,
            manual: true,
            explanation: "Manual measurement traced by the operator".to_string(),
            confidence: MAX_CONFIDENCE,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        match (self.manual, self.edited) {
            (true, _) => Method::Manual,
            (false, true) => Method::Edited,
            (false, false) => Method::Automatic,
        }
    }

    /// Parse the stored reference outline.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] if the outline is malformed.
    pub fn reference_polygon(&self) -> Result<Polygon, CoreError> {
        parse_outline(&self.reference_outline)
    }

    pub fn set_reference(&mut self, reference: &Polygon) {
        self.reference_outline = to_outline(reference);
    }

    /// Recompute the metric area from the reference outline.
    ///
    /// Applies only when the outline parses to a complete polygon with
    /// non-zero area and the target is complete. Otherwise the reported
    /// area is kept.
    #[must_use]
    pub fn recalibrated(mut self, sheet: ReferenceSheet) -> Self {
        let Ok(reference) = self.reference_polygon() else {
            debug!("reference outline unparseable; keeping reported area");
            return self;
        };
        if reference.area() > 0.0 && self.target.is_complete() {
            self.area_m2 = calibrate(&reference, &self.target, sheet.area_m2(), self.area_m2);
        }
        self
    }

    /// Whether the result is displayable: the hide was found and has a shape.
    #[must_use]
    pub fn has_measurement(&self) -> bool {
        self.detected_target && self.target.is_complete()
    }
}

fn confidence_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let score = u8::deserialize(deserializer)?;
    if score > MAX_CONFIDENCE {
        return Err(serde::de::Error::custom(format!(
            "confidence {score} exceeds {MAX_CONFIDENCE}"
        )));
    }
    Ok(score)
}

/// A finalized result saved to history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeasurementRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub image_name: Option<String>,
    #[serde(flatten)]
    pub result: MeasurementResult,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calibration::A4_AREA_M2;

    fn square_flat(origin: f64, side: f64) -> Vec<f64> {
        vec![
            origin,
            origin,
            origin + side,
            origin,
            origin + side,
            origin + side,
            origin,
            origin + side,
        ]
    }

    #[test]
    fn method_follows_flags() {
        let mut result = MeasurementResult::default();
        assert_eq!(result.method(), Method::Automatic);
        result.edited = true;
        assert_eq!(result.method(), Method::Edited);
        result.manual = true;
        assert_eq!(result.method(), Method::Manual);
        assert_eq!(Method::Edited.to_string(), "edited");
    }

    #[test]
    fn recalibrated_uses_reference_outline() {
        let mut result = MeasurementResult {
            detected_reference: true,
            detected_target: true,
            area_m2: 9.0,
            target: Polygon::from_flat(&square_flat(200.0, 150.0)),
            ..MeasurementResult::default()
        };
        result.set_reference(&Polygon::from_flat(&square_flat(100.0, 300.0)));

        let recalibrated = result.recalibrated(ReferenceSheet::A4);
        let expected = A4_AREA_M2 * 22_500.0 / 90_000.0;
        assert!((recalibrated.area_m2 - expected).abs() < 1e-12);
    }

    #[test]
    fn recalibrated_accepts_compact_reference_outline() {
        let result = MeasurementResult {
            detected_reference: true,
            detected_target: true,
            area_m2: 9.0,
            target: Polygon::from_flat(&square_flat(200.0, 150.0)),
            reference_outline: "M100 100L400 100L400 400L100 400Z".to_string(),
            ..MeasurementResult::default()
        };
        let recalibrated = result.recalibrated(ReferenceSheet::A4);
        assert!((recalibrated.area_m2 - 0.015_592_5).abs() < 1e-12);
    }

    #[test]
    fn recalibrated_keeps_reported_area_without_usable_reference() {
        let base = MeasurementResult {
            area_m2: 1.25,
            target: Polygon::from_flat(&square_flat(0.0, 100.0)),
            reference_outline: "not an outline".to_string(),
            ..MeasurementResult::default()
        };
        assert_eq!(base.clone().recalibrated(ReferenceSheet::A4).area_m2, 1.25);

        let mut flat = base;
        flat.reference_outline = "M 0 0 L 10 10 L 20 20 Z".to_string();
        assert_eq!(flat.recalibrated(ReferenceSheet::A4).area_m2, 1.25);
    }

    #[test]
    fn missing_flags_default_to_automatic() {
        let json = r#"{
            "detected_reference": true,
            "detected_target": true,
            "area_m2": 2.5,
            "explanation": "ok",
            "confidence": 80,
            "target": [],
            "reference_outline": ""
        }"#;
        let result: MeasurementResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.method(), Method::Automatic);
        assert!(!result.has_measurement());
    }

    #[test]
    fn confidence_above_hundred_is_rejected() {
        let json = |confidence: u32| {
            format!(
                r#"{{"detected_reference": true, "detected_target": true, "area_m2": 1.0,
                "explanation": "", "confidence": {confidence}, "target": [],
                "reference_outline": ""}}"#
            )
        };
        let ok: MeasurementResult = serde_json::from_str(&json(100)).unwrap();
        assert_eq!(ok.confidence, MAX_CONFIDENCE);
        let err = serde_json::from_str::<MeasurementResult>(&json(101)).unwrap_err();
        assert!(err.to_string().contains("confidence 101"));
    }
}
