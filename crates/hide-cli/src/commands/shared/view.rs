use hide_core::{MeasurementRecord, MeasurementResult};
use hide_store::{Capture, SaveReport, StoreError};
use serde::Serialize;

/// A measurement as printed by `measure`, `trace` and `adjust`.
#[derive(Debug, Serialize)]
pub struct MeasurementView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub method: &'static str,
    pub area_m2: f64,
    pub confidence: u8,
    pub detected_reference: bool,
    pub detected_target: bool,
    pub target_points: usize,
    /// Boundary length in grid units.
    pub perimeter: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<String>,
    pub explanation: String,
    pub reference_outline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl MeasurementView {
    /// A result that was not saved.
    pub fn unsaved(result: &MeasurementResult) -> Self {
        Self {
            id: None,
            method: result.method().as_str(),
            area_m2: result.area_m2,
            confidence: result.confidence,
            detected_reference: result.detected_reference,
            detected_target: result.detected_target,
            target_points: result.target.len(),
            perimeter: (result.target.perimeter() * 10.0).round() / 10.0,
            centroid: result.target.centroid().map(|c| format!("{:.1}, {:.1}", c.x, c.y)),
            explanation: result.explanation.clone(),
            reference_outline: result.reference_outline.clone(),
            learning: None,
            warnings: Vec::new(),
        }
    }

    pub fn saved(report: &SaveReport) -> Self {
        Self {
            id: Some(report.record.id.clone()),
            learning: report.learning.map(describe_capture),
            warnings: warnings(&report.warnings),
            ..Self::unsaved(&report.record.result)
        }
    }
}

/// One history row.
#[derive(Debug, Serialize)]
pub struct RecordRow {
    pub id: String,
    pub created_at: String,
    pub image: String,
    pub method: &'static str,
    pub area_m2: f64,
    pub confidence: u8,
    pub points: usize,
}

impl From<&MeasurementRecord> for RecordRow {
    fn from(record: &MeasurementRecord) -> Self {
        Self {
            id: record.id.clone(),
            created_at: record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            image: record.image_name.clone().unwrap_or_else(|| "-".into()),
            method: record.result.method().as_str(),
            area_m2: record.result.area_m2,
            confidence: record.result.confidence,
            points: record.result.target.len(),
        }
    }
}

fn describe_capture(capture: Capture) -> String {
    match capture {
        Capture::Stored => "stored".to_string(),
        Capture::Skipped { points } => format!("skipped ({points} points, needs more than 10)"),
    }
}

pub fn warnings(errors: &[StoreError]) -> Vec<String> {
    errors.iter().map(|error| format!("not persisted: {error}")).collect()
}
