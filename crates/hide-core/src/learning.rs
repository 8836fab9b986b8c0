//! The learning reference: the last detailed trace an operator confirmed.
//!
//! It is sent with the next automatic detection request so the detector can
//! bias its segmentation toward what the operator accepted before.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::geometry::Polygon;

/// Minimum target points for a trace to be worth learning from.
pub const MIN_POINTS: usize = 11;

/// A thumbnail paired with the confirmed target polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LearningReference {
    /// Base64-encoded JPEG thumbnail of the photograph.
    pub thumbnail: String,
    pub target: Polygon,
    pub captured_at: DateTime<Utc>,
}

impl LearningReference {
    /// Build a reference, rejecting traces with 10 points or fewer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the target is not detailed enough
    /// or the thumbnail is empty.
    pub fn new(thumbnail: impl Into<String>, target: Polygon) -> Result<Self, CoreError> {
        let thumbnail = thumbnail.into();
        if !is_detailed_enough(&target) {
            return Err(CoreError::Validation(format!(
                "learning reference needs at least {MIN_POINTS} points, got {}",
                target.len()
            )));
        }
        if thumbnail.is_empty() {
            return Err(CoreError::Validation("learning thumbnail is empty".into()));
        }
        Ok(Self {
            thumbnail,
            target,
            captured_at: Utc::now(),
        })
    }
}

/// Whether `target` has strictly more than 10 points.
#[must_use]
pub fn is_detailed_enough(target: &Polygon) -> bool {
    target.len() >= MIN_POINTS
}
