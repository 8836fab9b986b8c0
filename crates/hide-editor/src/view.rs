//! Zoom and pan state for the editing surface.
//!
//! The view is local presentation state. It changes where grid points are
//! drawn and how pointer positions map back onto the grid, but never moves a
//! stored point.

use crate::normalize::ScreenPoint;

/// Smallest zoom factor.
pub const MIN_ZOOM: f64 = 1.0;

/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Default zoom increment.
pub const DEFAULT_ZOOM_STEP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    pan: ScreenPoint,
    step: f64,
    pan_mode: bool,
    pan_anchor: Option<ScreenPoint>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_STEP)
    }
}

impl ViewTransform {
    /// Identity view with the given zoom increment.
    ///
    /// Non-finite or non-positive steps fall back to [`DEFAULT_ZOOM_STEP`].
    #[must_use]
    pub fn new(step: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_ZOOM_STEP
        };
        Self {
            zoom: MIN_ZOOM,
            pan: ScreenPoint::ORIGIN,
            step,
            pan_mode: false,
            pan_anchor: None,
        }
    }

    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub const fn pan(&self) -> ScreenPoint {
        self.pan
    }

    #[must_use]
    pub const fn pan_mode(&self) -> bool {
        self.pan_mode
    }

    #[must_use]
    pub const fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Increase zoom by one step. Returns `false` if already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + self.step)
    }

    /// Decrease zoom by one step. Returns `false` if already at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - self.step)
    }

    fn set_zoom(&mut self, zoom: f64) -> bool {
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if (clamped - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        self.zoom = clamped;
        true
    }

    /// Restore zoom 1 and zero pan. Pan mode is left as it was.
    pub fn reset(&mut self) {
        self.zoom = MIN_ZOOM;
        self.pan = ScreenPoint::ORIGIN;
        self.pan_anchor = None;
    }

    /// Toggle pan mode. Leaving pan mode ends any pan gesture.
    pub fn set_pan_mode(&mut self, enabled: bool) {
        self.pan_mode = enabled;
        if !enabled {
            self.pan_anchor = None;
        }
    }

    /// Start a pan gesture. Returns `false` outside pan mode.
    pub fn begin_pan(&mut self, at: ScreenPoint) -> bool {
        if !self.pan_mode {
            return false;
        }
        self.pan_anchor = Some(at);
        true
    }

    /// Move the active pan gesture, translating by the pointer delta.
    pub fn pan_to(&mut self, at: ScreenPoint) -> bool {
        let Some(anchor) = self.pan_anchor else {
            return false;
        };
        self.pan = ScreenPoint::new(self.pan.x + at.x - anchor.x, self.pan.y + at.y - anchor.y);
        self.pan_anchor = Some(at);
        true
    }

    pub fn end_pan(&mut self) -> bool {
        self.pan_anchor.take().is_some()
    }

    /// Screen-constant size for strokes and hit radii at the current zoom.
    #[must_use]
    pub fn scaled_for_screen(&self, size: f64) -> f64 {
        size / self.zoom
    }
}
