//! The vertex editor session.
//!
//! A session owns an in-progress reference polygon and target polygon, a
//! view transform, and at most one active vertex drag. Input arrives as
//! discrete events; each reports whether it was applied or why it was
//! ignored. Ignored input never changes state.

use std::fmt;

use hide_core::calibration::DEFAULT_MIN_UNIT_AREA;
use hide_core::outline::to_outline;
use hide_core::{MeasurementResult, Point, Polygon, ReferenceSheet, ScaleRatio, calibrate};
use tracing::{debug, warn};

use crate::error::EditorError;
use crate::normalize::{ScreenPoint, Surface, to_grid};
use crate::step::EditorStep;
use crate::view::{DEFAULT_ZOOM_STEP, ViewTransform};

/// Points that make up a captured reference sheet.
pub const REFERENCE_POINTS: usize = 4;

/// Points a target needs before it can be finalized.
pub const MIN_TARGET_POINTS: usize = 3;

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub zoom_step: f64,
    /// Vertex grab radius in grid units at zoom 1.
    pub vertex_hit_radius: f64,
    /// Outline stroke width in grid units at zoom 1.
    pub stroke_width: f64,
    pub reference_sheet: ReferenceSheet,
    pub min_original_unit_area: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            vertex_hit_radius: 15.0,
            stroke_width: 3.0,
            reference_sheet: ReferenceSheet::A4,
            min_original_unit_area: DEFAULT_MIN_UNIT_AREA,
        }
    }
}

/// Result of feeding one event into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl InputOutcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    ReferenceComplete,
    NotCapturing,
    NoVertexHit,
    DragInProgress,
    NoActiveGesture,
    NothingToUndo,
    NotReady,
    AtZoomLimit,
    PanModeActive,
}

impl IgnoreReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReferenceComplete => "reference already has 4 points",
            Self::NotCapturing => "points can only be added while capturing",
            Self::NoVertexHit => "no vertex under the pointer",
            Self::DragInProgress => "another vertex is being dragged",
            Self::NoActiveGesture => "no drag or pan in progress",
            Self::NothingToUndo => "nothing to undo",
            Self::NotReady => "not enough points to continue",
            Self::AtZoomLimit => "zoom is at its limit",
            Self::PanModeActive => "pan mode is on",
        }
    }
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Scale {
    /// Fresh trace: scale from the captured reference sheet.
    Absolute { real_area_m2: f64 },
    /// Adjusting a result: scale from the original measurement, if stable.
    Relative(Option<ScaleRatio>),
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    base: MeasurementResult,
    manual: bool,
    step: EditorStep,
    reference: Polygon,
    target: Polygon,
    drag: Option<usize>,
    view: ViewTransform,
    scale: Scale,
    area_m2: f64,
    settings: EditorSettings,
}

impl EditorSession {
    /// Start a fresh manual trace at `capturing_reference` with empty polygons.
    #[must_use]
    pub fn manual(base: MeasurementResult, settings: EditorSettings) -> Self {
        let real_area_m2 = settings.reference_sheet.area_m2();
        debug!(sheet = %settings.reference_sheet, "manual editor session started");
        Self {
            base,
            manual: true,
            step: EditorStep::CapturingReference,
            reference: Polygon::new(),
            target: Polygon::new(),
            drag: None,
            view: ViewTransform::new(settings.zoom_step),
            scale: Scale::Absolute { real_area_m2 },
            area_m2: 0.0,
            settings,
        }
    }

    /// Start adjusting an existing result at `done`.
    ///
    /// Area changes are proportional to the original measurement. If the
    /// original polygon is too small for a stable ratio, the area is held.
    #[must_use]
    pub fn adjust(base: MeasurementResult, settings: EditorSettings) -> Self {
        let ratio = ScaleRatio::from_original(
            &base.target,
            base.area_m2,
            settings.min_original_unit_area,
        );
        if ratio.is_none() && !base.target.is_empty() {
            warn!(
                unit_area = base.target.area(),
                area_m2 = base.area_m2,
                "original measurement too small to rescale; area will be held"
            );
        }
        let reference = base.reference_polygon().unwrap_or_else(|error| {
            warn!(%error, "reference outline could not be parsed");
            Polygon::new()
        });
        debug!(points = base.target.len(), "adjust editor session started");
        Self {
            manual: false,
            step: EditorStep::Done,
            reference,
            target: base.target.clone(),
            drag: None,
            view: ViewTransform::new(settings.zoom_step),
            scale: Scale::Relative(ratio),
            area_m2: base.area_m2,
            base,
            settings,
        }
    }

    // -- accessors -----------------------------------------------------------

    #[must_use]
    pub const fn step(&self) -> EditorStep {
        self.step
    }

    #[must_use]
    pub const fn is_manual(&self) -> bool {
        self.manual
    }

    #[must_use]
    pub const fn reference(&self) -> &Polygon {
        &self.reference
    }

    #[must_use]
    pub const fn target(&self) -> &Polygon {
        &self.target
    }

    /// Live metric area in square metres.
    #[must_use]
    pub const fn area_m2(&self) -> f64 {
        self.area_m2
    }

    #[must_use]
    pub const fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Index of the target vertex being dragged.
    #[must_use]
    pub const fn dragging(&self) -> Option<usize> {
        self.drag
    }

    /// Whether `advance` would currently succeed.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.step {
            EditorStep::CapturingReference => self.reference.len() == REFERENCE_POINTS,
            EditorStep::CapturingTarget => self.target.len() >= MIN_TARGET_POINTS,
            EditorStep::Done => false,
        }
    }

    /// Grab radius in grid units at the current zoom.
    #[must_use]
    pub fn hit_radius(&self) -> f64 {
        self.view.scaled_for_screen(self.settings.vertex_hit_radius)
    }

    /// Stroke width in grid units at the current zoom.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.view.scaled_for_screen(self.settings.stroke_width)
    }

    /// Outline of the reference as it would be saved.
    #[must_use]
    pub fn reference_outline(&self) -> String {
        if self.manual {
            to_outline(&self.reference)
        } else {
            self.base.reference_outline.clone()
        }
    }

    // -- pointer events ------------------------------------------------------

    /// Pointer pressed at a screen position.
    ///
    /// In pan mode this starts a pan gesture. While capturing it appends a
    /// point. At `done` it starts dragging the nearest target vertex.
    pub fn pointer_down(&mut self, screen: ScreenPoint, surface: &Surface) -> InputOutcome {
        if self.view.pan_mode() {
            self.view.begin_pan(screen);
            return InputOutcome::Applied;
        }
        let point = to_grid(screen, surface, &self.view);
        if self.step.is_capturing() {
            return self.place_point(point);
        }
        match self.target.nearest_vertex(&point, self.hit_radius()) {
            Some(index) => self.begin_drag(index),
            None => InputOutcome::Ignored(IgnoreReason::NoVertexHit),
        }
    }

    /// Pointer moved. Updates the dragged vertex or the pan offset.
    pub fn pointer_move(&mut self, screen: ScreenPoint, surface: &Surface) -> InputOutcome {
        if self.view.pan_to(screen) {
            return InputOutcome::Applied;
        }
        let Some(index) = self.drag else {
            return InputOutcome::Ignored(IgnoreReason::NoActiveGesture);
        };
        let point = to_grid(screen, surface, &self.view);
        if self.target.set(index, point) {
            self.recompute();
            InputOutcome::Applied
        } else {
            self.drag = None;
            InputOutcome::Ignored(IgnoreReason::NoVertexHit)
        }
    }

    /// Pointer released. Ends any drag or pan gesture.
    pub fn pointer_up(&mut self) -> InputOutcome {
        let panned = self.view.end_pan();
        let dragged = self.drag.take();
        if let Some(index) = dragged {
            debug!(index, "vertex drag ended");
        }
        if panned || dragged.is_some() {
            InputOutcome::Applied
        } else {
            InputOutcome::Ignored(IgnoreReason::NoActiveGesture)
        }
    }

    /// Append a grid point to the polygon being captured.
    pub fn place_point(&mut self, point: Point) -> InputOutcome {
        if self.view.pan_mode() {
            return InputOutcome::Ignored(IgnoreReason::PanModeActive);
        }
        match self.step {
            EditorStep::CapturingReference if self.reference.len() >= REFERENCE_POINTS => {
                InputOutcome::Ignored(IgnoreReason::ReferenceComplete)
            }
            EditorStep::CapturingReference => {
                self.reference.push(point);
                self.recompute();
                InputOutcome::Applied
            }
            EditorStep::CapturingTarget => {
                self.target.push(point);
                self.recompute();
                InputOutcome::Applied
            }
            EditorStep::Done => InputOutcome::Ignored(IgnoreReason::NotCapturing),
        }
    }

    /// Start dragging target vertex `index`.
    ///
    /// Only one vertex may be dragged at a time. Re-grabbing the vertex
    /// already being dragged is accepted without change.
    pub fn begin_drag(&mut self, index: usize) -> InputOutcome {
        if self.view.pan_mode() {
            return InputOutcome::Ignored(IgnoreReason::PanModeActive);
        }
        if self.step != EditorStep::Done {
            return InputOutcome::Ignored(IgnoreReason::NotReady);
        }
        match self.drag {
            Some(active) if active == index => InputOutcome::Applied,
            Some(_) => InputOutcome::Ignored(IgnoreReason::DragInProgress),
            None if index < self.target.len() => {
                debug!(index, "vertex drag started");
                self.drag = Some(index);
                InputOutcome::Applied
            }
            None => InputOutcome::Ignored(IgnoreReason::NoVertexHit),
        }
    }

    // -- commands ------------------------------------------------------------

    /// Remove the last point of the polygon being captured.
    pub fn undo(&mut self) -> InputOutcome {
        let removed = match self.step {
            EditorStep::CapturingReference => self.reference.pop(),
            EditorStep::CapturingTarget => self.target.pop(),
            EditorStep::Done => return InputOutcome::Ignored(IgnoreReason::NotCapturing),
        };
        if removed.is_none() {
            return InputOutcome::Ignored(IgnoreReason::NothingToUndo);
        }
        self.recompute();
        InputOutcome::Applied
    }

    /// Move to the next step once the current polygon is ready.
    pub fn advance(&mut self) -> InputOutcome {
        if !self.can_advance() {
            return InputOutcome::Ignored(IgnoreReason::NotReady);
        }
        let Some(next) = self.step.next() else {
            return InputOutcome::Ignored(IgnoreReason::NotReady);
        };
        debug!(from = %self.step, to = %next, "editor step advanced");
        self.step = next;
        InputOutcome::Applied
    }

    pub fn zoom_in(&mut self) -> InputOutcome {
        if self.view.zoom_in() {
            InputOutcome::Applied
        } else {
            InputOutcome::Ignored(IgnoreReason::AtZoomLimit)
        }
    }

    pub fn zoom_out(&mut self) -> InputOutcome {
        if self.view.zoom_out() {
            InputOutcome::Applied
        } else {
            InputOutcome::Ignored(IgnoreReason::AtZoomLimit)
        }
    }

    /// Restore zoom 1 and zero pan. Points are untouched.
    pub fn reset_view(&mut self) -> InputOutcome {
        self.view.reset();
        InputOutcome::Applied
    }

    /// Toggle pan mode. Enabling it ends any active drag.
    pub fn set_pan_mode(&mut self, enabled: bool) -> InputOutcome {
        if enabled {
            self.drag = None;
        }
        self.view.set_pan_mode(enabled);
        InputOutcome::Applied
    }

    /// Finalize the session into a result.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFinished`] unless the session is at `done`.
    pub fn save(&self) -> Result<MeasurementResult, EditorError> {
        if self.step != EditorStep::Done {
            return Err(EditorError::NotFinished { step: self.step });
        }
        let mut result = self.base.clone();
        result.target = self.target.clone();
        result.area_m2 = self.area_m2;
        result.reference_outline = self.reference_outline();
        result.manual = self.manual;
        result.edited = !self.manual;
        debug!(
            method = %result.method(),
            points = result.target.len(),
            area_m2 = result.area_m2,
            "editor session saved"
        );
        Ok(result)
    }

    /// Discard every change made in this session.
    #[must_use]
    pub fn cancel(self) -> MeasurementResult {
        debug!("editor session cancelled");
        self.base
    }

    fn recompute(&mut self) {
        self.area_m2 = match self.scale {
            Scale::Absolute { real_area_m2 } => {
                calibrate(&self.reference, &self.target, real_area_m2, self.area_m2)
            }
            Scale::Relative(Some(ratio)) => ratio.apply(&self.target),
            Scale::Relative(None) => self.area_m2,
        };
    }
}
