//! Screen to grid coordinate mapping.
//!
//! A grid point `p` is drawn at `c + pan + (base(p) - c) * zoom`, where `c` is
//! the centre of the surface and `base(p)` places the 0-1000 grid over the
//! surface's bounding box. [`to_grid`] inverts that and clamps the result.

use hide_core::{GRID_MAX, Point};

use crate::error::EditorError;
use crate::view::ViewTransform;

/// A position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The rendered bounding box of the image, in screen pixels, before zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Surface {
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidSurface`] unless all values are finite and
    /// both dimensions are positive.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self, EditorError> {
        let finite = [left, top, width, height].iter().all(|v| v.is_finite());
        if !finite || width <= 0.0 || height <= 0.0 {
            return Err(EditorError::InvalidSurface { width, height });
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    fn centre(&self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Map a screen position to the grid, undoing pan and zoom.
#[must_use]
pub fn to_grid(screen: ScreenPoint, surface: &Surface, view: &ViewTransform) -> Point {
    let c = surface.centre();
    let pan = view.pan();
    let zoom = view.zoom();
    let base_x = c.x + (screen.x - c.x - pan.x) / zoom;
    let base_y = c.y + (screen.y - c.y - pan.y) / zoom;
    Point::clamped(
        (base_x - surface.left) * GRID_MAX / surface.width,
        (base_y - surface.top) * GRID_MAX / surface.height,
    )
}

/// Where a grid point is drawn on screen.
#[must_use]
pub fn to_screen(point: Point, surface: &Surface, view: &ViewTransform) -> ScreenPoint {
    let c = surface.centre();
    let pan = view.pan();
    let zoom = view.zoom();
    let base_x = surface.left + point.x * surface.width / GRID_MAX;
    let base_y = surface.top + point.y * surface.height / GRID_MAX;
    ScreenPoint::new(
        c.x + pan.x + (base_x - c.x) * zoom,
        c.y + pan.y + (base_y - c.y) * zoom,
    )
}
