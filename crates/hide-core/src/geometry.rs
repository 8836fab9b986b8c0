//! Points and polygons on the fixed logical grid.
//!
//! Every coordinate that crosses a crate boundary lives on the
//! `[0, 1000] x [0, 1000]` grid, independent of image resolution or on-screen
//! zoom. Polygons are implicitly closed: the last point connects to the first.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// Lower bound of the logical grid on both axes.
pub const GRID_MIN: f64 = 0.0;

/// Upper bound of the logical grid on both axes.
pub const GRID_MAX: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A coordinate pair on the logical grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point, rejecting non-finite or out-of-grid coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] if either coordinate is NaN, infinite,
    /// or outside `[0, 1000]`.
    pub fn new(x: f64, y: f64) -> Result<Self, CoreError> {
        if in_grid(x) && in_grid(y) {
            Ok(Self { x, y })
        } else {
            Err(CoreError::OutOfRange { x, y })
        }
    }

    /// Create a point by clamping both coordinates into the grid.
    ///
    /// Non-finite values clamp to the grid origin on that axis.
    #[must_use]
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Euclidean distance to another point, in grid units.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

fn in_grid(value: f64) -> bool {
    value.is_finite() && (GRID_MIN..=GRID_MAX).contains(&value)
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(GRID_MIN, GRID_MAX)
    } else {
        GRID_MIN
    }
}

#[derive(Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPoint::deserialize(deserializer)?;
        Self::new(raw.x, raw.y).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Polygon
// ---------------------------------------------------------------------------

/// An ordered, implicitly closed sequence of points.
///
/// Insertion order defines the boundary traversal. A polygon with fewer than
/// three points is "incomplete" and has area 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    #[must_use]
    pub const fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a polygon from a flat `[x1, y1, x2, y2, ...]` list.
    ///
    /// A trailing unpaired value is dropped. Coordinates are clamped into the grid.
    #[must_use]
    pub fn from_flat(values: &[f64]) -> Self {
        let points = values
            .chunks_exact(2)
            .map(|pair| Point::clamped(pair[0], pair[1]))
            .collect();
        Self { points }
    }

    /// Flatten into `[x1, y1, x2, y2, ...]`.
    #[must_use]
    pub fn to_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polygon has enough points to enclose an area.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Remove and return the most recently appended point.
    pub fn pop(&mut self) -> Option<Point> {
        self.points.pop()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Replace the vertex at `index`. Returns `false` if the index is out of bounds.
    pub fn set(&mut self, index: usize, point: Point) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    /// Shoelace sum halved, keeping the sign of the traversal direction.
    ///
    /// Positive for counter-clockwise traversal in a y-up frame (clockwise on
    /// screen, where y grows downward). Zero for incomplete polygons.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x.mul_add(b.y, -(b.x * a.y))
            })
            .sum();
        twice / 2.0
    }

    /// Enclosed area in square grid units. Always non-negative.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Closed boundary length in grid units. Zero for fewer than two points.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.points[i].distance_to(&self.points[(i + 1) % n]))
            .sum()
    }

    /// Vertex average. `None` for an empty polygon.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::clamped(sx / n, sy / n))
    }

    /// Index of the vertex nearest to `target` within `radius`, if any.
    #[must_use]
    pub fn nearest_vertex(&self, target: &Point, radius: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, p)| (index, p.distance_to(target)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn poly(coords: &[(f64, f64)]) -> Polygon {
        coords
            .iter()
            .map(|&(x, y)| Point::new(x, y).unwrap())
            .collect::<Vec<_>>()
            .into()
    }

    fn square(origin: f64, side: f64) -> Polygon {
        poly(&[
            (origin, origin),
            (origin + side, origin),
            (origin + side, origin + side),
            (origin, origin + side),
        ])
    }

    #[test]
    fn point_new_rejects_out_of_range() {
        assert!(Point::new(1000.0, 0.0).is_ok());
        assert!(matches!(
            Point::new(1000.5, 3.0),
            Err(CoreError::OutOfRange { .. })
        ));
        assert!(Point::new(-0.1, 3.0).is_err());
        assert!(Point::new(f64::NAN, 3.0).is_err());
        assert!(Point::new(3.0, f64::INFINITY).is_err());
    }

    #[test]
    fn point_clamped_pins_to_grid() {
        assert_eq!(Point::clamped(-5.0, 1200.0), Point { x: 0.0, y: 1000.0 });
        assert_eq!(Point::clamped(f64::NAN, 10.0), Point { x: 0.0, y: 10.0 });
    }

    #[test]
    fn point_deserialize_validates_range() {
        let ok: Point = serde_json::from_str(r#"{"x": 10.5, "y": 999}"#).unwrap();
        assert_eq!(ok, Point { x: 10.5, y: 999.0 });
        assert!(serde_json::from_str::<Point>(r#"{"x": 10.5, "y": 1001}"#).is_err());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn degenerate_polygons_have_zero_area(#[case] count: usize) {
        let points: Vec<Point> = [(10.0, 10.0), (500.0, 20.0)]
            .iter()
            .take(count)
            .map(|&(x, y)| Point::new(x, y).unwrap())
            .collect();
        let polygon = Polygon::from_points(points);
        assert_eq!(polygon.area(), 0.0);
        assert!(!polygon.is_complete());
    }

    #[rstest]
    #[case(square(0.0, 300.0), 90_000.0)]
    #[case(square(100.0, 150.0), 22_500.0)]
    #[case(poly(&[(0.0, 0.0), (400.0, 0.0), (0.0, 300.0)]), 60_000.0)]
    fn area_matches_known_shapes(#[case] polygon: Polygon, #[case] expected: f64) {
        assert!((polygon.area() - expected).abs() < 1e-9);
    }

    #[test]
    fn area_is_invariant_under_rotation_and_reversal() {
        let base = vec![
            (120.0, 80.0),
            (610.0, 140.0),
            (720.0, 530.0),
            (400.0, 760.0),
            (150.0, 470.0),
        ];
        let expected = poly(&base).area();
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            assert!((poly(&rotated).area() - expected).abs() < 1e-9);
            rotated.reverse();
            assert!((poly(&rotated).area() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn signed_area_flips_with_direction() {
        let forward = square(0.0, 10.0);
        let mut reversed_points = forward.points().to_vec();
        reversed_points.reverse();
        let reversed = Polygon::from_points(reversed_points);
        assert!((forward.signed_area() + reversed.signed_area()).abs() < 1e-9);
        assert!(forward.signed_area() != 0.0);
    }

    #[test]
    fn flat_roundtrip_drops_trailing_value_and_clamps() {
        let polygon = Polygon::from_flat(&[1.0, 2.0, 3.0, 4.0, 1500.0, -2.0, 7.0]);
        assert_eq!(polygon.len(), 3);
        assert_eq!(polygon.get(2), Some(Point { x: 1000.0, y: 0.0 }));
        assert_eq!(polygon.to_flat(), vec![1.0, 2.0, 3.0, 4.0, 1000.0, 0.0]);
    }

    #[test]
    fn perimeter_and_centroid_of_square() {
        let sq = square(100.0, 200.0);
        assert!((sq.perimeter() - 800.0).abs() < 1e-9);
        assert_eq!(sq.centroid(), Some(Point { x: 200.0, y: 200.0 }));
        assert_eq!(Polygon::new().centroid(), None);
    }

    #[test]
    fn nearest_vertex_respects_radius() {
        let sq = square(100.0, 200.0);
        let near = Point::new(105.0, 98.0).unwrap();
        assert_eq!(sq.nearest_vertex(&near, 10.0), Some(0));
        assert_eq!(sq.nearest_vertex(&near, 2.0), None);
    }

    #[test]
    fn set_and_pop_mutate_in_place() {
        let mut sq = square(0.0, 10.0);
        assert!(sq.set(1, Point::new(20.0, 0.0).unwrap()));
        assert!(!sq.set(9, Point::new(1.0, 1.0).unwrap()));
        assert_eq!(sq.pop(), Some(Point { x: 0.0, y: 10.0 }));
        assert_eq!(sq.len(), 3);
    }
}
