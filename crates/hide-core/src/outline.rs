//! Path-style outline codec.
//!
//! An outline is `M x y L x y ... Z`: move to the first point, line to every
//! following point, and close only when the polygon is complete.

use crate::errors::CoreError;
use crate::geometry::{Point, Polygon};

/// Serialize a polygon as an outline path.
///
/// Empty polygons produce an empty string. Polygons with fewer than three
/// points are left open.
#[must_use]
pub fn to_outline(polygon: &Polygon) -> String {
    let mut parts = Vec::with_capacity(polygon.len() * 3 + 1);
    for (index, point) in polygon.points().iter().enumerate() {
        parts.push(if index == 0 { "M" } else { "L" }.to_string());
        parts.push(format_coord(point.x));
        parts.push(format_coord(point.y));
    }
    if polygon.is_complete() {
        parts.push("Z".to_string());
    }
    parts.join(" ")
}

/// Parse an outline path produced by [`to_outline`] or an upstream detector.
///
/// Commas are accepted as separators, and command letters may touch their
/// coordinates (`M100 100L400 100Z`). Coordinates outside the grid are rejected.
///
/// # Errors
///
/// Returns [`CoreError::InvalidOutline`] for unknown commands, missing or
/// non-numeric coordinates, or a path that does not start with `M`, and
/// [`CoreError::OutOfRange`] for coordinates outside the grid.
pub fn parse_outline(outline: &str) -> Result<Polygon, CoreError> {
    let tokens = tokenize(outline);
    let mut polygon = Polygon::new();
    let mut position = 0;

    while position < tokens.len() {
        let command = tokens[position];
        match command {
            "M" | "m" if polygon.is_empty() => {}
            "M" | "m" => return Err(invalid(position, "move-to after the first point")),
            "L" | "l" if !polygon.is_empty() => {}
            "L" | "l" => return Err(invalid(position, "outline must start with M")),
            "Z" | "z" => {
                if position + 1 != tokens.len() {
                    return Err(invalid(position, "close must be the last command"));
                }
                break;
            }
            other => return Err(invalid(position, &format!("unknown command '{other}'"))),
        }
        let x = coord(&tokens, position + 1)?;
        let y = coord(&tokens, position + 2)?;
        polygon.push(Point::new(x, y)?);
        position += 3;
    }

    Ok(polygon)
}

/// Split into command letters and number tokens.
fn tokenize(outline: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (index, ch) in outline.char_indices() {
        // `e` belongs to exponent notation.
        let is_command = ch.is_ascii_alphabetic() && !matches!(ch, 'e' | 'E');
        if ch.is_whitespace() || ch == ',' || is_command {
            if let Some(begin) = start.take() {
                tokens.push(&outline[begin..index]);
            }
            if is_command {
                tokens.push(&outline[index..=index]);
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(begin) = start {
        tokens.push(&outline[begin..]);
    }
    tokens
}

fn coord(tokens: &[&str], position: usize) -> Result<f64, CoreError> {
    let token = tokens
        .get(position)
        .ok_or_else(|| invalid(position, "missing coordinate"))?;
    token
        .parse::<f64>()
        .map_err(|_| invalid(position, &format!("'{token}' is not a number")))
}

fn invalid(position: usize, reason: &str) -> CoreError {
    CoreError::InvalidOutline {
        position,
        reason: reason.to_string(),
    }
}

fn format_coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}
