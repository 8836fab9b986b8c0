//! Editing canvas configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_zoom_step() -> f64 {
    0.5
}

const fn default_vertex_hit_radius() -> f64 {
    15.0
}

const fn default_stroke_width() -> f64 {
    3.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EditorConfig {
    /// Zoom increment per zoom-in/zoom-out.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Vertex grab radius in grid units at zoom 1.
    #[serde(default = "default_vertex_hit_radius")]
    pub vertex_hit_radius: f64,

    /// Outline stroke width in grid units at zoom 1.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
            vertex_hit_radius: default_vertex_hit_radius(),
            stroke_width: default_stroke_width(),
        }
    }
}

impl EditorConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("editor.zoom_step", self.zoom_step),
            ("editor.vertex_hit_radius", self.vertex_hit_radius),
            ("editor.stroke_width", self.stroke_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(field, format!("{value} must be positive")));
            }
        }
        Ok(())
    }
}
