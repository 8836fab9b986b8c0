//! # hide-core
//!
//! Core types for hidemeter: the unit-grid geometry, outline codec, scale
//! calibration, and the measurement records that cross every crate boundary.
//!
//! This crate provides the foundational types shared across all hidemeter crates:
//! - [`Point`] and [`Polygon`] on the fixed 0-1000 logical grid
//! - Shoelace area, perimeter, and centroid helpers
//! - Outline (path string) serialization for reference shapes
//! - Reference sheet sizes and proportional scale calibration
//! - Measurement results, history records, and the learning reference
//! - Prefixed ID generation
//! - Cross-cutting error types

pub mod calibration;
pub mod errors;
pub mod geometry;
pub mod ids;
pub mod learning;
pub mod measurement;
pub mod outline;

pub use calibration::{ReferenceSheet, ScaleRatio, calibrate};
pub use errors::CoreError;
pub use geometry::{GRID_MAX, GRID_MIN, Point, Polygon};
pub use learning::LearningReference;
pub use measurement::{MeasurementRecord, MeasurementResult, Method};
