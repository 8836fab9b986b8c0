//! # hide-detect
//!
//! The detection collaborator for hidemeter.
//!
//! - [`Detector`] trait and the reqwest-backed [`HttpDetector`]
//! - [`RetryPolicy`] and [`detect_with_retry`] (bounded attempts, fixed backoff)
//! - Response decoding, tolerant of Markdown code fences
//! - Image payload preparation and learning thumbnails

pub mod client;
pub mod error;
pub mod http;
pub mod payload;
pub mod response;
pub mod retry;

pub use client::{DetectionRequest, Detector, HttpDetector};
pub use error::DetectError;
pub use payload::{PreparedImage, prepare_for_detection, thumbnail};
pub use response::{Detection, decode_detection};
pub use retry::{RetryPolicy, detect_with_retry, measure};
