//! Image preparation for detection requests and learning thumbnails.
//!
//! Photos are downscaled to fit a square box (aspect ratio kept), given a
//! mild contrast boost and re-encoded as JPEG, then base64-encoded.

use std::io::Cursor;

use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::DetectError;

/// Largest accepted source file.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Longest side of the image sent for detection.
pub const DETECTION_MAX_SIDE: u32 = 1000;

/// Longest side of a learning thumbnail.
pub const THUMBNAIL_MAX_SIDE: u32 = 400;

const CONTRAST_PERCENT: f32 = 20.0;
const JPEG_QUALITY: u8 = 90;

/// A re-encoded image ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    /// Base64 JPEG without a data-URL header.
    pub base64: String,
    pub width: u32,
    pub height: u32,
}

/// Prepare a photograph for detection.
///
/// # Errors
///
/// Returns [`DetectError::TooLarge`] for files over [`MAX_UPLOAD_BYTES`],
/// or [`DetectError::Image`] if the bytes are not a decodable image.
pub fn prepare_for_detection(bytes: &[u8]) -> Result<PreparedImage, DetectError> {
    prepare(bytes, DETECTION_MAX_SIDE)
}

/// Prepare a small thumbnail for the learning reference.
///
/// # Errors
///
/// See [`prepare_for_detection`].
pub fn thumbnail(bytes: &[u8]) -> Result<PreparedImage, DetectError> {
    prepare(bytes, THUMBNAIL_MAX_SIDE)
}

/// Strip a `data:image/...;base64,` header if present.
#[must_use]
pub fn strip_data_url(encoded: &str) -> &str {
    match encoded.split_once(";base64,") {
        Some((header, data)) if header.starts_with("data:image/") => data,
        _ => encoded,
    }
}

fn prepare(bytes: &[u8], max_side: u32) -> Result<PreparedImage, DetectError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(DetectError::TooLarge {
            bytes: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let source = image::load_from_memory(bytes)?;
    let (width, height) = source.dimensions();
    let fitted = if width > max_side || height > max_side {
        source.resize(max_side, max_side, FilterType::Triangle)
    } else {
        source
    };
    let enhanced = fitted.adjust_contrast(CONTRAST_PERCENT);

    let jpeg = encode_jpeg(&enhanced)?;
    let (width, height) = enhanced.dimensions();
    debug!(width, height, bytes = jpeg.len(), "image prepared");

    Ok(PreparedImage {
        base64: base64::engine::general_purpose::STANDARD.encode(jpeg),
        width,
        height,
    })
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, DetectError> {
    let mut out = Cursor::new(Vec::new());
    // JPEG has no alpha channel.
    let rgb = image.to_rgb8();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&rgb)?;
    Ok(out.into_inner())
}
