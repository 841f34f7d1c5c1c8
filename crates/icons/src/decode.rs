//! Bounded image decoding.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{ImageReader, Limits, RgbaImage};

use crate::error::IconError;

/// Upper bound on decoder allocations (bytes).
const MAX_DECODE_ALLOC: u64 = 256 * 1024 * 1024;

/// Returns the size an image should be shown at to fit `max` × `max`.
///
/// Aspect ratio is preserved and images are never upscaled. Each side is
/// rounded and kept at least 1 px.
pub fn bounded_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let ratio = f64::min(
        f64::from(max) / f64::from(width),
        f64::from(max) / f64::from(height),
    );
    let scale = |side: u32| ((f64::from(side) * ratio).round() as u32).clamp(1, max);
    (scale(width), scale(height))
}

/// Decodes PNG, JPEG or WebP bytes and shrinks the result to fit `max`.
///
/// The format is guessed from content, not from the file name. Sources of
/// any size are accepted as long as the decoded pixels fit the allocation
/// cap.
pub fn decode_bounded(bytes: &[u8], max: u32) -> Result<RgbaImage, IconError> {
    if bytes.is_empty() {
        return Err(IconError::Empty);
    }

    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let mut limits = Limits::default();
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    reader.limits(limits);

    let image = reader.decode()?;
    let (width, height) = bounded_dimensions(image.width(), image.height(), max);
    let image = if (width, height) == (image.width(), image.height()) {
        image
    } else {
        image.resize_exact(width, height, FilterType::Triangle)
    };

    Ok(image.into_rgba8())
}
