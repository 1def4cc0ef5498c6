//! # ThumbnailGenerator
//!
//! Derives a fixed-width preview from an uploaded image, preserving the
//! source aspect ratio and re-encoding in the source format. Works on
//! byte slices only; callers decide where the result is stored.

use crate::error::{AppError, Result};
use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use std::io::Cursor;

/// Width every stored thumbnail is scaled to.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 300;

/// Decodes `bytes` (format sniffed from the content), scales to
/// `target_width` with the height rounded to keep the aspect ratio, and
/// re-encodes in the same format the source arrived in.
pub fn make_thumbnail(bytes: &[u8], target_width: u32) -> Result<Vec<u8>> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AppError::ImageDecode(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| AppError::ImageDecode("unrecognized image format".to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| AppError::ImageDecode(e.to_string()))?;

    let (source_w, source_h) = (img.width(), img.height());
    let target_height =
        ((source_h as f64 * target_width as f64 / source_w as f64).round() as u32).max(1);
    let thumb = img.resize_exact(target_width, target_height, FilterType::Triangle);

    let mut out = Cursor::new(Vec::new());
    thumb
        .write_to(&mut out, format)
        .map_err(|e| AppError::ImageDecode(e.to_string()))?;
    Ok(out.into_inner())
}
