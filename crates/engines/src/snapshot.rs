//! PNG output of a rendered [`Pixmap`].
//!
//! This module is feature-gated behind `png` (default on) so that library
//! users who only want pixels can skip the `image` crate. The pixel buffer
//! conversion itself lives in [`crate::pixel`] (always available).

use artgen_core::error::EngineError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tiny_skia::Pixmap;

use crate::pixel::pixmap_to_rgba;

/// Encodes `pixmap` as PNG in memory, then writes it to `path` in one call.
///
/// Nothing is written unless encoding succeeded. Every failure is
/// `EngineError::OutputWriteFailure` naming the path.
pub fn write_png(pixmap: &Pixmap, path: &Path) -> Result<(), EngineError> {
    let failure = |reason: String| EngineError::OutputWriteFailure {
        path: path.display().to_string(),
        reason,
    };

    let bytes = encode_png(pixmap).map_err(failure)?;
    std::fs::write(path, bytes).map_err(|e| failure(e.to_string()))
}

/// Encodes `pixmap` as an 8-bit RGBA PNG.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, String> {
    let img = RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap_to_rgba(pixmap))
        .ok_or_else(|| "RGBA buffer size mismatch".to_string())?;
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(bytes.into_inner())
}
