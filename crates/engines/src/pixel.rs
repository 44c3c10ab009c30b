//! Pure-computation pixel buffer conversion from a rendered [`Pixmap`].
//!
//! This module is always available (no feature gate) so that callers can
//! get at the raw image without pulling in the PNG encoder.

use tiny_skia::Pixmap;

/// Converts tiny-skia's premultiplied pixels to a straight RGBA8 buffer.
///
/// The buffer length is `width * height * 4`, rows top to bottom.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}
