//! Canvas configuration: what region of data space is drawn, onto how
//! many pixels, over which background.
//!
//! Each generator owns a [`Frame`] (its data extents and figure size).
//! A [`Canvas`] combines the frame with the run's background and resolution
//! and fixes the data-to-pixel mapping for the whole render.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::EngineError;

/// Fraction of the figure width taken by the plot area.
const PLOT_WIDTH_FRACTION: f64 = 0.775;
/// Fraction of the figure height taken by the plot area.
const PLOT_HEIGHT_FRACTION: f64 = 0.77;
/// Background margin kept around the plot area after cropping, in inches.
const PAD_INCHES: f64 = 0.1;
/// Typographic points per inch.
const POINTS_PER_INCH: f64 = 72.0;
/// Largest image a canvas may describe, in pixels.
pub const MAX_PIXELS: u64 = 100_000_000;

/// Data extents and physical figure size a generator draws into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Figure width in inches.
    pub width_in: f64,
    /// Figure height in inches.
    pub height_in: f64,
    /// Keep one data unit the same length on both axes by shrinking the
    /// plot area along the longer side.
    pub equal_aspect: bool,
}

impl Frame {
    /// A frame spanning `[min, max]` on both axes.
    pub fn square(min: f64, max: f64, width_in: f64, height_in: f64) -> Self {
        Self {
            x_min: min,
            x_max: max,
            y_min: min,
            y_max: max,
            width_in,
            height_in,
            equal_aspect: false,
        }
    }

    /// Marks the frame as equal-aspect.
    pub fn with_equal_aspect(mut self) -> Self {
        self.equal_aspect = true;
        self
    }

    /// Lower-left corner in data space.
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x_min, self.y_min)
    }

    /// Upper-right corner in data space.
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x_max, self.y_max)
    }

    fn is_valid(&self) -> bool {
        let finite = [
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
            self.width_in,
            self.height_in,
        ]
        .iter()
        .all(|v| v.is_finite());
        finite
            && self.x_max > self.x_min
            && self.y_max > self.y_min
            && self.width_in > 0.0
            && self.height_in > 0.0
    }
}

/// An immutable render target description: frame, background and DPI,
/// plus the derived pixel geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    frame: Frame,
    background: Srgb,
    dpi: u32,
    width_px: u32,
    height_px: u32,
    pad_px: f64,
    scale: DVec2,
}

impl Canvas {
    /// Creates a canvas and computes its pixel geometry.
    ///
    /// The plot area is the figure size times the default plot fractions,
    /// shrunk to the data aspect ratio for equal-aspect frames, and
    /// surrounded by a fixed background pad.
    ///
    /// Returns `EngineError::InvalidDimensions` for degenerate extents, a
    /// non-positive figure size, zero DPI, or an image larger than
    /// [`MAX_PIXELS`].
    pub fn new(frame: Frame, background: Srgb, dpi: u32) -> Result<Self, EngineError> {
        if dpi == 0 || !frame.is_valid() {
            return Err(EngineError::InvalidDimensions);
        }
        let dpi_f = dpi as f64;
        let span = frame.max() - frame.min();

        let mut plot_w = frame.width_in * PLOT_WIDTH_FRACTION;
        let mut plot_h = frame.height_in * PLOT_HEIGHT_FRACTION;
        if frame.equal_aspect {
            let data_aspect = span.x / span.y;
            if plot_w / plot_h > data_aspect {
                plot_w = plot_h * data_aspect;
            } else {
                plot_h = plot_w / data_aspect;
            }
        }

        let plot_w_px = (plot_w * dpi_f).round();
        let plot_h_px = (plot_h * dpi_f).round();
        let pad_px = (PAD_INCHES * dpi_f).round();
        let width_px = to_pixels(plot_w_px + 2.0 * pad_px)?;
        let height_px = to_pixels(plot_h_px + 2.0 * pad_px)?;
        if plot_w_px < 1.0 || plot_h_px < 1.0 {
            return Err(EngineError::InvalidDimensions);
        }
        if u64::from(width_px) * u64::from(height_px) > MAX_PIXELS {
            return Err(EngineError::InvalidDimensions);
        }

        Ok(Self {
            frame,
            background: background.clamped(),
            dpi,
            width_px,
            height_px,
            pad_px,
            scale: DVec2::new(plot_w_px / span.x, plot_h_px / span.y),
        })
    }

    /// The frame this canvas was built from.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Background color, clamped to the unit range.
    pub fn background(&self) -> Srgb {
        self.background
    }

    /// Output resolution in dots per inch.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Output image width in pixels.
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Output image height in pixels.
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Maps a data-space point to pixel space (origin top-left, y down).
    pub fn to_pixel(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            self.pad_px + (p.x - self.frame.x_min) * self.scale.x,
            self.pad_px + (self.frame.y_max - p.y) * self.scale.y,
        )
    }

    /// Converts a length in data units along x to pixels.
    pub fn x_length_px(&self, length: f64) -> f64 {
        length * self.scale.x
    }

    /// Converts a length in data units along y to pixels.
    pub fn y_length_px(&self, length: f64) -> f64 {
        length * self.scale.y
    }

    /// Converts a line width in points to pixels at this canvas's DPI.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }
}

fn to_pixels(v: f64) -> Result<u32, EngineError> {
    if v >= 1.0 && v <= u32::MAX as f64 {
        Ok(v as u32)
    } else {
        Err(EngineError::InvalidDimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn noise_frame() -> Frame {
        Frame::square(-100.0, 100.0, 8.0, 8.0)
    }

    #[test]
    fn pixel_size_follows_figure_fraction_and_pad() {
        let canvas = Canvas::new(noise_frame(), Srgb::BLACK, 100).unwrap();
        // 8in * 0.775 * 100 = 620, 8in * 0.77 * 100 = 616, pad 10 each side
        assert_eq!(canvas.width_px(), 640);
        assert_eq!(canvas.height_px(), 636);
    }

    #[test]
    fn equal_aspect_shrinks_longer_side() {
        let frame = Frame::square(-50.0, 50.0, 8.0, 10.0).with_equal_aspect();
        let canvas = Canvas::new(frame, Srgb::BLACK, 100).unwrap();
        // plot 6.2in x 7.7in shrinks to 6.2in x 6.2in
        assert_eq!(canvas.width_px(), 640);
        assert_eq!(canvas.height_px(), 640);
    }

    #[test]
    fn to_pixel_maps_corners_and_flips_y() {
        let canvas = Canvas::new(noise_frame(), Srgb::BLACK, 100).unwrap();
        let top_left = canvas.to_pixel(DVec2::new(-100.0, 100.0));
        assert!((top_left.x - 10.0).abs() < EPSILON);
        assert!((top_left.y - 10.0).abs() < EPSILON);
        let bottom_right = canvas.to_pixel(DVec2::new(100.0, -100.0));
        assert!((bottom_right.x - 630.0).abs() < EPSILON);
        assert!((bottom_right.y - 626.0).abs() < EPSILON);
    }

    #[test]
    fn center_maps_to_middle_of_plot() {
        let frame = Frame::square(-1.0, 1.0, 8.0, 8.0).with_equal_aspect();
        let canvas = Canvas::new(frame, Srgb::BLACK, 50).unwrap();
        let c = canvas.to_pixel(DVec2::ZERO);
        assert!((c.x - canvas.width_px() as f64 / 2.0).abs() < 1.0);
        assert!((c.y - canvas.height_px() as f64 / 2.0).abs() < 1.0);
    }

    #[test]
    fn points_to_px_scales_with_dpi() {
        let canvas = Canvas::new(noise_frame(), Srgb::BLACK, 144).unwrap();
        assert!((canvas.points_to_px(1.0) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn lengths_scale_per_axis() {
        let canvas = Canvas::new(noise_frame(), Srgb::BLACK, 100).unwrap();
        assert!((canvas.x_length_px(200.0) - 620.0).abs() < EPSILON);
        assert!((canvas.y_length_px(200.0) - 616.0).abs() < EPSILON);
    }

    #[test]
    fn background_is_clamped() {
        let canvas = Canvas::new(noise_frame(), Srgb::new(2.0, -1.0, 0.5), 10).unwrap();
        assert_eq!(canvas.background(), Srgb::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn zero_dpi_is_rejected() {
        assert!(matches!(
            Canvas::new(noise_frame(), Srgb::BLACK, 0),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn degenerate_extents_are_rejected() {
        let frame = Frame::square(5.0, 5.0, 8.0, 8.0);
        assert!(Canvas::new(frame, Srgb::BLACK, 100).is_err());
        let inverted = Frame::square(5.0, -5.0, 8.0, 8.0);
        assert!(Canvas::new(inverted, Srgb::BLACK, 100).is_err());
    }

    #[test]
    fn non_finite_figure_is_rejected() {
        let frame = Frame::square(0.0, 1.0, f64::NAN, 8.0);
        assert!(Canvas::new(frame, Srgb::BLACK, 100).is_err());
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let frame = Frame::square(0.0, 1.0, 1e9, 1e9);
        assert!(Canvas::new(frame, Srgb::BLACK, u32::MAX).is_err());
    }

    #[test]
    fn pixel_budget_is_enforced() {
        // 8in at 100_000 dpi is roughly 6.4e5 px per side
        assert!(matches!(
            Canvas::new(noise_frame(), Srgb::BLACK, 100_000),
            Err(EngineError::InvalidDimensions)
        ));
        let canvas = Canvas::new(noise_frame(), Srgb::BLACK, 1_000).unwrap();
        assert!(u64::from(canvas.width_px()) * u64::from(canvas.height_px()) <= MAX_PIXELS);
    }

    #[test]
    fn frame_serde_round_trip() {
        let frame = Frame::square(-1.0, 11.0, 10.0, 10.0);
        let json = serde_json::to_string(&frame).unwrap();
        let restored: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, restored);
    }
}
