#![deny(unsafe_code)]
//! Radial generator: a starburst of randomly colored lines from the origin.
//!
//! Lines are evenly spaced around the full circle by default, which gives a
//! uniform burst; with `random_angles` each line takes an independent
//! uniform angle instead, giving a denser, irregular one. Lengths are random
//! fractions of the unit radial scale.

use artgen_core::canvas::{Canvas, Frame};
use artgen_core::color::Srgb;
use artgen_core::generator::Generator;
use artgen_core::params::{param_bool, param_count, param_f64_range};
use artgen_core::prng::Xorshift64;
use artgen_core::shape::{Geometry, Shape};
use glam::DVec2;
use log::debug;
use serde_json::{json, Value};
use std::f64::consts::TAU;

/// Radius that a length fraction of 1.0 reaches.
pub const RADIAL_SCALE: f64 = 1.0;
const FIGURE_INCHES: f64 = 8.0;
const LINE_WIDTH_PT: f64 = 1.0;

const DEFAULT_LINES: usize = 500;
const DEFAULT_MIN_LENGTH: f64 = 0.4;
const DEFAULT_MAX_LENGTH: f64 = 1.0;
/// Ceiling for `lines`.
const LINE_LIMIT: usize = 100_000;

/// Tunable line count, lengths and angle policy for the radial style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialParams {
    /// Number of lines drawn from the origin.
    pub lines: usize,
    /// Shortest line, as a fraction of [`RADIAL_SCALE`].
    pub min_length: f64,
    /// Longest line, as a fraction of [`RADIAL_SCALE`].
    pub max_length: f64,
    /// Draw each line at an independent uniform angle instead of evenly
    /// dividing the circle.
    pub random_angles: bool,
}

impl Default for RadialParams {
    fn default() -> Self {
        Self {
            lines: DEFAULT_LINES,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            random_angles: false,
        }
    }
}

impl RadialParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// Lengths are clamped to [0, 1] and `lines` to its schema maximum.
    pub fn from_json(params: &Value) -> Self {
        let (min_length, max_length) = param_f64_range(
            params,
            ("min_length", "max_length"),
            (DEFAULT_MIN_LENGTH, DEFAULT_MAX_LENGTH),
        );
        Self {
            lines: param_count(params, "lines", DEFAULT_LINES, LINE_LIMIT),
            min_length: min_length.clamp(0.0, 1.0),
            max_length: max_length.clamp(0.0, 1.0),
            random_angles: param_bool(params, "random_angles", false),
        }
    }
}

/// The "radial" style.
#[derive(Debug, Clone, Default)]
pub struct Radial {
    params: RadialParams,
}

impl Radial {
    pub fn new(params: RadialParams) -> Self {
        Self { params }
    }

    /// Builds the generator from JSON overrides via [`RadialParams::from_json`].
    pub fn from_json(params: &Value) -> Self {
        Self::new(RadialParams::from_json(params))
    }
}

impl Generator for Radial {
    fn frame(&self) -> Frame {
        Frame::square(-RADIAL_SCALE, RADIAL_SCALE, FIGURE_INCHES, FIGURE_INCHES).with_equal_aspect()
    }

    fn generate(&self, _canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape> {
        let p = &self.params;
        debug!(
            "radial: {} lines, {} angles",
            p.lines,
            if p.random_angles { "random" } else { "even" }
        );

        (0..p.lines)
            .map(|i| {
                let angle = if p.random_angles {
                    rng.next_range(0.0, TAU)
                } else {
                    TAU * i as f64 / p.lines as f64
                };
                let length = rng.next_range(p.min_length, p.max_length) * RADIAL_SCALE;
                let color = Srgb::new(rng.next_f64(), rng.next_f64(), rng.next_f64());
                let to = DVec2::from_angle(angle) * length;
                Shape::stroked(
                    Geometry::Segment {
                        from: DVec2::ZERO,
                        to,
                    },
                    color,
                    LINE_WIDTH_PT,
                )
            })
            .collect()
    }

    fn params(&self) -> Value {
        json!({
            "lines": self.params.lines,
            "min_length": self.params.min_length,
            "max_length": self.params.max_length,
            "random_angles": self.params.random_angles,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "lines": {
                "type": "integer",
                "default": DEFAULT_LINES,
                "min": 0,
                "max": LINE_LIMIT,
                "description": "Number of lines radiating from the origin"
            },
            "min_length": {
                "type": "number",
                "default": DEFAULT_MIN_LENGTH,
                "min": 0.0,
                "max": 1.0,
                "description": "Shortest line as a fraction of the radial scale"
            },
            "max_length": {
                "type": "number",
                "default": DEFAULT_MAX_LENGTH,
                "min": 0.0,
                "max": 1.0,
                "description": "Longest line as a fraction of the radial scale"
            },
            "random_angles": {
                "type": "boolean",
                "default": false,
                "description": "Random angle per line instead of even spacing"
            }
        })
    }
}
