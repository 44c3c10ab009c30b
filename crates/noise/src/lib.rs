#![deny(unsafe_code)]
//! Noise generator: a field of rotated gray polygons over random texture lines.
//!
//! Each polygon is a ring of evenly spaced vertices, rotated as a whole by a
//! 2D rotation matrix and translated to a random center. Most rings are
//! drawn as a fan that starts and ends at the center; the rest as a bare
//! open ring. A fixed number of thin gray line segments is laid over the top.

use artgen_core::canvas::{Canvas, Frame};
use artgen_core::color::Srgb;
use artgen_core::generator::Generator;
use artgen_core::params::{param_count, param_probability, param_usize_range};
use artgen_core::prng::Xorshift64;
use artgen_core::shape::{Geometry, Shape};
use glam::{DMat2, DVec2};
use log::debug;
use serde_json::{json, Value};
use std::f64::consts::TAU;

/// Half-width of the square data extent.
const EXTENT: f64 = 100.0;
/// Figure edge length in inches.
const FIGURE_INCHES: f64 = 8.0;

const DEFAULT_MIN_SHAPES: usize = 150;
const DEFAULT_MAX_SHAPES: usize = 400;
const DEFAULT_TEXTURE_LINES: usize = 150;
const DEFAULT_FAN_PROBABILITY: f64 = 0.95;
/// Ceiling for `min_shapes`/`max_shapes`.
const SHAPE_LIMIT: usize = 20_000;
/// Ceiling for `texture_lines`.
const LINE_LIMIT: usize = 20_000;

const MIN_VERTICES: usize = 4;
const MAX_VERTICES: usize = 9;
const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 32.0;
/// Darkest gray a polygon may take; texture lines span the full range.
const MIN_POLYGON_GRAY: f64 = 0.4;

const FAN_WIDTH_PT: f64 = 1.2;
const RING_WIDTH_PT: f64 = 0.8;
const LINE_WIDTH_PT: f64 = 0.3;

/// Tunable counts and probabilities for the noise style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParams {
    /// Fewest polygons drawn (inclusive).
    pub min_shapes: usize,
    /// Most polygons drawn (inclusive).
    pub max_shapes: usize,
    /// Number of texture line segments drawn after the polygons.
    pub texture_lines: usize,
    /// Probability that a polygon is drawn as a fan through its center.
    pub fan_probability: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            min_shapes: DEFAULT_MIN_SHAPES,
            max_shapes: DEFAULT_MAX_SHAPES,
            texture_lines: DEFAULT_TEXTURE_LINES,
            fan_probability: DEFAULT_FAN_PROBABILITY,
        }
    }
}

impl NoiseParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// Counts are capped at their schema maximum.
    pub fn from_json(params: &Value) -> Self {
        let (min_shapes, max_shapes) = param_usize_range(
            params,
            ("min_shapes", "max_shapes"),
            (DEFAULT_MIN_SHAPES, DEFAULT_MAX_SHAPES),
            SHAPE_LIMIT,
        );
        Self {
            min_shapes,
            max_shapes,
            texture_lines: param_count(params, "texture_lines", DEFAULT_TEXTURE_LINES, LINE_LIMIT),
            fan_probability: param_probability(params, "fan_probability", DEFAULT_FAN_PROBABILITY),
        }
    }
}

/// The "noise" style.
#[derive(Debug, Clone, Default)]
pub struct Noise {
    params: NoiseParams,
}

impl Noise {
    pub fn new(params: NoiseParams) -> Self {
        Self { params }
    }

    /// Builds the generator from JSON overrides via [`NoiseParams::from_json`].
    pub fn from_json(params: &Value) -> Self {
        Self::new(NoiseParams::from_json(params))
    }

    /// One rotated polygon, drawn either as a center fan or as an open ring.
    fn polygon(&self, rng: &mut Xorshift64) -> Shape {
        let center = random_point(rng);
        let sides = rng.next_between(MIN_VERTICES, MAX_VERTICES);
        let radius = rng.next_range(MIN_RADIUS, MAX_RADIUS);
        let rotation = DMat2::from_angle(rng.next_range(0.0, TAU));
        let gray = Srgb::gray(rng.next_range(MIN_POLYGON_GRAY, 1.0));

        let ring = (0..sides).map(|i| {
            let unit = DVec2::from_angle(TAU * i as f64 / sides as f64);
            center + rotation * (unit * radius)
        });

        if rng.chance(self.params.fan_probability) {
            let points = std::iter::once(center)
                .chain(ring)
                .chain(std::iter::once(center))
                .collect();
            Shape::stroked(Geometry::Path { points, closed: false }, gray, FAN_WIDTH_PT)
        } else {
            let points = ring.collect();
            Shape::stroked(Geometry::Path { points, closed: false }, gray, RING_WIDTH_PT)
        }
    }

    fn texture_line(rng: &mut Xorshift64) -> Shape {
        let from = random_point(rng);
        let to = random_point(rng);
        let gray = Srgb::gray(rng.next_f64());
        Shape::stroked(Geometry::Segment { from, to }, gray, LINE_WIDTH_PT)
    }
}

fn random_point(rng: &mut Xorshift64) -> DVec2 {
    DVec2::new(rng.next_range(-EXTENT, EXTENT), rng.next_range(-EXTENT, EXTENT))
}

impl Generator for Noise {
    fn frame(&self) -> Frame {
        Frame::square(-EXTENT, EXTENT, FIGURE_INCHES, FIGURE_INCHES)
    }

    fn generate(&self, _canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape> {
        let polygons = rng.next_between(self.params.min_shapes, self.params.max_shapes);
        debug!(
            "noise: {polygons} polygons, {} texture lines",
            self.params.texture_lines
        );

        let mut shapes = Vec::with_capacity(polygons.saturating_add(self.params.texture_lines));
        shapes.extend((0..polygons).map(|_| self.polygon(rng)));
        shapes.extend((0..self.params.texture_lines).map(|_| Self::texture_line(rng)));
        shapes
    }

    fn params(&self) -> Value {
        json!({
            "min_shapes": self.params.min_shapes,
            "max_shapes": self.params.max_shapes,
            "texture_lines": self.params.texture_lines,
            "fan_probability": self.params.fan_probability,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "min_shapes": {
                "type": "integer",
                "default": DEFAULT_MIN_SHAPES,
                "min": 0,
                "max": SHAPE_LIMIT,
                "description": "Fewest polygons drawn (inclusive)"
            },
            "max_shapes": {
                "type": "integer",
                "default": DEFAULT_MAX_SHAPES,
                "min": 0,
                "max": SHAPE_LIMIT,
                "description": "Most polygons drawn (inclusive)"
            },
            "texture_lines": {
                "type": "integer",
                "default": DEFAULT_TEXTURE_LINES,
                "min": 0,
                "max": LINE_LIMIT,
                "description": "Thin gray line segments drawn over the polygons"
            },
            "fan_probability": {
                "type": "number",
                "default": DEFAULT_FAN_PROBABILITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Chance that a polygon is drawn as a fan through its center"
            }
        })
    }
}
