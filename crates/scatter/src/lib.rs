#![deny(unsafe_code)]
//! Scatter generators: `triangles` and `rectangles`.
//!
//! Both drop a fixed number of translucent filled shapes at uniformly random
//! positions. `triangles` stacks several layers, each with its own palette;
//! `rectangles` draws a single field from one palette.

use artgen_core::canvas::{Canvas, Frame};
use artgen_core::generator::Generator;
use artgen_core::palette::Palette;
use artgen_core::params::{param_bool, param_count, param_f64_range};
use artgen_core::prng::Xorshift64;
use artgen_core::shape::{Geometry, Shape};
use glam::{DMat2, DVec2};
use log::debug;
use serde_json::{json, Value};

/// Opacity range shared by both styles.
const MIN_OPACITY: f64 = 0.2;
const MAX_OPACITY: f64 = 0.7;

const TRIANGLE_EXTENT: f64 = 100.0;
const TRIANGLE_FIGURE_INCHES: f64 = 10.0;
const DEFAULT_LAYERS: usize = 5;
const DEFAULT_PER_LAYER: usize = 200;
const DEFAULT_TRIANGLE_MIN: f64 = 5.0;
const DEFAULT_TRIANGLE_MAX: f64 = 30.0;
const LAYER_LIMIT: usize = 100;
const PER_LAYER_LIMIT: usize = 20_000;

const RECT_EXTENT: f64 = 50.0;
const RECT_FIGURE_WIDTH: f64 = 8.0;
const RECT_FIGURE_HEIGHT: f64 = 10.0;
const DEFAULT_COUNT: usize = 100;
const DEFAULT_RECT_MIN: f64 = 5.0;
const DEFAULT_RECT_MAX: f64 = 20.0;
const COUNT_LIMIT: usize = 100_000;
/// Upper bound of the continuous rotation range, in degrees.
const MAX_RECT_ANGLE: f64 = 90.0;
/// Rotations available with `discrete_angles`, in degrees.
const DISCRETE_ANGLES: [f64; 5] = [0.0, 15.0, -15.0, 30.0, -30.0];

fn random_point(rng: &mut Xorshift64, extent: f64) -> DVec2 {
    DVec2::new(
        rng.next_range(-extent, extent),
        rng.next_range(-extent, extent),
    )
}

/// Configuration for [`Triangles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleParams {
    /// Number of stacked layers; each draws from its own palette.
    pub layers: usize,
    /// Triangles drawn in every layer.
    pub per_layer: usize,
    /// Shortest edge length.
    pub min_size: f64,
    /// Longest edge length.
    pub max_size: f64,
}

impl Default for TriangleParams {
    fn default() -> Self {
        Self {
            layers: DEFAULT_LAYERS,
            per_layer: DEFAULT_PER_LAYER,
            min_size: DEFAULT_TRIANGLE_MIN,
            max_size: DEFAULT_TRIANGLE_MAX,
        }
    }
}

impl TriangleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// `layers` and `per_layer` are capped at their schema maximum.
    pub fn from_json(params: &Value) -> Self {
        let (min_size, max_size) = param_f64_range(
            params,
            ("min_size", "max_size"),
            (DEFAULT_TRIANGLE_MIN, DEFAULT_TRIANGLE_MAX),
        );
        Self {
            layers: param_count(params, "layers", DEFAULT_LAYERS, LAYER_LIMIT),
            per_layer: param_count(params, "per_layer", DEFAULT_PER_LAYER, PER_LAYER_LIMIT),
            min_size: min_size.max(0.0),
            max_size: max_size.max(0.0),
        }
    }
}

/// Hands out layer palettes without replacement, reshuffling once every
/// palette has been used.
struct LayerPalettes {
    palettes: Vec<Palette>,
    order: Vec<usize>,
}

impl LayerPalettes {
    fn new() -> Self {
        Self {
            palettes: Palette::layer_set(),
            order: Vec::new(),
        }
    }

    fn next(&mut self, rng: &mut Xorshift64) -> &Palette {
        if self.order.is_empty() {
            self.order = (0..self.palettes.len()).collect();
            rng.shuffle(&mut self.order);
        }
        // order is refilled above and layer_set is never empty
        let idx = self.order.pop().unwrap_or(0);
        &self.palettes[idx]
    }
}

/// Equilateral triangle with edge `size`, centroid at `center`, rotated by
/// `angle` radians about the centroid.
pub fn equilateral(center: DVec2, size: f64, angle: f64) -> Vec<DVec2> {
    let height = size * 3.0_f64.sqrt() / 2.0;
    let centroid = DVec2::new(size / 2.0, height / 3.0);
    let rotation = DMat2::from_angle(angle);
    [DVec2::ZERO, DVec2::new(size, 0.0), DVec2::new(size / 2.0, height)]
        .into_iter()
        .map(|v| center + rotation * (v - centroid))
        .collect()
}

/// The "triangles" style.
#[derive(Debug, Clone, Default)]
pub struct Triangles {
    params: TriangleParams,
}

impl Triangles {
    pub fn new(params: TriangleParams) -> Self {
        Self { params }
    }

    /// Builds the generator from JSON overrides via [`TriangleParams::from_json`].
    pub fn from_json(params: &Value) -> Self {
        Self::new(TriangleParams::from_json(params))
    }
}

impl Generator for Triangles {
    fn frame(&self) -> Frame {
        Frame::square(
            -TRIANGLE_EXTENT,
            TRIANGLE_EXTENT,
            TRIANGLE_FIGURE_INCHES,
            TRIANGLE_FIGURE_INCHES,
        )
    }

    fn generate(&self, _canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape> {
        let p = &self.params;
        debug!("triangles: {} layers of {}", p.layers, p.per_layer);

        let mut palettes = LayerPalettes::new();
        let mut shapes = Vec::with_capacity(p.layers.saturating_mul(p.per_layer));
        for _ in 0..p.layers {
            let palette = palettes.next(rng).clone();
            for _ in 0..p.per_layer {
                let center = random_point(rng, TRIANGLE_EXTENT);
                let size = rng.next_range(p.min_size, p.max_size);
                let angle = rng.next_range(0.0, 360.0).to_radians();
                let color = palette.pick(rng);
                let opacity = rng.next_range(MIN_OPACITY, MAX_OPACITY);
                shapes.push(
                    Shape::filled(
                        Geometry::Path {
                            points: equilateral(center, size, angle),
                            closed: true,
                        },
                        color,
                    )
                    .with_opacity(opacity),
                );
            }
        }
        shapes
    }

    fn params(&self) -> Value {
        json!({
            "layers": self.params.layers,
            "per_layer": self.params.per_layer,
            "min_size": self.params.min_size,
            "max_size": self.params.max_size,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "layers": {
                "type": "integer",
                "default": DEFAULT_LAYERS,
                "min": 0,
                "max": LAYER_LIMIT,
                "description": "Stacked layers, each with its own palette"
            },
            "per_layer": {
                "type": "integer",
                "default": DEFAULT_PER_LAYER,
                "min": 0,
                "max": PER_LAYER_LIMIT,
                "description": "Triangles drawn in each layer"
            },
            "min_size": {
                "type": "number",
                "default": DEFAULT_TRIANGLE_MIN,
                "min": 0.0,
                "description": "Shortest triangle edge"
            },
            "max_size": {
                "type": "number",
                "default": DEFAULT_TRIANGLE_MAX,
                "min": 0.0,
                "description": "Longest triangle edge"
            }
        })
    }
}

/// Configuration for [`Rectangles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleParams {
    /// Number of rectangles.
    pub count: usize,
    /// Smallest width or height.
    pub min_size: f64,
    /// Largest width or height.
    pub max_size: f64,
    /// Rotate by one of a few fixed angles instead of a continuous one.
    pub discrete_angles: bool,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            min_size: DEFAULT_RECT_MIN,
            max_size: DEFAULT_RECT_MAX,
            discrete_angles: false,
        }
    }
}

impl RectangleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// `count` is capped at its schema maximum.
    pub fn from_json(params: &Value) -> Self {
        let (min_size, max_size) = param_f64_range(
            params,
            ("min_size", "max_size"),
            (DEFAULT_RECT_MIN, DEFAULT_RECT_MAX),
        );
        Self {
            count: param_count(params, "count", DEFAULT_COUNT, COUNT_LIMIT),
            min_size: min_size.max(0.0),
            max_size: max_size.max(0.0),
            discrete_angles: param_bool(params, "discrete_angles", false),
        }
    }
}

/// The "rectangles" style.
#[derive(Debug, Clone, Default)]
pub struct Rectangles {
    params: RectangleParams,
}

impl Rectangles {
    pub fn new(params: RectangleParams) -> Self {
        Self { params }
    }

    /// Builds the generator from JSON overrides via [`RectangleParams::from_json`].
    pub fn from_json(params: &Value) -> Self {
        Self::new(RectangleParams::from_json(params))
    }

    fn angle(&self, rng: &mut Xorshift64) -> f64 {
        if self.params.discrete_angles {
            DISCRETE_ANGLES[rng.next_usize(DISCRETE_ANGLES.len())]
        } else {
            rng.next_range(0.0, MAX_RECT_ANGLE)
        }
    }
}

impl Generator for Rectangles {
    fn frame(&self) -> Frame {
        Frame::square(
            -RECT_EXTENT,
            RECT_EXTENT,
            RECT_FIGURE_WIDTH,
            RECT_FIGURE_HEIGHT,
        )
        .with_equal_aspect()
    }

    fn generate(&self, _canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape> {
        let p = &self.params;
        let mut set = Palette::field_set();
        let palette = set.swap_remove(rng.next_usize(set.len()));
        debug!("rectangles: {} rectangles", p.count);

        (0..p.count)
            .map(|_| {
                let width = rng.next_range(p.min_size, p.max_size);
                let height = rng.next_range(p.min_size, p.max_size);
                let origin = random_point(rng, RECT_EXTENT);
                let angle = self.angle(rng);
                let color = palette.pick(rng);
                let opacity = rng.next_range(MIN_OPACITY, MAX_OPACITY);
                Shape::filled(
                    Geometry::Rect {
                        origin,
                        width,
                        height,
                        angle,
                    },
                    color,
                )
                .with_opacity(opacity)
            })
            .collect()
    }

    fn params(&self) -> Value {
        json!({
            "count": self.params.count,
            "min_size": self.params.min_size,
            "max_size": self.params.max_size,
            "discrete_angles": self.params.discrete_angles,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 0,
                "max": COUNT_LIMIT,
                "description": "Number of rectangles"
            },
            "min_size": {
                "type": "number",
                "default": DEFAULT_RECT_MIN,
                "min": 0.0,
                "description": "Smallest rectangle side"
            },
            "max_size": {
                "type": "number",
                "default": DEFAULT_RECT_MAX,
                "min": 0.0,
                "description": "Largest rectangle side"
            },
            "discrete_angles": {
                "type": "boolean",
                "default": false,
                "description": "Rotate by 0, ±15 or ±30 degrees only"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artgen_core::color::Srgb;

    fn run(generator: &dyn Generator, seed: u64) -> Vec<Shape> {
        let canvas = Canvas::new(generator.frame(), Srgb::BLACK, 10).unwrap();
        generator.generate(&canvas, &mut Xorshift64::new(seed))
    }

    /// Indices of the layer palettes that hold every fill in `shapes`.
    fn layer_palette(shapes: &[Shape]) -> Vec<usize> {
        Palette::layer_set()
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                shapes
                    .iter()
                    .all(|s| s.fill().is_some_and(|c| p.colors().contains(&c)))
            })
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn equilateral_has_equal_edges_around_centroid() {
        let center = DVec2::new(3.0, -4.0);
        let points = equilateral(center, 12.0, 1.1);
        assert_eq!(points.len(), 3);
        for i in 0..3 {
            let edge = points[i].distance(points[(i + 1) % 3]);
            assert!((edge - 12.0).abs() < 1e-9, "edge {edge}");
        }
        let centroid = (points[0] + points[1] + points[2]) / 3.0;
        assert!(centroid.distance(center) < 1e-9);
    }

    #[test]
    fn triangles_draw_layers_times_per_layer() {
        assert_eq!(run(&Triangles::default(), 1).len(), 1000);
        let generator = Triangles::from_json(&json!({"layers": 2, "per_layer": 7}));
        assert_eq!(run(&generator, 1).len(), 14);
    }

    #[test]
    fn triangle_layers_use_distinct_palettes() {
        let shapes = run(&Triangles::default(), 19);
        let mut seen = Vec::new();
        for layer in shapes.chunks(200) {
            let candidates = layer_palette(layer);
            // the layer palettes share no colors
            assert_eq!(candidates.len(), 1);
            seen.push(candidates[0]);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn extra_layers_reuse_palettes() {
        let generator = Triangles::from_json(&json!({"layers": 7, "per_layer": 20}));
        let shapes = run(&generator, 3);
        for layer in shapes.chunks(20) {
            assert_eq!(layer_palette(layer).len(), 1);
        }
    }

    #[test]
    fn triangle_opacity_and_size_ranges() {
        for shape in run(&Triangles::default(), 8) {
            assert!((0.2..0.7).contains(&shape.opacity()));
            let Geometry::Path { points, closed } = shape.geometry() else {
                panic!("expected a path");
            };
            assert!(closed);
            let edge = points[0].distance(points[1]);
            assert!((5.0 - 1e-9..30.0 + 1e-9).contains(&edge), "edge {edge}");
        }
    }

    #[test]
    fn rectangles_draw_count_from_one_palette() {
        let shapes = run(&Rectangles::default(), 12);
        assert_eq!(shapes.len(), 100);
        let holds_all = Palette::field_set().into_iter().any(|p| {
            shapes
                .iter()
                .all(|s| p.colors().contains(&s.fill().unwrap()))
        });
        assert!(holds_all);
    }

    #[test]
    fn rectangle_ranges() {
        for shape in run(&Rectangles::default(), 6) {
            assert!((0.2..0.7).contains(&shape.opacity()));
            assert!(shape.stroke().is_none());
            let Geometry::Rect {
                origin,
                width,
                height,
                angle,
            } = *shape.geometry()
            else {
                panic!("expected a rect");
            };
            assert!((5.0..20.0).contains(&width));
            assert!((5.0..20.0).contains(&height));
            assert!((0.0..90.0).contains(&angle));
            assert!(origin.x.abs() <= 50.0 && origin.y.abs() <= 50.0);
        }
    }

    #[test]
    fn discrete_angles_stay_in_set() {
        let generator = Rectangles::from_json(&json!({"discrete_angles": true}));
        for shape in run(&generator, 6) {
            let Geometry::Rect { angle, .. } = *shape.geometry() else {
                panic!("expected a rect");
            };
            assert!(DISCRETE_ANGLES.contains(&angle), "angle {angle}");
        }
    }

    #[test]
    fn rectangle_frame_is_tall_with_equal_aspect() {
        let frame = Rectangles::default().frame();
        assert!(frame.equal_aspect);
        assert_eq!((frame.width_in, frame.height_in), (8.0, 10.0));
        assert_eq!((frame.x_min, frame.x_max), (-50.0, 50.0));
    }

    #[test]
    fn params_echo_configuration() {
        let generator = Rectangles::from_json(&json!({"count": 3, "min_size": 9.0, "max_size": 2.0}));
        let params = generator.params();
        assert_eq!(params["count"], 3);
        assert_eq!(params["min_size"], 2.0);
        assert_eq!(params["max_size"], 9.0);
        assert!(Triangles::default().param_schema().get("per_layer").is_some());
    }

    #[test]
    fn extreme_counts_are_capped() {
        let triangles = Triangles::from_json(&json!({"layers": u64::MAX, "per_layer": 0}));
        assert_eq!(triangles.params()["layers"], LAYER_LIMIT);
        assert!(run(&triangles, 4).is_empty());
        let triangles = Triangles::from_json(&json!({"layers": 0, "per_layer": u64::MAX}));
        assert_eq!(triangles.params()["per_layer"], PER_LAYER_LIMIT);
        assert_eq!(
            triangles.param_schema()["per_layer"]["max"],
            PER_LAYER_LIMIT
        );

        let rectangles = Rectangles::from_json(&json!({"count": u64::MAX}));
        assert_eq!(rectangles.params()["count"], COUNT_LIMIT);
        assert_eq!(run(&rectangles, 4).len(), COUNT_LIMIT);
    }

    #[test]
    fn deterministic_per_seed() {
        assert_eq!(run(&Triangles::default(), 2), run(&Triangles::default(), 2));
        assert_eq!(run(&Rectangles::default(), 2), run(&Rectangles::default(), 2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn rectangle_count_and_opacity_hold(seed: u64, count in 0usize..200) {
                let generator = Rectangles::new(RectangleParams {
                    count,
                    ..RectangleParams::default()
                });
                let shapes = run(&generator, seed);
                prop_assert_eq!(shapes.len(), count);
                for shape in &shapes {
                    prop_assert!(shape.opacity() >= 0.2 && shape.opacity() < 0.7);
                }
            }
        }
    }
}
