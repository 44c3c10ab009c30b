#![deny(unsafe_code)]
//! Grid mosaic generators: `squares` and `polygons`.
//!
//! Both walk a rows × cols grid in row-major order, randomly leave cells
//! empty, and size each remaining cell's shape by two out-of-phase waves:
//! `0.5 + 0.5·sin(row/3)·cos(col/3)`. One palette is chosen for the whole
//! image. `squares` places a rotated square, diamond or circle per cell;
//! `polygons` places an irregular polygon with a white outline.

use artgen_core::canvas::{Canvas, Frame};
use artgen_core::color::Srgb;
use artgen_core::generator::Generator;
use artgen_core::palette::Palette;
use artgen_core::params::{param_count, param_f64, param_probability};
use artgen_core::prng::Xorshift64;
use artgen_core::shape::{Geometry, Shape};
use glam::DVec2;
use log::debug;
use serde_json::{json, Value};
use std::f64::consts::{FRAC_PI_2, SQRT_2};

/// Data-space width covered by cell centers.
const GRID_SPAN: f64 = 10.0;
/// Margin of data space around the grid on every side.
const GRID_MARGIN: f64 = 1.0;
const FIGURE_INCHES: f64 = 10.0;
/// Maximum center displacement on each axis.
const POSITION_JITTER: f64 = 0.5;
/// Maximum rotation displacement in degrees.
const ANGLE_JITTER: f64 = 10.0;

const DEFAULT_ROWS: usize = 15;
const DEFAULT_COLS: usize = 15;
const DEFAULT_SKIP_PROBABILITY: f64 = 0.3;
const DEFAULT_BASE_SIZE: f64 = 0.8;
const DEFAULT_OPACITY: f64 = 0.7;
/// Ceiling for `rows` and `cols`.
const GRID_LIMIT: usize = 500;

const MIN_POLYGON_VERTICES: usize = 3;
const MAX_POLYGON_VERTICES: usize = 8;
/// Mean vertex radius of an irregular polygon, as a fraction of cell size.
const POLYGON_RADIUS: f64 = 0.7;
/// Maximum per-vertex radius perturbation, as a fraction of cell size.
const POLYGON_RADIUS_NOISE: f64 = 0.3;
const OUTLINE_WIDTH_PT: f64 = 1.0;

/// Grid layout shared by both mosaic styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub rows: usize,
    pub cols: usize,
    /// Chance that a cell is left empty.
    pub skip_probability: f64,
    /// Shape size at a size factor of 1.0.
    pub base_size: f64,
    pub opacity: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            skip_probability: DEFAULT_SKIP_PROBABILITY,
            base_size: DEFAULT_BASE_SIZE,
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl GridParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// `rows` and `cols` are capped at their schema maximum.
    pub fn from_json(params: &Value) -> Self {
        Self {
            rows: param_count(params, "rows", DEFAULT_ROWS, GRID_LIMIT),
            cols: param_count(params, "cols", DEFAULT_COLS, GRID_LIMIT),
            skip_probability: param_probability(
                params,
                "skip_probability",
                DEFAULT_SKIP_PROBABILITY,
            ),
            base_size: param_f64(params, "base_size", DEFAULT_BASE_SIZE).max(0.0),
            opacity: param_probability(params, "opacity", DEFAULT_OPACITY),
        }
    }

    /// Number of grid cells, saturating on overflow.
    pub fn cells(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    fn to_json(self) -> Value {
        json!({
            "rows": self.rows,
            "cols": self.cols,
            "skip_probability": self.skip_probability,
            "base_size": self.base_size,
            "opacity": self.opacity,
        })
    }

    fn schema() -> Value {
        json!({
            "rows": {
                "type": "integer",
                "default": DEFAULT_ROWS,
                "min": 0,
                "max": GRID_LIMIT,
                "description": "Grid rows"
            },
            "cols": {
                "type": "integer",
                "default": DEFAULT_COLS,
                "min": 0,
                "max": GRID_LIMIT,
                "description": "Grid columns"
            },
            "skip_probability": {
                "type": "number",
                "default": DEFAULT_SKIP_PROBABILITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Chance that a cell is left empty"
            },
            "base_size": {
                "type": "number",
                "default": DEFAULT_BASE_SIZE,
                "min": 0.0,
                "description": "Shape size at the wave maximum"
            },
            "opacity": {
                "type": "number",
                "default": DEFAULT_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Fill opacity of every shape"
            }
        })
    }

    fn frame() -> Frame {
        Frame::square(
            -GRID_MARGIN,
            GRID_SPAN + GRID_MARGIN,
            FIGURE_INCHES,
            FIGURE_INCHES,
        )
    }
}

/// A retained grid cell, after skip and jitter.
#[derive(Debug, Clone, Copy)]
struct Cell {
    row: usize,
    col: usize,
    /// `base_size` scaled by the wave factor.
    size: f64,
    center: DVec2,
}

/// Size multiplier in [0, 1] from two out-of-phase waves.
pub fn size_factor(row: usize, col: usize) -> f64 {
    0.5 + 0.5 * (row as f64 / 3.0).sin() * (col as f64 / 3.0).cos()
}

/// Visits the grid row-major, skipping cells with the configured
/// probability, and builds one shape per retained cell with `place`.
fn fill_grid(
    grid: &GridParams,
    rng: &mut Xorshift64,
    mut place: impl FnMut(Cell, &mut Xorshift64) -> Shape,
) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(grid.cells());
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            if rng.chance(grid.skip_probability) {
                continue;
            }
            let size = grid.base_size * size_factor(row, col);
            let center = DVec2::new(
                row as f64 * (GRID_SPAN / grid.rows as f64)
                    + rng.next_range(-POSITION_JITTER, POSITION_JITTER),
                col as f64 * (GRID_SPAN / grid.cols as f64)
                    + rng.next_range(-POSITION_JITTER, POSITION_JITTER),
            );
            shapes.push(place(
                Cell {
                    row,
                    col,
                    size,
                    center,
                },
                rng,
            ));
        }
    }
    shapes
}

/// Picks the single palette used for a whole mosaic image.
fn image_palette(rng: &mut Xorshift64) -> Palette {
    let mut set = Palette::mosaic_set();
    let idx = rng.next_usize(set.len());
    set.swap_remove(idx)
}

/// Kinds of shape the `squares` style places in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShape {
    Square,
    Diamond,
    Circle,
}

const CELL_SHAPES: [CellShape; 3] = [CellShape::Square, CellShape::Diamond, CellShape::Circle];

/// The "squares" style: rotated squares, diamonds and circles on a grid.
#[derive(Debug, Clone, Default)]
pub struct Squares {
    grid: GridParams,
}

impl Squares {
    pub fn new(grid: GridParams) -> Self {
        Self { grid }
    }

    /// Builds the generator from JSON overrides via [`GridParams::from_json`].
    pub fn from_json(params: &Value) -> Self {
        Self::new(GridParams::from_json(params))
    }
}

impl Generator for Squares {
    fn frame(&self) -> Frame {
        GridParams::frame()
    }

    fn generate(&self, _canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape> {
        let palette = image_palette(rng);
        let opacity = self.grid.opacity;
        let shapes = fill_grid(&self.grid, rng, |cell, rng| {
            let angle =
                ((cell.row * cell.col) % 90) as f64 + rng.next_range(-ANGLE_JITTER, ANGLE_JITTER);
            let kind = CELL_SHAPES[rng.next_usize(CELL_SHAPES.len())];
            let color = palette.pick(rng);
            let geometry = match kind {
                CellShape::Square => Geometry::Rect {
                    origin: cell.center - DVec2::splat(cell.size / 2.0),
                    width: cell.size,
                    height: cell.size,
                    angle,
                },
                // first vertex points up before rotation
                CellShape::Diamond => Geometry::regular_polygon(
                    cell.center,
                    4,
                    cell.size / SQRT_2,
                    angle.to_radians() + FRAC_PI_2,
                ),
                CellShape::Circle => Geometry::Circle {
                    center: cell.center,
                    radius: cell.size / 2.0,
                },
            };
            Shape::filled(geometry, color).with_opacity(opacity)
        });
        debug!(
            "squares: {} of {} cells filled",
            shapes.len(),
            self.grid.cells()
        );
        shapes
    }

    fn params(&self) -> Value {
        self.grid.to_json()
    }

    fn param_schema(&self) -> Value {
        GridParams::schema()
    }
}

/// The "polygons" style: irregular outlined polygons on a grid.
#[derive(Debug, Clone, Default)]
pub struct Polygons {
    grid: GridParams,
}

impl Polygons {
    pub fn new(grid: GridParams) -> Self {
        Self { grid }
    }

    /// Builds the generator from JSON overrides via [`GridParams::from_json`].
    pub fn from_json(params: &Value) -> Self {
        Self::new(GridParams::from_json(params))
    }
}

impl Generator for Polygons {
    fn frame(&self) -> Frame {
        GridParams::frame()
    }

    fn generate(&self, _canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape> {
        let palette = image_palette(rng);
        let opacity = self.grid.opacity;
        let shapes = fill_grid(&self.grid, rng, |cell, rng| {
            let sides = rng.next_between(MIN_POLYGON_VERTICES, MAX_POLYGON_VERTICES);
            let radii = (0..sides)
                .map(|_| {
                    cell.size
                        * (POLYGON_RADIUS
                            + rng.next_range(-POLYGON_RADIUS_NOISE, POLYGON_RADIUS_NOISE))
                })
                .collect();
            let color = palette.pick(rng);
            Shape::filled(
                Geometry::Radial {
                    center: cell.center,
                    radii,
                    rotation: 0.0,
                },
                color,
            )
            .with_stroke(Srgb::WHITE, OUTLINE_WIDTH_PT)
            .with_opacity(opacity)
        });
        debug!(
            "polygons: {} of {} cells filled",
            shapes.len(),
            self.grid.cells()
        );
        shapes
    }

    fn params(&self) -> Value {
        self.grid.to_json()
    }

    fn param_schema(&self) -> Value {
        GridParams::schema()
    }
}
