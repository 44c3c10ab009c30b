//! Immutable drawing primitives produced by generators.
//!
//! A [`Shape`] pairs a [`Geometry`] in data coordinates with its paint:
//! an optional fill, an optional [`Stroke`], and an opacity that applies to
//! both. Shapes are built once, handed to the rasterizer, and dropped.

use glam::{DMat2, DVec2};
use std::f64::consts::TAU;

use crate::color::Srgb;

/// Number of segments used when a circle must be expressed as vertices.
const CIRCLE_SEGMENTS: usize = 72;

/// Geometry of a shape, in data (canvas extent) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A polyline through `points`, optionally closed back to the first point.
    Path { points: Vec<DVec2>, closed: bool },
    /// A single straight line.
    Segment { from: DVec2, to: DVec2 },
    /// A rectangle anchored at `origin` (its unrotated lower-left corner)
    /// and rotated counter-clockwise by `angle` degrees about that corner.
    Rect {
        origin: DVec2,
        width: f64,
        height: f64,
        angle: f64,
    },
    /// A closed polygon with one vertex per entry in `radii`, at evenly
    /// spaced angles starting from `rotation` radians. Equal radii make a
    /// regular polygon.
    Radial {
        center: DVec2,
        radii: Vec<f64>,
        rotation: f64,
    },
    /// Circle of `radius` data units around `center`.
    Circle { center: DVec2, radius: f64 },
}

impl Geometry {
    /// A regular polygon with `sides` vertices on a circle of `radius`.
    pub fn regular_polygon(center: DVec2, sides: usize, radius: f64, rotation: f64) -> Self {
        Geometry::Radial {
            center,
            radii: vec![radius; sides],
            rotation,
        }
    }

    /// Vertex list of the geometry in drawing order.
    ///
    /// Circles are approximated with a fixed number of segments; the
    /// rasterizer draws them as true ovals.
    pub fn vertices(&self) -> Vec<DVec2> {
        match self {
            Geometry::Path { points, .. } => points.clone(),
            Geometry::Segment { from, to } => vec![*from, *to],
            Geometry::Rect {
                origin,
                width,
                height,
                angle,
            } => {
                let rot = DMat2::from_angle(angle.to_radians());
                [
                    DVec2::ZERO,
                    DVec2::new(*width, 0.0),
                    DVec2::new(*width, *height),
                    DVec2::new(0.0, *height),
                ]
                .into_iter()
                .map(|corner| *origin + rot * corner)
                .collect()
            }
            Geometry::Radial {
                center,
                radii,
                rotation,
            } => {
                let n = radii.len() as f64;
                let rot = DMat2::from_angle(*rotation);
                radii
                    .iter()
                    .enumerate()
                    .map(|(i, r)| *center + rot * (DVec2::from_angle(TAU * i as f64 / n) * *r))
                    .collect()
            }
            Geometry::Circle { center, radius } => (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    *center + DVec2::from_angle(TAU * i as f64 / CIRCLE_SEGMENTS as f64) * *radius
                })
                .collect(),
        }
    }

    /// Whether the outline returns to its first vertex.
    pub fn is_closed(&self) -> bool {
        match self {
            Geometry::Path { closed, .. } => *closed,
            Geometry::Segment { .. } => false,
            Geometry::Rect { .. } | Geometry::Radial { .. } | Geometry::Circle { .. } => true,
        }
    }
}

/// Outline paint. `width` is in typographic points (1/72 inch) so that line
/// weight stays constant across output resolutions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Srgb,
    pub width: f64,
}

/// A painted geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    geometry: Geometry,
    fill: Option<Srgb>,
    stroke: Option<Stroke>,
    opacity: f64,
}

impl Shape {
    /// A filled shape with no outline, fully opaque.
    pub fn filled(geometry: Geometry, color: Srgb) -> Self {
        Self {
            geometry,
            fill: Some(color),
            stroke: None,
            opacity: 1.0,
        }
    }

    /// An unfilled outline, fully opaque.
    pub fn stroked(geometry: Geometry, color: Srgb, width: f64) -> Self {
        Self {
            geometry,
            fill: None,
            stroke: Some(Stroke { color, width }),
            opacity: 1.0,
        }
    }

    /// Returns the shape with an outline added (or replaced).
    pub fn with_stroke(mut self, color: Srgb, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    /// Returns the shape with the given opacity, clamped to [0.0, 1.0].
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn fill(&self) -> Option<Srgb> {
        self.fill
    }

    pub fn stroke(&self) -> Option<Stroke> {
        self.stroke
    }

    /// Returns the opacity in [0.0, 1.0].
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}
