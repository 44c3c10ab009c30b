//! The `Generator` trait every art style implements.
//!
//! The trait is object-safe so styles can be selected at runtime as
//! `dyn Generator`.

use serde_json::Value;

use crate::canvas::{Canvas, Frame};
use crate::prng::Xorshift64;
use crate::shape::Shape;

/// A procedural art style.
///
/// A generator is configured once (from JSON params) and then asked for
/// shapes. Generation is pure apart from the RNG it is handed: the same
/// canvas and the same RNG state always yield the same shapes.
pub trait Generator {
    /// Data extents and figure size this style draws into.
    fn frame(&self) -> Frame;

    /// Produces the shapes for one image, in painting order (first drawn
    /// first). Consumes randomness only from `rng`.
    fn generate(&self, canvas: &Canvas, rng: &mut Xorshift64) -> Vec<Shape>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
