#![deny(unsafe_code)]
//! Core types and traits for the artgen procedural art generator.
//!
//! Provides the `Generator` trait, the immutable `Shape`/`Geometry` model,
//! `Canvas`/`Frame` pixel geometry, the `Srgb` color type with the
//! color-token resolver, fixed `Palette`s, the `Xorshift64` PRNG, the
//! reproducible `Seed` recipe, and parameter helpers.

pub mod canvas;
pub mod color;
pub mod error;
pub mod generator;
pub mod palette;
pub mod params;
pub mod prng;
pub mod seed;
pub mod shape;

pub use canvas::{Canvas, Frame};
pub use color::{resolve_color, Srgb};
pub use error::EngineError;
pub use generator::Generator;
pub use palette::Palette;
pub use prng::{clock_seed, Xorshift64};
pub use seed::Seed;
pub use shape::{Geometry, Shape, Stroke};
