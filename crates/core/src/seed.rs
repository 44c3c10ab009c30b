//! Reproducible recipe for one generated image.
//!
//! A [`Seed`] captures everything needed to recreate an artwork: style
//! name, background, resolution, parameter overrides and PRNG seed.

use crate::color::{resolve_color, Srgb};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Default output resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Reproducible recipe for a generated image.
///
/// Two identical `Seed` values rendered by the same binary produce
/// bit-identical PNGs. The background serializes as `"#rrggbb"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub style: String,
    pub background: Srgb,
    pub dpi: u32,
    pub params: serde_json::Value,
    pub seed: u64,
}

impl Seed {
    /// Creates a recipe with a black background, default DPI and empty params.
    pub fn new(style: &str, seed: u64) -> Self {
        Self {
            style: style.to_string(),
            background: Srgb::BLACK,
            dpi: DEFAULT_DPI,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
        }
    }

    /// Resolves `token` with [`resolve_color`] and uses it as background.
    pub fn with_background(mut self, token: &str) -> Result<Self, EngineError> {
        self.background = resolve_color(token)?;
        Ok(self)
    }

    /// Sets the output resolution. Zero is rejected by [`Seed::validate`].
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets the generator parameter overrides, a JSON object.
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Validates that the recipe can produce an image: non-zero DPI.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.dpi == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        Ok(())
    }
}
