//! Color type and color-token resolution.
//!
//! Every color in artgen is an [`Srgb`] triple with components in [0, 1].
//! User-supplied tokens (`"blue"`, `"lemon-yellow"`, `"255,128,0"`,
//! `"#1f618d"`) all go through [`resolve_color`], which either returns that
//! canonical triple or fails; nothing downstream re-normalizes.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Colors that extend the standard named-color table.
///
/// Keys are stored without separators; lookups strip `-`, `_` and spaces.
const CUSTOM_COLORS: &[(&str, [u8; 3])] = &[
    ("lemonyellow", [255, 250, 205]),
    ("grassgreen", [124, 252, 0]),
    ("skyblue", [135, 206, 235]),
    ("coralred", [255, 127, 80]),
    ("rebeccapurple", [102, 51, 153]),
];

impl Srgb {
    /// Opaque black.
    pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

    /// Creates a color from components in [0, 1]. Components are stored as
    /// given; use [`Srgb::clamped`] before handing them to a rasterizer.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// A neutral gray with all three channels equal to `level`.
    pub fn gray(level: f64) -> Self {
        Self::new(level, level, level)
    }

    /// Returns the color with every channel clamped to [0, 1].
    /// NaN channels become 0.
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::new(c(self.r), c(self.g), c(self.b))
    }

    /// Quantizes to 8-bit channels with rounding, after clamping.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `EngineError::InvalidColorFormat` if the input is not a valid
    /// 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidColorFormat(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| EngineError::InvalidColorFormat(hex.to_string()))
        };
        Ok(Srgb::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit (0-255) with rounding.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        resolve_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Resolves a color token to a canonical [`Srgb`].
///
/// Accepted forms:
/// - `r,g,b` with three integers in 0..=255 (whitespace around each
///   component is ignored)
/// - `#rrggbb`
/// - a CSS/SVG color name, case insensitive
/// - a custom name (`lemonyellow`, `grassgreen`, `skyblue`, `coralred`,
///   `rebeccapurple`), ignoring case, `-`, `_` and spaces
///
/// Malformed explicit colors fail with `InvalidColorFormat`; names found in
/// neither table fail with `UnknownColorName`.
pub fn resolve_color(token: &str) -> Result<Srgb, EngineError> {
    if token.contains(',') {
        return parse_rgb_triple(token);
    }
    if token.starts_with('#') {
        return Srgb::from_hex(token);
    }

    let lowered = token.trim().to_ascii_lowercase();
    if let Some(named) = ::palette::named::from_str(&lowered) {
        return Ok(Srgb::from_rgb8(named.red, named.green, named.blue));
    }

    let key: String = lowered
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect();
    let (_, [r, g, b]) = CUSTOM_COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .ok_or_else(|| EngineError::UnknownColorName(token.to_string()))?;
    log::debug!("color '{token}' resolved from the custom table");
    Ok(Srgb::from_rgb8(*r, *g, *b))
}

fn parse_rgb_triple(token: &str) -> Result<Srgb, EngineError> {
    let invalid = || EngineError::InvalidColorFormat(token.to_string());
    let channels = token
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<Vec<u8>, EngineError>>()?;
    match channels.as_slice() {
        [r, g, b] => Ok(Srgb::from_rgb8(*r, *g, *b)),
        _ => Err(invalid()),
    }
}
