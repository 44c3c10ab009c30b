//! Fixed color palettes picked uniformly by index.
//!
//! A generator chooses one [`Palette`] per image (or per layer) and then
//! draws each shape's fill from it. There is no interpolation between
//! stops: every drawn color is exactly one of the palette's entries.

use crate::color::Srgb;
use crate::error::EngineError;
use crate::prng::Xorshift64;

/// A non-empty, ordered set of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

/// High-contrast palettes shared by the grid mosaic styles.
const MOSAIC: &[&[&str]] = &[
    &["#FF5733", "#33FF57", "#3357FF", "#FFC300", "#900C3F"],
    &["#FFD700", "#0057E7", "#FF4F81", "#00C49F", "#7B2CBF"],
    &["#2E86C1", "#EC7063", "#F4D03F", "#58D68D", "#AF7AC5"],
    &["#1F618D", "#F1C40F", "#E74C3C", "#239B56", "#884EA0"],
    &["#DFFF00", "#FF1493", "#40E0D0", "#800080", "#FFD700"],
    &["#8E44AD", "#3498DB", "#F39C12", "#2ECC71", "#E74C3C"],
];

/// Hue-grouped palettes for stacked triangle layers.
const LAYERS: &[&[&str]] = &[
    // warm
    &["#FF5733", "#FF8D1A", "#FFC300", "#C70039", "#900C3F"],
    // cool
    &["#33A1FF", "#1A8DFF", "#4DC3FF", "#00539C", "#003F5C"],
    // green
    &["#00FFAB", "#00FFC6", "#00FFD8", "#00E6B8", "#00BFA5"],
    // pink
    &["#FFC0CB", "#FF69B4", "#FF1493", "#FF7F50", "#FFDAB9"],
    // bright warm
    &["#FFD700", "#FFA500", "#FF8C00", "#FF6347", "#FF4500"],
];

/// Harmonious palettes for the rectangle field.
const FIELD: &[&[&str]] = &[
    &["#FF5733", "#FF8D1A", "#FFC300", "#FF5733", "#DAF7A6"],
    &["#00BFFF", "#1E90FF", "#4682B4", "#5F9EA0", "#6495ED"],
    &["#98FB98", "#00FA9A", "#2E8B57", "#66CDAA", "#3CB371"],
    &["#FFD700", "#FFA500", "#FF6347", "#FF4500", "#FF8C00"],
    &["#9370DB", "#8A2BE2", "#9400D3", "#9932CC", "#BA55D3"],
    &["#40E0D0", "#48D1CC", "#00CED1", "#20B2AA", "#5F9EA0"],
    &["#F08080", "#FA8072", "#E9967A", "#FFA07A", "#FF7F50"],
    &["#A52A2A", "#800000", "#B22222", "#FF0000", "#CD5C5C"],
    &["#808000", "#556B2F", "#6B8E23", "#9ACD32", "#32CD32"],
    &["#2F4F4F", "#696969", "#708090", "#778899", "#B0C4DE"],
    &["#ADD8E6", "#87CEFA", "#87CEEB", "#4682B4", "#00BFFF"],
    &["#FFFACD", "#FAFAD2", "#FFE4B5", "#FFDAB9", "#FFEBCD"],
    &["#8B4513", "#A0522D", "#D2691E", "#CD853F", "#F4A460"],
];

impl Palette {
    /// Creates a palette from a vector of colors.
    ///
    /// Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, EngineError> {
        if colors.is_empty() {
            return Err(EngineError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    ///
    /// Each string can be "#rrggbb" or "rrggbb" (case insensitive).
    /// Requires at least one color.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, EngineError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h))
            .collect::<Result<Vec<Srgb>, EngineError>>()?;
        Self::new(colors)
    }

    /// Returns the number of colors in this palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if this palette has no colors. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette's colors in order.
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Picks one color uniformly at random.
    pub fn pick(&self, rng: &mut Xorshift64) -> Srgb {
        self.colors[rng.next_usize(self.colors.len())]
    }

    // -- Built-in palette sets --

    /// The six palettes used by `squares` and `polygons`.
    pub fn mosaic_set() -> Vec<Palette> {
        builtin(MOSAIC)
    }

    /// The five palettes used by `triangles`, one per layer.
    pub fn layer_set() -> Vec<Palette> {
        builtin(LAYERS)
    }

    /// The thirteen palettes used by `rectangles`.
    pub fn field_set() -> Vec<Palette> {
        builtin(FIELD)
    }
}

fn builtin(set: &[&[&str]]) -> Vec<Palette> {
    set.iter()
        .map(|hexes| Palette::from_hex(hexes).expect("built-in palette hex values are valid"))
        .collect()
}
