//! Error types for the artgen core.

use thiserror::Error;

/// Errors produced while resolving inputs, generating, or writing an image.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A color token looked like an explicit color (`r,g,b` or `#rrggbb`)
    /// but was malformed or had an out-of-range channel.
    #[error(
        "invalid color '{0}': expected r,g,b with integers in 0..=255, #rrggbb, or a color name"
    )]
    InvalidColorFormat(String),

    /// A color name was found in neither the standard nor the custom table.
    #[error("unknown color: {0}. Use RGB (e.g. '255,255,0') or a valid color name")]
    UnknownColorName(String),

    /// The requested style has no registered generator.
    #[error("unknown style: {0}")]
    UnknownStyle(String),

    /// The output image could not be encoded or written.
    #[error("failed to write '{path}': {reason}")]
    OutputWriteFailure { path: String, reason: String },

    /// Canvas extents, figure size or resolution produce an empty or
    /// unrepresentable pixel buffer.
    #[error("invalid dimensions: canvas extents, figure size and dpi must be positive")]
    InvalidDimensions,

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),
}
