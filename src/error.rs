//! Error types for palette shifting.
//!
//! Configuration and shape problems are detected once per call, before any
//! pixel is read or written. The per-block computation itself cannot fail.

use thiserror::Error;

/// Invalid engine configuration (palette or block size).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("palette cannot be empty")]
    EmptyPalette,

    #[error("palette has {count} colors (max {max})", max = crate::filters::palette::MAX_COLORS)]
    TooManyColors { count: usize },

    #[error("block size must be at least 1x1, got {width}x{height}")]
    InvalidBlockSize { width: usize, height: usize },
}

/// Pixel buffer does not match its stated dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("buffer holds {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("row stride {stride} is shorter than a row of {row_bytes} bytes")]
    StrideTooShort { stride: usize, row_bytes: usize },

    #[error("image dimensions {width}x{height} overflow the address space")]
    DimensionOverflow { width: usize, height: usize },
}

/// Malformed palette entry. `entry` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("entry {entry}: '{text}' has invalid length (expected 3 or 6 hex digits)")]
    InvalidLength { entry: usize, text: String },

    #[error("entry {entry}: '{text}' contains a non-hex character")]
    InvalidHex { entry: usize, text: String },

    #[error("entry {entry}: '{text}' is not an r,g,b triple")]
    InvalidTriple { entry: usize, text: String },

    #[error("entry {entry}: component '{text}' is outside 0-255")]
    ComponentOutOfRange { entry: usize, text: String },
}

/// Unified error for every public entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteShiftError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("palette parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}

pub type Result<T> = std::result::Result<T, PaletteShiftError>;
