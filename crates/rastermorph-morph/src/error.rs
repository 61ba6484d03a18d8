//! Error types for rastermorph-morph

use rastermorph_core::{PixelFormat, Region};
use thiserror::Error;

/// Errors that can occur during morphological operations
///
/// Every error is reported before any pixel of any surface is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rastermorph_core::Error),

    /// Invalid structuring element (even or zero size, no active cell)
    #[error("invalid structuring element: {0}")]
    InvalidStructuringElement(String),

    /// Input pixel format is not in the filter's translation table
    #[error("unsupported pixel format: {0:?}")]
    UnsupportedPixelFormat(PixelFormat),

    /// Destination format differs from the expected output format
    #[error("pixel format mismatch: expected {expected:?}, got {actual:?}")]
    PixelFormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    /// Destination size differs from the source size
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Region is empty or not contained in the surface
    #[error("invalid region {region} for {width}x{height} surface")]
    InvalidRegion {
        region: Region,
        width: u32,
        height: u32,
    },
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
