//! Error types for rastermorph-core
//!
//! Provides a unified error type for surface construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::PixelFormat;
use thiserror::Error;

/// Surface layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Row stride shorter than one row of pixels
    #[error("invalid stride {stride} for {format:?} rows of {width} pixels (need at least {min})")]
    InvalidStride {
        stride: usize,
        width: u32,
        format: PixelFormat,
        min: usize,
    },

    /// Backing buffer too small for the layout
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Pixel format mismatch between two surfaces
    #[error("format mismatch: expected {expected:?}, got {actual:?}")]
    FormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for surface operations
pub type Result<T> = std::result::Result<T, Error>;
