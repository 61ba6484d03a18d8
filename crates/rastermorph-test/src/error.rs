//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Surface construction failed
    #[error("surface error: {0}")]
    Surface(#[from] rastermorph_core::Error),

    /// Fixture parameters make no sense for the requested format
    #[error("invalid fixture '{name}': {message}")]
    InvalidFixture { name: String, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
