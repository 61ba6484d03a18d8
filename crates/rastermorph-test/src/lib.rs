//! rastermorph-test - Regression test framework for rastermorph
//!
//! This crate provides the bookkeeping shared by the `*_reg` integration
//! tests of every workspace crate:
//!
//! - [`RegParams`] - Indexed comparisons that collect failures and report
//!   them all at the end instead of stopping at the first one
//! - [`synthetic`] - Deterministic fixture images built in memory
//! - [`reference`] - Straightforward erosion / dilation to compare against
//!
//! # Usage
//!
//! ```ignore
//! use rastermorph_test::{RegParams, synthetic};
//!
//! let mut rp = RegParams::new("graymorph");
//! let pixs = synthetic::gradient(32, 24, PixelFormat::Gray8)?;
//! rp.compare_surfaces(&expected, &actual);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod reference;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::RegParams;
