//! rastermorph-morph - Grayscale and color morphology over raster surfaces
//!
//! This crate provides structuring-element morphology for every
//! byte-aligned [`PixelFormat`](rastermorph_core::PixelFormat):
//!
//! - [`StructuringElement`] - Odd-sized Boolean mask defining the neighborhood
//! - [`Erosion`] / [`Dilation`] - Neighborhood minimum / maximum
//! - [`Closing`] / [`Opening`] - Dilation then erosion / erosion then dilation
//! - [`TopHat`], [`BottomHat`], [`Gradient`] - Residues of the above
//!
//! Every filter implements [`MorphFilter`], which applies it to any
//! [`Surface`](rastermorph_core::Surface): copying into a new bitmap or a
//! caller-provided destination, in place, or in place over a region.
//!
//! Color channels are processed independently with the same element.
//! Alpha is carried over unchanged.
//!
//! # Features
//!
//! - `parallel` (default) - Run the copy strategy across the rayon pool
//!   when the filter's [`ProcessingMode`] is `Parallel`

mod composite;
mod error;
pub mod filter;
mod hat;
pub mod reduce;
pub mod sel;

pub use composite::{Closing, Opening};
pub use error::{MorphError, MorphResult};
pub use filter::{Dilation, Erosion, FORMAT_TRANSLATIONS, MorphFilter, Morphology};
pub use hat::{BottomHat, Gradient, TopHat};
pub use reduce::{MorphOp, ProcessingMode};
pub use sel::StructuringElement;
