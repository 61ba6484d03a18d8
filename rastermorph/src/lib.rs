//! rastermorph - Grayscale and color mathematical morphology for Rust
//!
//! # Overview
//!
//! rastermorph applies structuring-element morphology to raster images:
//!
//! - Erosion and dilation (neighborhood minimum / maximum)
//! - Closing and opening, built from the two primitives
//! - Top-hat, bottom-hat and morphological gradient residues
//! - 8 and 16-bit grayscale, RGB and RGBA surfaces
//! - Owned bitmaps, locked views over borrowed bytes and raw buffers
//!
//! # Example
//!
//! ```
//! use rastermorph::{BitmapMut, PixelFormat, Surface, SurfaceMut};
//! use rastermorph::morph::{Closing, MorphFilter, StructuringElement};
//!
//! // A dark pixel in a bright 8-bit grayscale image
//! let mut pix = BitmapMut::new(16, 16, PixelFormat::Gray8).unwrap();
//! pix.fill(180).unwrap();
//! pix.set_sample(8, 8, 0, 20).unwrap();
//!
//! // Closing fills it in
//! let closing = Closing::new(StructuringElement::cross(3).unwrap());
//! closing.apply_in_place(&mut pix).unwrap();
//! assert_eq!(pix.sample(8, 8, 0), Some(180));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rastermorph_core::*;

// Re-export the engine as a module to keep its names grouped
pub use rastermorph_morph as morph;
