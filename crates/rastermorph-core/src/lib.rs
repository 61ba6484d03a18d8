//! rastermorph-core - Image surfaces for the rastermorph morphology engine
//!
//! This crate provides the data structures the filters operate on:
//!
//! - [`PixelFormat`] - The fixed set of supported pixel layouts
//! - [`Layout`] - Width, height, row stride and format of a surface
//! - [`Surface`] / [`SurfaceMut`] - Uniform read / write access to pixels
//! - [`Bitmap`] / [`BitmapMut`] - Owned copy-on-write image (immutable / mutable)
//! - [`PixelBuffer`] / [`PixelBufferMut`] - Locked views over borrowed bytes
//! - [`RawSurface`] - Unmanaged buffer addressed by raw pointer
//! - [`Region`] - Rectangular region of interest

pub mod error;
pub mod format;
pub mod region;
pub mod surface;

pub use error::{Error, Result};
pub use format::PixelFormat;
pub use region::Region;
pub use surface::{
    Bitmap, BitmapMut, Layout, PixelBuffer, PixelBufferMut, RawSurface, Surface, SurfaceMut,
    read_sample, write_sample,
};
