//! Surfaces - Addressable 2-D pixel buffers
//!
//! Every image representation the engine works with reduces to the same
//! shape: a [`Layout`] (width, height, row stride and pixel format) over a
//! byte buffer of at least `stride * height` bytes. The [`Surface`] and
//! [`SurfaceMut`] traits expose that shape; the concrete representations
//! are adapters over it:
//!
//! - [`Bitmap`] / [`BitmapMut`] - owned, copy-on-write image
//! - [`PixelBuffer`] / [`PixelBufferMut`] - locked view over borrowed bytes
//! - [`RawSurface`] - unmanaged buffer addressed by raw pointer
//!
//! # Row layout
//!
//! - Row `y` starts at byte `y * stride`
//! - Only the first `format.min_row_bytes(width)` bytes of a row hold pixels;
//!   the remainder up to `stride` is padding and is never read or compared

mod access;
mod bitmap;
mod buffer;
mod raw;

pub use access::*;
pub use bitmap::{Bitmap, BitmapMut};
pub use buffer::{PixelBuffer, PixelBufferMut};
pub use raw::RawSurface;

use crate::PixelFormat;
use crate::error::{Error, Result};

/// Geometry and format of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
}

impl Layout {
    /// Create a layout with the default stride.
    ///
    /// The default stride is the minimum row size rounded up to a 4-byte
    /// boundary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 or larger
    /// than `i32::MAX`.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        let stride = format.min_row_bytes(width).next_multiple_of(4);
        Self::with_stride(width, height, stride, format)
    }

    /// Create a layout with an explicit row stride in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for empty or oversized dimensions
    /// and [`Error::InvalidStride`] if `stride` cannot hold a row.
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        let min = format.min_row_bytes(width);
        if stride < min {
            return Err(Error::InvalidStride {
                stride,
                width,
                format,
                min,
            });
        }
        if stride.checked_mul(height as usize).is_none() {
            return Err(Error::InvalidParameter(format!(
                "buffer size overflows: stride {} x height {}",
                stride, height
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            format,
        })
    }

    fn check_dimensions(width: u32, height: u32) -> Result<()> {
        let limit = i32::MAX as u32;
        if width == 0 || height == 0 || width > limit || height > limit {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(())
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes of a row that hold pixel data.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.format.min_row_bytes(self.width)
    }

    /// Minimum backing buffer length.
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.stride * self.height as usize
    }

    /// Check if two layouts have the same width and height.
    pub fn same_size(&self, other: &Layout) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Check that a buffer of `len` bytes can back this layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `len < buffer_len()`.
    pub fn check_buffer(&self, len: usize) -> Result<()> {
        let needed = self.buffer_len();
        if len < needed {
            return Err(Error::BufferTooSmall {
                needed,
                actual: len,
            });
        }
        Ok(())
    }
}

/// Read access to a surface
///
/// Implementors guarantee that `bytes()` is at least
/// `layout().buffer_len()` bytes long.
pub trait Surface {
    /// Geometry and format.
    fn layout(&self) -> Layout;

    /// The backing bytes, starting at row 0.
    fn bytes(&self) -> &[u8];

    /// Width in pixels.
    #[inline]
    fn width(&self) -> u32 {
        self.layout().width()
    }

    /// Height in pixels.
    #[inline]
    fn height(&self) -> u32 {
        self.layout().height()
    }

    /// Row stride in bytes.
    #[inline]
    fn stride(&self) -> usize {
        self.layout().stride()
    }

    /// Pixel format.
    #[inline]
    fn format(&self) -> PixelFormat {
        self.layout().format()
    }

    /// Pixel bytes of row `y`, without stride padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    fn row(&self, y: u32) -> &[u8] {
        let layout = self.layout();
        assert!(y < layout.height(), "row {} out of bounds", y);
        let start = y as usize * layout.stride();
        &self.bytes()[start..start + layout.row_bytes()]
    }

    /// Get one channel sample at (x, y).
    ///
    /// Returns `None` if coordinates or channel are out of bounds.
    fn sample(&self, x: u32, y: u32, channel: u32) -> Option<u32> {
        let layout = self.layout();
        if x >= layout.width() || y >= layout.height() || channel >= layout.format().channels() {
            return None;
        }
        Some(read_sample(self.row(y), layout.format(), x, channel))
    }

    /// Borrow the pixels as a locked read-only view.
    fn view(&self) -> PixelBuffer<'_> {
        PixelBuffer::from_parts(self.bytes(), self.layout())
    }
}

/// Write access to a surface
pub trait SurfaceMut: Surface {
    /// The backing bytes, starting at row 0.
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Mutable pixel bytes of row `y`, without stride padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let layout = self.layout();
        assert!(y < layout.height(), "row {} out of bounds", y);
        let start = y as usize * layout.stride();
        &mut self.bytes_mut()[start..start + layout.row_bytes()]
    }

    /// Set one channel sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates or channel are out
    /// of bounds and [`Error::InvalidParameter`] if `val` does not fit in a
    /// sample.
    fn set_sample(&mut self, x: u32, y: u32, channel: u32, val: u32) -> Result<()> {
        let layout = self.layout();
        let format = layout.format();
        if x >= layout.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: layout.width() as usize,
            });
        }
        if y >= layout.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: layout.height() as usize,
            });
        }
        if channel >= format.channels() {
            return Err(Error::IndexOutOfBounds {
                index: channel as usize,
                len: format.channels() as usize,
            });
        }
        if val > format.max_sample_value() {
            return Err(Error::InvalidParameter(format!(
                "sample value {} exceeds {:?} maximum {}",
                val,
                format,
                format.max_sample_value()
            )));
        }
        write_sample(self.row_mut(y), format, x, channel, val);
        Ok(())
    }

    /// Copy every pixel of `src` into this surface.
    ///
    /// Strides may differ; padding bytes are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] or [`Error::FormatMismatch`] if
    /// the two surfaces differ in size or format.
    fn copy_from(&mut self, src: &dyn Surface) -> Result<()> {
        let dst_layout = self.layout();
        let src_layout = src.layout();
        if !dst_layout.same_size(&src_layout) {
            return Err(Error::DimensionMismatch {
                expected: (dst_layout.width(), dst_layout.height()),
                actual: (src_layout.width(), src_layout.height()),
            });
        }
        if dst_layout.format() != src_layout.format() {
            return Err(Error::FormatMismatch {
                expected: dst_layout.format(),
                actual: src_layout.format(),
            });
        }
        for y in 0..dst_layout.height() {
            self.row_mut(y).copy_from_slice(src.row(y));
        }
        Ok(())
    }

    /// Set every sample of every channel to `val`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `val` does not fit in a sample.
    fn fill(&mut self, val: u32) -> Result<()> {
        let layout = self.layout();
        let format = layout.format();
        if val > format.max_sample_value() {
            return Err(Error::InvalidParameter(format!(
                "fill value {} exceeds {:?} maximum {}",
                val,
                format,
                format.max_sample_value()
            )));
        }
        for y in 0..layout.height() {
            let row = self.row_mut(y);
            for x in 0..layout.width() {
                for c in 0..format.channels() {
                    write_sample(row, format, x, c, val);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_default_stride() {
        let layout = Layout::new(5, 3, PixelFormat::Rgb24).unwrap();
        assert_eq!(layout.row_bytes(), 15);
        assert_eq!(layout.stride(), 16);
        assert_eq!(layout.buffer_len(), 48);

        let layout = Layout::new(3, 2, PixelFormat::Rgba64).unwrap();
        assert_eq!(layout.stride(), 24);
    }

    #[test]
    fn test_layout_invalid() {
        assert!(matches!(
            Layout::new(0, 4, PixelFormat::Gray8),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Layout::with_stride(10, 4, 9, PixelFormat::Gray8),
            Err(Error::InvalidStride { min: 10, .. })
        ));
        assert!(Layout::with_stride(10, 4, 10, PixelFormat::Gray8).is_ok());
    }

    #[test]
    fn test_check_buffer() {
        let layout = Layout::with_stride(4, 4, 8, PixelFormat::Gray8).unwrap();
        assert!(layout.check_buffer(32).is_ok());
        assert_eq!(
            layout.check_buffer(31),
            Err(Error::BufferTooSmall {
                needed: 32,
                actual: 31
            })
        );
    }
}
