//! Locked pixel-buffer views
//!
//! A `PixelBuffer` is a stride + base-pointer view over bytes owned by
//! someone else: another image library, a frame from a capture device, or a
//! [`Bitmap`](super::Bitmap) locked for direct access. The borrow lasts as
//! long as the view, so the buffer stays locked until the view is dropped.

use super::{Layout, Surface, SurfaceMut};
use crate::error::Result;

/// Read-only view over borrowed pixel bytes
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    bytes: &'a [u8],
    layout: Layout,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `bytes` laid out as described by `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BufferTooSmall`] if `bytes` cannot back
    /// `layout`.
    pub fn new(bytes: &'a [u8], layout: Layout) -> Result<Self> {
        layout.check_buffer(bytes.len())?;
        Ok(Self::from_parts(bytes, layout))
    }

    /// Caller guarantees `bytes.len() >= layout.buffer_len()`.
    pub(super) fn from_parts(bytes: &'a [u8], layout: Layout) -> Self {
        Self { bytes, layout }
    }
}

impl Surface for PixelBuffer<'_> {
    #[inline]
    fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.bytes
    }
}

/// Mutable view over borrowed pixel bytes
#[derive(Debug)]
pub struct PixelBufferMut<'a> {
    bytes: &'a mut [u8],
    layout: Layout,
}

impl<'a> PixelBufferMut<'a> {
    /// Wrap `bytes` laid out as described by `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BufferTooSmall`] if `bytes` cannot back
    /// `layout`.
    pub fn new(bytes: &'a mut [u8], layout: Layout) -> Result<Self> {
        layout.check_buffer(bytes.len())?;
        Ok(Self::from_parts(bytes, layout))
    }

    /// Caller guarantees `bytes.len() >= layout.buffer_len()`.
    pub(super) fn from_parts(bytes: &'a mut [u8], layout: Layout) -> Self {
        Self { bytes, layout }
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> PixelBuffer<'_> {
        PixelBuffer::from_parts(&self.bytes[..], self.layout)
    }
}

impl Surface for PixelBufferMut<'_> {
    #[inline]
    fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl SurfaceMut for PixelBufferMut<'_> {
    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitmapMut, PixelFormat};

    #[test]
    fn test_view_over_padded_rows() {
        let layout = Layout::with_stride(2, 2, 5, PixelFormat::Gray16).unwrap();
        let mut bytes = vec![0u8; 10];
        {
            let mut view = PixelBufferMut::new(&mut bytes, layout).unwrap();
            view.set_sample(1, 1, 0, 0x1234).unwrap();
            assert_eq!(view.as_view().sample(1, 1, 0), Some(0x1234));
        }
        assert_eq!(&bytes[7..9], &0x1234u16.to_ne_bytes());
        // Padding byte untouched
        assert_eq!(bytes[9], 0);
    }

    #[test]
    fn test_view_too_small() {
        let layout = Layout::new(4, 4, PixelFormat::Rgb24).unwrap();
        let bytes = vec![0u8; 20];
        assert!(PixelBuffer::new(&bytes, layout).is_err());
    }

    #[test]
    fn test_lock_bitmap() {
        let mut bitmap = BitmapMut::new(3, 3, PixelFormat::Gray8).unwrap();
        bitmap.lock_mut().set_sample(1, 2, 0, 77).unwrap();
        assert_eq!(bitmap.sample(1, 2, 0), Some(77));
    }
}
