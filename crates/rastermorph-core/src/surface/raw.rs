//! RawSurface - Unmanaged pixel buffer
//!
//! Wraps memory the Rust side neither allocated nor owns, typically a frame
//! handed over through FFI. The caller keeps the memory alive and releases
//! it; dropping a `RawSurface` frees nothing.

use super::{Layout, Surface, SurfaceMut};
use crate::error::{Error, Result};
use std::ptr::NonNull;

/// Surface over a raw, caller-managed buffer
#[derive(Debug)]
pub struct RawSurface {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl RawSurface {
    /// Wrap `layout.buffer_len()` bytes starting at `ptr`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `ptr` is null.
    ///
    /// # Safety
    ///
    /// For the whole lifetime of the returned value, `ptr` must be valid for
    /// reads and writes of `layout.buffer_len()` bytes, and that memory must
    /// not be accessed through any other pointer or reference.
    pub unsafe fn from_raw_parts(ptr: *mut u8, layout: Layout) -> Result<Self> {
        let ptr = NonNull::new(ptr)
            .ok_or_else(|| Error::InvalidParameter("null surface pointer".to_string()))?;
        Ok(Self { ptr, layout })
    }

    /// Base pointer of row 0.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }
}

impl Surface for RawSurface {
    #[inline]
    fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        // SAFETY: `from_raw_parts` requires the pointer to be valid for
        // `buffer_len()` bytes and exclusively ours for our lifetime.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.buffer_len()) }
    }
}

impl SurfaceMut for RawSurface {
    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as in `bytes`; `&mut self` rules out overlapping borrows.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.buffer_len()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;

    #[test]
    fn test_raw_surface_writes_through() {
        let layout = Layout::with_stride(3, 2, 12, PixelFormat::Rgb24).unwrap();
        let mut backing = vec![0u8; layout.buffer_len()];
        {
            let mut raw = unsafe { RawSurface::from_raw_parts(backing.as_mut_ptr(), layout) }
                .unwrap();
            raw.set_sample(2, 1, 1, 9).unwrap();
            assert_eq!(raw.sample(2, 1, 1), Some(9));
        }
        assert_eq!(backing[12 + 2 * 3 + 1], 9);
    }

    #[test]
    fn test_raw_surface_null() {
        let layout = Layout::new(1, 1, PixelFormat::Gray8).unwrap();
        let raw = unsafe { RawSurface::from_raw_parts(std::ptr::null_mut(), layout) };
        assert!(raw.is_err());
    }
}
