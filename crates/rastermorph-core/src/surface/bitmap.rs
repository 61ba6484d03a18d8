//! Bitmap - The owned image container
//!
//! # Ownership model
//!
//! `Bitmap` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `BitmapMut` via [`Bitmap::try_into_mut`]
//! or [`Bitmap::to_mut`], then convert back with `Into<Bitmap>`.

use super::{Layout, PixelBuffer, PixelBufferMut, Surface, SurfaceMut};
use crate::PixelFormat;
use crate::error::Result;
use std::sync::Arc;

/// Internal bitmap data
#[derive(Debug)]
struct BitmapData {
    /// Geometry and format
    layout: Layout,
    /// The image data, `layout.buffer_len()` bytes
    data: Vec<u8>,
}

/// Owned copy-on-write image
///
/// # Examples
///
/// ```
/// use rastermorph_core::{Bitmap, PixelFormat, Surface};
///
/// let bitmap = Bitmap::new(640, 480, PixelFormat::Gray8).unwrap();
/// assert_eq!(bitmap.width(), 640);
/// assert_eq!(bitmap.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Bitmap {
    inner: Arc<BitmapData>,
}

impl Bitmap {
    /// Create a new bitmap with the default stride.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Ok(BitmapMut::new(width, height, format)?.into())
    }

    /// Create a bitmap that takes ownership of existing bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BufferTooSmall`] if `data` cannot back `layout`.
    pub fn from_bytes(layout: Layout, data: Vec<u8>) -> Result<Self> {
        Ok(BitmapMut::from_bytes(layout, data)?.into())
    }

    /// Get the number of strong references to this bitmap.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a new zeroed bitmap with the same layout.
    pub fn create_template(&self) -> Self {
        let inner = BitmapData {
            layout: self.inner.layout,
            data: vec![0u8; self.inner.data.len()],
        };
        Bitmap {
            inner: Arc::new(inner),
        }
    }

    /// Create a deep copy of this bitmap.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        self.to_mut().into()
    }

    /// Check whether two surfaces hold identical pixels.
    ///
    /// Width, height and format must match; stride padding is ignored.
    pub fn equals(&self, other: &dyn Surface) -> bool {
        let a = self.layout();
        let b = other.layout();
        a.same_size(&b)
            && a.format() == b.format()
            && (0..a.height()).all(|y| self.row(y) == other.row(y))
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`BitmapMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<BitmapMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(BitmapMut { inner: data }),
            Err(arc) => Err(Bitmap { inner: arc }),
        }
    }

    /// Create a mutable copy of this bitmap.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> BitmapMut {
        BitmapMut {
            inner: BitmapData {
                layout: self.inner.layout,
                data: self.inner.data.clone(),
            },
        }
    }

    /// Lock the pixel buffer for direct read access.
    pub fn lock(&self) -> PixelBuffer<'_> {
        self.view()
    }
}

impl Surface for Bitmap {
    #[inline]
    fn layout(&self) -> Layout {
        self.inner.layout
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        &self.inner.data
    }
}

/// Mutable bitmap
///
/// Allows modification of image data. Convert back to an immutable
/// [`Bitmap`] using `Into<Bitmap>`.
#[derive(Debug)]
pub struct BitmapMut {
    inner: BitmapData,
}

impl BitmapMut {
    /// Create a new zeroed bitmap with the default stride.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let layout = Layout::new(width, height, format)?;
        Ok(BitmapMut {
            inner: BitmapData {
                layout,
                data: vec![0u8; layout.buffer_len()],
            },
        })
    }

    /// Create a mutable bitmap that takes ownership of existing bytes.
    ///
    /// Bytes beyond `layout.buffer_len()` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BufferTooSmall`] if `data` cannot back `layout`.
    pub fn from_bytes(layout: Layout, mut data: Vec<u8>) -> Result<Self> {
        layout.check_buffer(data.len())?;
        data.truncate(layout.buffer_len());
        Ok(BitmapMut {
            inner: BitmapData { layout, data },
        })
    }

    /// Create a mutable bitmap holding a copy of any surface's pixels.
    ///
    /// The copy uses the default stride for the source's size and format.
    ///
    /// # Errors
    ///
    /// Propagates layout errors; a valid source never produces one.
    pub fn copy_of(src: &dyn Surface) -> Result<Self> {
        let mut out = Self::new(src.width(), src.height(), src.format())?;
        out.copy_from(src)?;
        Ok(out)
    }

    /// Lock the pixel buffer for direct write access.
    pub fn lock_mut(&mut self) -> PixelBufferMut<'_> {
        let layout = self.inner.layout;
        PixelBufferMut::from_parts(&mut self.inner.data, layout)
    }

    /// Consume the bitmap and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.data
    }
}

impl Surface for BitmapMut {
    #[inline]
    fn layout(&self) -> Layout {
        self.inner.layout
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        &self.inner.data
    }
}

impl SurfaceMut for BitmapMut {
    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }
}

impl From<BitmapMut> for Bitmap {
    fn from(bitmap_mut: BitmapMut) -> Self {
        Bitmap {
            inner: Arc::new(bitmap_mut.inner),
        }
    }
}
