//! Region - Rectangular area of interest
//!
//! Restricts which pixels of a surface an in-place operation writes.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; coordinates are signed so that callers can express
/// (and have rejected) rectangles that start left of or above a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Region {
    /// Create a new region
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "region dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a region without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Region covering a whole `width` x `height` surface.
    ///
    /// Surface layouts never exceed `i32::MAX` in either dimension.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            w: width as i32,
            h: height as i32,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the region is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the region
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this region contains another region
    pub fn contains_region(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check whether this is a non-empty region inside a `width` x `height`
    /// surface.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty() && Region::full(width, height).contains_region(self)
    }

    /// Column range `x..right` as unsigned indices.
    ///
    /// Only meaningful once [`Region::fits_within`] has been checked.
    pub fn columns(&self) -> std::ops::Range<u32> {
        self.x as u32..self.right() as u32
    }

    /// Row range `y..bottom` as unsigned indices.
    ///
    /// Only meaningful once [`Region::fits_within`] has been checked.
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.y as u32..self.bottom() as u32
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}
