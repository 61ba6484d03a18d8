//! Structuring element for morphological operations
//!
//! A structuring element is a square Boolean mask of odd side length whose
//! center cell is the origin. Active cells name the (dy, dx) offsets that
//! take part in a neighborhood reduction.
//!
//! # Literal form
//!
//! Elements print and parse as rows of `x` (active) and `.` (inactive):
//!
//! ```text
//! .x.
//! xxx
//! .x.
//! ```

use crate::{MorphError, MorphResult};
use std::fmt;
use std::str::FromStr;

/// Structuring element
///
/// Immutable once constructed. Cheap to clone; filters keep their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuringElement {
    size: u32,
    mask: Vec<bool>,
}

impl StructuringElement {
    /// Create an element from a row-major `size` x `size` mask.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidStructuringElement`] if `size` is zero or
    /// even, if `mask` does not hold `size * size` cells, or if no cell is
    /// active.
    pub fn new(size: u32, mask: Vec<bool>) -> MorphResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(MorphError::InvalidStructuringElement(format!(
                "side length must be odd and positive, got {}",
                size
            )));
        }
        let cells = u64::from(size) * u64::from(size);
        if mask.len() as u64 != cells {
            return Err(MorphError::InvalidStructuringElement(format!(
                "{}x{} element needs {} cells, got {}",
                size,
                size,
                cells,
                mask.len()
            )));
        }
        if !mask.iter().any(|&b| b) {
            return Err(MorphError::InvalidStructuringElement(
                "no active cell".to_string(),
            ));
        }
        Ok(Self { size, mask })
    }

    /// Create an element from rows of cells.
    ///
    /// # Errors
    ///
    /// Same as [`StructuringElement::new`], plus a non-square matrix.
    pub fn from_rows(rows: &[&[bool]]) -> MorphResult<Self> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(MorphError::InvalidStructuringElement(format!(
                "matrix is not square: {} rows, a row of {} cells",
                size,
                row.len()
            )));
        }
        let size = u32::try_from(size).map_err(|_| {
            MorphError::InvalidStructuringElement(format!("{} rows is too many", size))
        })?;
        Self::new(size, rows.concat())
    }

    /// Parse the literal form.
    ///
    /// Rows are separated by newlines; `x` or `X` is active and `.` inactive.
    /// Whitespace around rows and blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidStructuringElement`] on any other
    /// character, and as [`StructuringElement::from_rows`] for the shape.
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let rows = pattern
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        'x' | 'X' => Ok(true),
                        '.' => Ok(false),
                        other => Err(MorphError::InvalidStructuringElement(format!(
                            "unexpected character {:?}",
                            other
                        ))),
                    })
                    .collect::<MorphResult<Vec<bool>>>()
            })
            .collect::<MorphResult<Vec<_>>>()?;
        let rows: Vec<&[bool]> = rows.iter().map(Vec::as_slice).collect();
        Self::from_rows(&rows)
    }

    fn from_fn(size: u32, f: impl Fn(i32, i32) -> bool) -> MorphResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(MorphError::InvalidStructuringElement(format!(
                "side length must be odd and positive, got {}",
                size
            )));
        }
        let r = (size / 2) as i32;
        let mask = (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dy, dx)))
            .map(|(dy, dx)| f(dy, dx))
            .collect();
        Self::new(size, mask)
    }

    fn side_for_radius(radius: u32) -> MorphResult<u32> {
        radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .ok_or_else(|| {
                MorphError::InvalidStructuringElement(format!("radius {} is too large", radius))
            })
    }

    /// Create a `size` x `size` element with every cell active.
    pub fn square(size: u32) -> MorphResult<Self> {
        Self::from_fn(size, |_, _| true)
    }

    /// Create a plus-shaped element: the center row and column.
    pub fn cross(size: u32) -> MorphResult<Self> {
        Self::from_fn(size, |dy, dx| dy == 0 || dx == 0)
    }

    /// Create a diamond of the given radius (city-block distance).
    pub fn diamond(radius: u32) -> MorphResult<Self> {
        let size = Self::side_for_radius(radius)?;
        let r = radius as i64;
        Self::from_fn(size, |dy, dx| i64::from(dy).abs() + i64::from(dx).abs() <= r)
    }

    /// Create a disk of the given radius (Euclidean distance).
    pub fn disk(radius: u32) -> MorphResult<Self> {
        let size = Self::side_for_radius(radius)?;
        let r2 = i64::from(radius) * i64::from(radius);
        Self::from_fn(size, |dy, dx| {
            let (dy, dx) = (i64::from(dy), i64::from(dx));
            dy * dy + dx * dx <= r2
        })
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Origin offset from the top-left cell, the same in both axes.
    #[inline]
    pub fn origin(&self) -> u32 {
        self.size / 2
    }

    /// Whether the cell at (dy, dx) relative to the origin is active.
    ///
    /// Offsets outside the element are inactive.
    pub fn is_active(&self, dy: i32, dx: i32) -> bool {
        let r = self.origin() as i64;
        let (row, col) = (i64::from(dy) + r, i64::from(dx) + r);
        let size = i64::from(self.size);
        if row < 0 || col < 0 || row >= size || col >= size {
            return false;
        }
        self.mask[(row * size + col) as usize]
    }

    /// Number of active cells.
    pub fn active_count(&self) -> usize {
        self.mask.iter().filter(|&&b| b).count()
    }

    /// Iterate over active (dy, dx) offsets relative to the origin, row by row.
    pub fn active_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let size = self.size as usize;
        let r = self.origin() as i32;
        self.mask
            .iter()
            .enumerate()
            .filter(|&(_, &active)| active)
            .map(move |(idx, _)| ((idx / size) as i32 - r, (idx % size) as i32 - r))
    }

    /// Whether the element equals its reflection through the origin.
    ///
    /// Closing and opening with a symmetric element are idempotent.
    pub fn is_symmetric(&self) -> bool {
        self.mask.iter().eq(self.mask.iter().rev())
    }

    /// The element reflected through the origin (rotated 180 degrees).
    pub fn reflect(&self) -> Self {
        Self {
            size: self.size,
            mask: self.mask.iter().rev().copied().collect(),
        }
    }
}

impl Default for StructuringElement {
    /// 3x3, every cell active.
    fn default() -> Self {
        Self {
            size: 3,
            mask: vec![true; 9],
        }
    }
}

impl fmt::Display for StructuringElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.mask.chunks(self.size as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &active in row {
                f.write_str(if active { "x" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl FromStr for StructuringElement {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_degenerate() {
        assert!(matches!(
            StructuringElement::new(0, vec![]),
            Err(MorphError::InvalidStructuringElement(_))
        ));
        assert!(StructuringElement::new(2, vec![true; 4]).is_err());
        assert!(StructuringElement::new(3, vec![false; 9]).is_err());
        assert!(StructuringElement::new(3, vec![true; 8]).is_err());
        assert!(StructuringElement::new(1, vec![true]).is_ok());
    }

    #[test]
    fn test_default() {
        let se = StructuringElement::default();
        assert_eq!(se.size(), 3);
        assert_eq!(se.origin(), 1);
        assert_eq!(se.active_count(), 9);
        assert_eq!(se, StructuringElement::square(3).unwrap());
    }

    #[test]
    fn test_cross() {
        let se = StructuringElement::cross(5).unwrap();
        assert_eq!(se.active_count(), 9);
        assert!(se.is_active(0, 0));
        assert!(se.is_active(-2, 0));
        assert!(se.is_active(0, 2));
        assert!(!se.is_active(1, 1));
        assert!(!se.is_active(3, 0));
        assert!(se.is_symmetric());
    }

    #[test]
    fn test_diamond_and_disk() {
        let d = StructuringElement::diamond(2).unwrap();
        assert_eq!(d.size(), 5);
        assert_eq!(d.active_count(), 13);
        assert!(!d.is_active(-2, -1));

        let k = StructuringElement::disk(2).unwrap();
        assert_eq!(k.active_count(), 13);
        assert!(k.is_active(-1, -1));
        assert!(!k.is_active(-2, -1));

        assert_eq!(StructuringElement::disk(0).unwrap().size(), 1);
        assert!(StructuringElement::diamond(u32::MAX).is_err());
    }

    #[test]
    fn test_active_offsets_order() {
        let se = StructuringElement::from_string(".x.\nxx.\n...").unwrap();
        let offsets: Vec<_> = se.active_offsets().collect();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 0)]);
        assert!(!se.is_symmetric());
        let reflected: Vec<_> = se.reflect().active_offsets().collect();
        assert_eq!(reflected, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_from_string() {
        let se = StructuringElement::from_string(
            "
            x.x
            .x.
            x.x
            ",
        )
        .unwrap();
        assert_eq!(se.active_count(), 5);
        assert!(se.is_active(-1, 1));

        assert!(StructuringElement::from_string("xo.\n...\n...").is_err());
        assert!(StructuringElement::from_string("xx\nxx").is_err());
        assert!(StructuringElement::from_string("xxx\nxx\nxxx").is_err());
        assert!(StructuringElement::from_string("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let se = StructuringElement::diamond(1).unwrap();
        let text = se.to_string();
        assert_eq!(text, ".x.\nxxx\n.x.");
        assert_eq!(text.parse::<StructuringElement>().unwrap(), se);
    }

    #[test]
    fn test_from_rows() {
        let se = StructuringElement::from_rows(&[&[false, true, false], &[true; 3], &[false; 3]])
            .unwrap();
        assert_eq!(se.active_count(), 4);
        assert!(StructuringElement::from_rows(&[&[true, true]]).is_err());
    }
}
