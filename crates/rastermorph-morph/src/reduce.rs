//! Neighborhood reduction
//!
//! The scan shared by erosion and dilation. For each output pixel and each
//! color channel, the reducer combines the input samples at every active
//! offset of the structuring element with `min` (erosion) or `max`
//! (dilation).
//!
//! # Border policy
//!
//! Offsets that land outside the surface are left out of the reduction.
//! There is no padding value, so edges never see phantom extremes. If no
//! offset lands inside (possible only when the origin cell is inactive),
//! the pixel keeps its input value.
//!
//! # Strategies
//!
//! - Copy: every output row reads only the source, so rows are independent
//!   and may be split across the rayon pool.
//! - In place: rows are processed top to bottom. The original contents of
//!   the last `radius` rewritten rows are kept in a ring buffer so that
//!   later rows still read unmodified neighbors. Always sequential.
//!
//! Alpha is never reduced; it is carried over from the input.

use crate::sel::StructuringElement;
use rastermorph_core::{Layout, Region, SurfaceMut};
use std::ops::Range;

/// Reduction selecting erosion or dilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// Minimum over the neighborhood
    Erode,
    /// Maximum over the neighborhood
    Dilate,
}

impl MorphOp {
    /// Lowercase operation name, used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Erode => "erode",
            Self::Dilate => "dilate",
        }
    }

    /// The other operation.
    pub fn dual(self) -> Self {
        match self {
            Self::Erode => Self::Dilate,
            Self::Dilate => Self::Erode,
        }
    }
}

/// How the copy strategy schedules rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingMode {
    /// One row after another on the calling thread
    Sequential,
    /// Rows split across the rayon pool when the `parallel` feature is
    /// enabled; sequential otherwise
    #[default]
    Parallel,
}

impl ProcessingMode {
    /// Whether rows will actually run on the rayon pool.
    pub fn is_parallel(self) -> bool {
        cfg!(feature = "parallel") && self == Self::Parallel
    }
}

/// A channel sample as stored in a row
pub(crate) trait Sample: Copy + Ord + Send + Sync {
    fn load(row: &[u8], index: usize) -> Self;
    fn store(row: &mut [u8], index: usize, val: Self);
    fn saturating_sub(self, rhs: Self) -> Self;
}

impl Sample for u8 {
    #[inline]
    fn load(row: &[u8], index: usize) -> Self {
        row[index]
    }

    #[inline]
    fn store(row: &mut [u8], index: usize, val: Self) {
        row[index] = val;
    }

    #[inline]
    fn saturating_sub(self, rhs: Self) -> Self {
        u8::saturating_sub(self, rhs)
    }
}

impl Sample for u16 {
    #[inline]
    fn load(row: &[u8], index: usize) -> Self {
        let i = index * 2;
        u16::from_ne_bytes([row[i], row[i + 1]])
    }

    #[inline]
    fn store(row: &mut [u8], index: usize, val: Self) {
        let i = index * 2;
        row[i..i + 2].copy_from_slice(&val.to_ne_bytes());
    }

    #[inline]
    fn saturating_sub(self, rhs: Self) -> Self {
        u16::saturating_sub(self, rhs)
    }
}

/// Active offsets of an element, grouped by element row
///
/// Each entry is `(slot, dxs)`: `slot = dy + radius` indexes the row window
/// and `dxs` are the active column offsets of that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Neighborhood {
    radius: usize,
    rows: Vec<(usize, Vec<isize>)>,
}

impl Neighborhood {
    pub(crate) fn new(element: &StructuringElement) -> Self {
        let radius = element.origin() as usize;
        let mut rows: Vec<(usize, Vec<isize>)> = Vec::new();
        for (dy, dx) in element.active_offsets() {
            let slot = (dy as isize + radius as isize) as usize;
            match rows.last_mut() {
                Some((s, dxs)) if *s == slot => dxs.push(dx as isize),
                _ => rows.push((slot, vec![dx as isize])),
            }
        }
        Self { radius, rows }
    }

    pub(crate) fn radius(&self) -> usize {
        self.radius
    }
}

/// Pixel geometry of a row
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pixels {
    pub(crate) width: usize,
    pub(crate) channels: usize,
    pub(crate) color: usize,
}

impl Pixels {
    pub(crate) fn of(layout: Layout) -> Self {
        let format = layout.format();
        Self {
            width: layout.width() as usize,
            channels: format.channels() as usize,
            color: format.color_channels() as usize,
        }
    }
}

/// Read-only row access over a surface's bytes
#[derive(Debug, Clone, Copy)]
struct Rows<'a> {
    bytes: &'a [u8],
    stride: usize,
    len: usize,
    height: usize,
}

impl<'a> Rows<'a> {
    fn new(bytes: &'a [u8], layout: Layout) -> Self {
        Self {
            bytes,
            stride: layout.stride(),
            len: layout.row_bytes(),
            height: layout.height() as usize,
        }
    }

    #[inline]
    fn get(&self, y: usize) -> &'a [u8] {
        &self.bytes[y * self.stride..][..self.len]
    }

    /// Source row for each window slot around `y`; `None` outside the surface.
    fn window(&self, y: usize, radius: usize) -> Vec<Option<&'a [u8]>> {
        (0..=2 * radius)
            .map(|slot| {
                (y + slot)
                    .checked_sub(radius)
                    .filter(|&sy| sy < self.height)
                    .map(|sy| self.get(sy))
            })
            .collect()
    }
}

/// Reduce columns `cols` of one row into `out`.
///
/// `out` must already hold the input row; samples with no in-bounds
/// neighbor and alpha samples are left as they are.
fn scan_row<S, F>(
    nb: &Neighborhood,
    px: Pixels,
    window: &[Option<&[u8]>],
    out: &mut [u8],
    cols: Range<usize>,
    combine: F,
) where
    S: Sample,
    F: Fn(S, S) -> S,
{
    for x in cols {
        for c in 0..px.color {
            let mut acc: Option<S> = None;
            for (slot, dxs) in &nb.rows {
                let Some(src) = window[*slot] else {
                    continue;
                };
                for &dx in dxs {
                    let Some(nx) = x.checked_add_signed(dx).filter(|&nx| nx < px.width) else {
                        continue;
                    };
                    let v = S::load(src, nx * px.channels + c);
                    acc = Some(match acc {
                        Some(a) => combine(a, v),
                        None => v,
                    });
                }
            }
            if let Some(v) = acc {
                S::store(out, x * px.channels + c, v);
            }
        }
    }
}

/// Pick the combine function once per row.
#[inline]
fn reduce_row<S: Sample>(
    op: MorphOp,
    nb: &Neighborhood,
    px: Pixels,
    window: &[Option<&[u8]>],
    out: &mut [u8],
    cols: Range<usize>,
) {
    match op {
        MorphOp::Erode => scan_row::<S, _>(nb, px, window, out, cols, <S as Ord>::min),
        MorphOp::Dilate => scan_row::<S, _>(nb, px, window, out, cols, <S as Ord>::max),
    }
}

#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<F>(bytes: &mut [u8], stride: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    use rayon::prelude::*;

    if parallel {
        bytes
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, line)| f(y, line));
    } else {
        bytes
            .chunks_mut(stride)
            .enumerate()
            .for_each(|(y, line)| f(y, line));
    }
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<F>(bytes: &mut [u8], stride: usize, _parallel: bool, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    bytes
        .chunks_mut(stride)
        .enumerate()
        .for_each(|(y, line)| f(y, line));
}

/// Copy strategy: reduce every pixel of `src` into `dst`.
///
/// Both surfaces must already be validated to share size and format.
pub(crate) fn reduce_into(
    op: MorphOp,
    nb: &Neighborhood,
    src_bytes: &[u8],
    src_layout: Layout,
    dst: &mut dyn SurfaceMut,
    mode: ProcessingMode,
) {
    match src_layout.format().bits_per_sample() {
        16 => reduce_into_typed::<u16>(op, nb, src_bytes, src_layout, dst, mode),
        _ => reduce_into_typed::<u8>(op, nb, src_bytes, src_layout, dst, mode),
    }
}

fn reduce_into_typed<S: Sample>(
    op: MorphOp,
    nb: &Neighborhood,
    src_bytes: &[u8],
    src_layout: Layout,
    dst: &mut dyn SurfaceMut,
    mode: ProcessingMode,
) {
    let px = Pixels::of(src_layout);
    let rows = Rows::new(src_bytes, src_layout);
    let row_bytes = src_layout.row_bytes();
    let dst_layout = dst.layout();
    let bytes = &mut dst.bytes_mut()[..dst_layout.buffer_len()];

    for_each_row(bytes, dst_layout.stride(), mode.is_parallel(), |y, line| {
        let out = &mut line[..row_bytes];
        out.copy_from_slice(rows.get(y));
        let window = rows.window(y, nb.radius);
        reduce_row::<S>(op, nb, px, &window, out, 0..px.width);
    });
}

/// In-place strategy: reduce the pixels of `region`, reading neighbors from
/// the whole surface as it was before the call.
///
/// `region` must already be validated to lie within the surface.
pub(crate) fn reduce_in_place(
    op: MorphOp,
    nb: &Neighborhood,
    surface: &mut dyn SurfaceMut,
    region: Region,
) {
    match surface.format().bits_per_sample() {
        16 => reduce_in_place_typed::<u16>(op, nb, surface, region),
        _ => reduce_in_place_typed::<u8>(op, nb, surface, region),
    }
}

fn reduce_in_place_typed<S: Sample>(
    op: MorphOp,
    nb: &Neighborhood,
    surface: &mut dyn SurfaceMut,
    region: Region,
) {
    let layout = surface.layout();
    let px = Pixels::of(layout);
    let row_bytes = layout.row_bytes();
    let radius = nb.radius;
    let cols = region.columns();
    let cols = cols.start as usize..cols.end as usize;
    let top = region.y as usize;

    // Original contents of rewritten row `sy` live in slot `sy % radius`.
    let mut ring = vec![0u8; radius * row_bytes];
    let mut out = vec![0u8; row_bytes];

    for y in region.rows() {
        let y = y as usize;
        {
            let rows = Rows::new(surface.bytes(), layout);
            let ring = &ring;
            let window: Vec<Option<&[u8]>> = (0..=2 * radius)
                .map(|slot| {
                    let sy = (y + slot).checked_sub(radius).filter(|&sy| sy < rows.height)?;
                    if sy >= top && sy < y {
                        Some(&ring[(sy % radius) * row_bytes..][..row_bytes])
                    } else {
                        Some(rows.get(sy))
                    }
                })
                .collect();
            out.copy_from_slice(rows.get(y));
            reduce_row::<S>(op, nb, px, &window, &mut out, cols.clone());
        }
        if radius > 0 {
            let slot = (y % radius) * row_bytes;
            ring[slot..slot + row_bytes].copy_from_slice(surface.row(y as u32));
        }
        surface.row_mut(y as u32).copy_from_slice(&out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastermorph_core::{BitmapMut, PixelFormat, Surface};

    fn gray(width: u32, height: u32, values: &[u8]) -> BitmapMut {
        let layout = Layout::new(width, height, PixelFormat::Gray8).unwrap();
        let mut pix = BitmapMut::new(width, height, PixelFormat::Gray8).unwrap();
        for y in 0..height {
            let start = (y * width) as usize;
            pix.row_mut(y)
                .copy_from_slice(&values[start..start + width as usize]);
        }
        assert_eq!(pix.layout(), layout);
        pix
    }

    fn run_copy(op: MorphOp, se: &StructuringElement, src: &BitmapMut) -> BitmapMut {
        let nb = Neighborhood::new(se);
        let mut dst = BitmapMut::new(src.width(), src.height(), src.format()).unwrap();
        reduce_into(op, &nb, src.bytes(), src.layout(), &mut dst, ProcessingMode::Sequential);
        dst
    }

    #[test]
    fn test_neighborhood_grouping() {
        let se = StructuringElement::cross(3).unwrap();
        let nb = Neighborhood::new(&se);
        assert_eq!(nb.radius(), 1);
        assert_eq!(nb.rows, vec![(0, vec![0]), (1, vec![-1, 0, 1]), (2, vec![0])]);
    }

    #[test]
    fn test_op_dual() {
        assert_eq!(MorphOp::Erode.dual(), MorphOp::Dilate);
        assert_eq!(MorphOp::Dilate.name(), "dilate");
    }

    #[test]
    fn test_row_reduction() {
        let src = gray(5, 1, &[10, 50, 20, 90, 30]);
        let se = StructuringElement::square(3).unwrap();
        let eroded = run_copy(MorphOp::Erode, &se, &src);
        let dilated = run_copy(MorphOp::Dilate, &se, &src);
        assert_eq!(eroded.row(0), &[10, 10, 20, 20, 30]);
        assert_eq!(dilated.row(0), &[50, 50, 90, 90, 90]);
    }

    #[test]
    fn test_inactive_origin_keeps_input() {
        // Only the cell two columns to the right is active.
        let se = StructuringElement::from_string(".....\n.....\n....x\n.....\n.....").unwrap();
        let src = gray(3, 1, &[7, 8, 9]);
        let out = run_copy(MorphOp::Dilate, &se, &src);
        assert_eq!(out.row(0), &[9, 8, 9]);
    }

    #[test]
    fn test_u16_samples() {
        let mut src = BitmapMut::new(3, 1, PixelFormat::Gray16).unwrap();
        for (x, v) in [1000u32, 60000, 3].into_iter().enumerate() {
            src.set_sample(x as u32, 0, 0, v).unwrap();
        }
        let se = StructuringElement::square(3).unwrap();
        let out = run_copy(MorphOp::Erode, &se, &src);
        let values: Vec<_> = (0..3).map(|x| out.sample(x, 0, 0).unwrap()).collect();
        assert_eq!(values, vec![1000, 3, 3]);
    }

    #[test]
    fn test_in_place_matches_copy() {
        let values: Vec<u8> = (0..42u32).map(|i| ((i * 37) % 251) as u8).collect();
        let src = gray(7, 6, &values);
        let se = StructuringElement::diamond(2).unwrap();
        let nb = Neighborhood::new(&se);
        for op in [MorphOp::Erode, MorphOp::Dilate] {
            let expected = run_copy(op, &se, &src);
            let mut pix = gray(7, 6, &values);
            reduce_in_place(op, &nb, &mut pix, Region::full(7, 6));
            assert_eq!(pix.bytes(), expected.bytes());
        }
    }

    #[test]
    fn test_alpha_untouched() {
        let mut src = BitmapMut::new(2, 2, PixelFormat::Rgba32).unwrap();
        src.set_sample(0, 0, 0, 200).unwrap();
        src.set_sample(1, 1, 3, 17).unwrap();
        let se = StructuringElement::default();
        let out = run_copy(MorphOp::Dilate, &se, &src);
        assert_eq!(out.sample(1, 1, 0), Some(200));
        assert_eq!(out.sample(1, 1, 3), Some(17));
        assert_eq!(out.sample(0, 0, 3), Some(0));
    }
}
