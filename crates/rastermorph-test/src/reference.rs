//! Reference neighborhood reduction
//!
//! A direct per-sample rendition of erosion and dilation through the
//! [`Surface`] accessors. Slow, and independent of the engine's row
//! scheduling, which makes it the yardstick for regression tests.

use crate::error::TestResult;
use rastermorph_core::{Bitmap, BitmapMut, Surface, SurfaceMut};

/// Reduce every color sample of `src` over `offsets` (dy, dx).
///
/// Uses the maximum when `dilate` is set and the minimum otherwise. Offsets
/// outside the surface are skipped; a sample with no offset inside keeps
/// its value. Alpha is copied.
pub fn reduce(src: &dyn Surface, offsets: &[(i32, i32)], dilate: bool) -> TestResult<Bitmap> {
    let mut out = BitmapMut::copy_of(src)?;
    let (w, h) = (src.width() as i64, src.height() as i64);
    let color = src.format().color_channels();
    for y in 0..src.height() {
        for x in 0..src.width() {
            for c in 0..color {
                let values = offsets.iter().filter_map(|&(dy, dx)| {
                    let (nx, ny) = (x as i64 + dx as i64, y as i64 + dy as i64);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        None
                    } else {
                        src.sample(nx as u32, ny as u32, c)
                    }
                });
                let reduced = if dilate { values.max() } else { values.min() };
                if let Some(v) = reduced {
                    out.set_sample(x, y, c, v)?;
                }
            }
        }
    }
    Ok(out.into())
}

/// Offsets of a `size` x `size` element with every cell active.
pub fn square_offsets(size: u32) -> Vec<(i32, i32)> {
    let r = (size / 2) as i32;
    (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dy, dx)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic;

    #[test]
    fn test_reference_dilate() {
        let src = synthetic::from_gray8(3, 1, &[1, 9, 4]).unwrap();
        let out = reduce(&src, &square_offsets(3), true).unwrap();
        let row: Vec<_> = (0..3).map(|x| out.sample(x, 0, 0).unwrap()).collect();
        assert_eq!(row, vec![9, 9, 9]);
        let out = reduce(&src, &square_offsets(3), false).unwrap();
        let row: Vec<_> = (0..3).map(|x| out.sample(x, 0, 0).unwrap()).collect();
        assert_eq!(row, vec![1, 1, 4]);
    }
}
