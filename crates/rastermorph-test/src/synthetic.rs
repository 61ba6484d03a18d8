//! Synthetic fixture images
//!
//! Regression tests build their inputs here instead of loading them from
//! disk. Every builder is deterministic: the same arguments always produce
//! the same pixels.
//!
//! Sample values are given at 8-bit scale and widened with
//! [`scale_sample`] for 16-bit formats, so one fixture description works
//! across every format. Alpha channels are filled with a value distinct from
//! the color channels so that tests can tell when alpha was touched.

use crate::error::{TestError, TestResult};
use rastermorph_core::{Bitmap, BitmapMut, PixelFormat, Surface, SurfaceMut, write_sample};

/// Alpha value written by the builders, at 8-bit scale.
pub const FIXTURE_ALPHA: u32 = 0xA5;

/// Widen an 8-bit-scale value to the sample range of `format`.
///
/// 8-bit values map to 16-bit by byte replication (0xAB -> 0xABAB), so
/// 0 and 255 map to the ends of the range. Mono1 thresholds at 128.
pub fn scale_sample(format: PixelFormat, val: u8) -> u32 {
    match format.bits_per_sample() {
        1 => u32::from(val >= 128),
        16 => u32::from(val) * 257,
        _ => u32::from(val),
    }
}

/// Build an image from a function of (x, y, channel) at 8-bit scale.
///
/// The alpha channel, if any, is set to [`FIXTURE_ALPHA`].
pub fn from_fn<F>(width: u32, height: u32, format: PixelFormat, f: F) -> TestResult<Bitmap>
where
    F: Fn(u32, u32, u32) -> u8,
{
    let mut pix = BitmapMut::new(width, height, format)?;
    let color = format.color_channels();
    let alpha = scale_sample(format, FIXTURE_ALPHA as u8);
    for y in 0..height {
        let row = pix.row_mut(y);
        for x in 0..width {
            for c in 0..color {
                write_sample(row, format, x, c, scale_sample(format, f(x, y, c)));
            }
            if format.has_alpha() {
                write_sample(row, format, x, color, alpha);
            }
        }
    }
    Ok(pix.into())
}

/// Build a Gray8 image from row-major sample values.
pub fn from_gray8(width: u32, height: u32, values: &[u8]) -> TestResult<Bitmap> {
    let expected = width as usize * height as usize;
    if values.len() != expected {
        return Err(TestError::InvalidFixture {
            name: "from_gray8".to_string(),
            message: format!("{} values for a {}x{} image", values.len(), width, height),
        });
    }
    from_fn(width, height, PixelFormat::Gray8, |x, y, _| {
        values[(y * width + x) as usize]
    })
}

/// Smooth diagonal ramp; each color channel is offset so channels differ.
pub fn gradient(width: u32, height: u32, format: PixelFormat) -> TestResult<Bitmap> {
    let span = (width + height).max(2) - 1;
    from_fn(width, height, format, |x, y, c| {
        let t = (x + y) * 255 / span;
        ((t + c * 40) % 256) as u8
    })
}

/// Checkerboard of `block`-sized squares alternating between `low` and `high`.
pub fn checkerboard(
    width: u32,
    height: u32,
    format: PixelFormat,
    block: u32,
    low: u8,
    high: u8,
) -> TestResult<Bitmap> {
    if block == 0 {
        return Err(TestError::InvalidFixture {
            name: "checkerboard".to_string(),
            message: "block size must be positive".to_string(),
        });
    }
    from_fn(width, height, format, |x, y, _| {
        if (x / block + y / block) % 2 == 0 {
            low
        } else {
            high
        }
    })
}

/// Uniform `background` with a single `value` pixel at (x, y).
pub fn spot(
    width: u32,
    height: u32,
    format: PixelFormat,
    (sx, sy): (u32, u32),
    background: u8,
    value: u8,
) -> TestResult<Bitmap> {
    if sx >= width || sy >= height {
        return Err(TestError::InvalidFixture {
            name: "spot".to_string(),
            message: format!("spot ({}, {}) outside {}x{}", sx, sy, width, height),
        });
    }
    from_fn(width, height, format, |x, y, _| {
        if x == sx && y == sy { value } else { background }
    })
}

/// Pseudo-random texture derived from `seed`.
///
/// Uses an integer hash of the coordinates so that results do not depend
/// on iteration order.
pub fn pattern(width: u32, height: u32, format: PixelFormat, seed: u32) -> TestResult<Bitmap> {
    from_fn(width, height, format, |x, y, c| {
        let mut h = seed ^ 0x9E37_79B9;
        for v in [x, y, c] {
            h = h.wrapping_add(v).wrapping_mul(0x85EB_CA6B);
            h ^= h >> 13;
            h = h.wrapping_mul(0xC2B2_AE35);
            h ^= h >> 16;
        }
        (h >> 24) as u8
    })
}

/// Copy `src` into a bitmap whose rows carry `padding` extra bytes.
///
/// Padding bytes are set to 0xCD so that reads of padding show up in
/// comparisons of the raw buffer.
pub fn with_padding(src: &dyn Surface, padding: usize) -> TestResult<Bitmap> {
    let layout = rastermorph_core::Layout::with_stride(
        src.width(),
        src.height(),
        src.layout().row_bytes() + padding,
        src.format(),
    )?;
    let mut pix = BitmapMut::from_bytes(layout, vec![0xCD; layout.buffer_len()])?;
    pix.copy_from(src)?;
    Ok(pix.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_sample() {
        assert_eq!(scale_sample(PixelFormat::Gray8, 200), 200);
        assert_eq!(scale_sample(PixelFormat::Gray16, 0xFF), 0xFFFF);
        assert_eq!(scale_sample(PixelFormat::Rgb48, 0x12), 0x1212);
        assert_eq!(scale_sample(PixelFormat::Mono1, 200), 1);
    }

    #[test]
    fn test_from_gray8() {
        let pix = from_gray8(2, 2, &[1, 2, 3, 4]).unwrap();
        assert_eq!(pix.sample(1, 1, 0), Some(4));
        assert!(from_gray8(2, 2, &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_alpha_fill() {
        let pix = gradient(5, 4, PixelFormat::Rgba64).unwrap();
        assert_eq!(pix.sample(3, 2, 3), Some(FIXTURE_ALPHA * 257));
    }

    #[test]
    fn test_checkerboard() {
        let pix = checkerboard(8, 8, PixelFormat::Gray8, 2, 10, 90).unwrap();
        assert_eq!(pix.sample(0, 0, 0), Some(10));
        assert_eq!(pix.sample(2, 0, 0), Some(90));
        assert_eq!(pix.sample(2, 2, 0), Some(10));
        assert!(checkerboard(8, 8, PixelFormat::Gray8, 0, 10, 90).is_err());
    }

    #[test]
    fn test_pattern_deterministic() {
        let a = pattern(9, 7, PixelFormat::Rgb24, 3).unwrap();
        let b = pattern(9, 7, PixelFormat::Rgb24, 3).unwrap();
        let c = pattern(9, 7, PixelFormat::Rgb24, 4).unwrap();
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_with_padding() {
        let src = gradient(3, 3, PixelFormat::Gray16).unwrap();
        let padded = with_padding(&src, 5).unwrap();
        assert_eq!(padded.stride(), 11);
        assert!(padded.equals(&src));
        assert_eq!(padded.bytes()[6], 0xCD);
    }
}
