//! Sample access functions
//!
//! Low-level functions for reading and writing individual channel samples
//! inside one row of a surface.
//!
//! # Sample packing
//!
//! - 1-bit pixels are packed MSB to LSB within each byte, so pixel 0 of a
//!   row occupies bit 7 of the first byte.
//! - 8-bit samples occupy one byte each.
//! - 16-bit samples occupy two bytes each in native byte order.
//!
//! Multi-channel pixels are interleaved: sample index `x * channels + c`.

use crate::PixelFormat;

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u8], x: u32) -> u32 {
    u32::from((line[(x >> 3) as usize] >> (7 - (x & 7))) & 1)
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u8], x: u32, val: u32) {
    let mask = 0x80u8 >> (x & 7);
    let byte = &mut line[(x >> 3) as usize];
    if val & 1 != 0 {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// Get an 8-bit sample by sample index.
#[inline]
pub fn get_data_byte(line: &[u8], index: usize) -> u32 {
    u32::from(line[index])
}

/// Set an 8-bit sample by sample index.
#[inline]
pub fn set_data_byte(line: &mut [u8], index: usize, val: u32) {
    line[index] = val as u8;
}

/// Get a 16-bit sample by sample index.
#[inline]
pub fn get_data_two_bytes(line: &[u8], index: usize) -> u32 {
    let at = index * 2;
    u32::from(u16::from_ne_bytes([line[at], line[at + 1]]))
}

/// Set a 16-bit sample by sample index.
#[inline]
pub fn set_data_two_bytes(line: &mut [u8], index: usize, val: u32) {
    let at = index * 2;
    line[at..at + 2].copy_from_slice(&(val as u16).to_ne_bytes());
}

/// Read channel `channel` of pixel `x` from a row of the given format.
///
/// # Panics
///
/// Panics if the sample lies beyond the end of `line`.
#[inline]
pub fn read_sample(line: &[u8], format: PixelFormat, x: u32, channel: u32) -> u32 {
    let index = (x * format.channels() + channel) as usize;
    match format {
        PixelFormat::Mono1 => get_data_bit(line, x),
        PixelFormat::Gray8 | PixelFormat::Rgb24 | PixelFormat::Rgba32 => {
            get_data_byte(line, index)
        }
        PixelFormat::Gray16 | PixelFormat::Rgb48 | PixelFormat::Rgba64 => {
            get_data_two_bytes(line, index)
        }
    }
}

/// Write channel `channel` of pixel `x` into a row of the given format.
///
/// Values wider than the sample are truncated.
#[inline]
pub fn write_sample(line: &mut [u8], format: PixelFormat, x: u32, channel: u32, val: u32) {
    let index = (x * format.channels() + channel) as usize;
    match format {
        PixelFormat::Mono1 => set_data_bit(line, x, val),
        PixelFormat::Gray8 | PixelFormat::Rgb24 | PixelFormat::Rgba32 => {
            set_data_byte(line, index, val)
        }
        PixelFormat::Gray16 | PixelFormat::Rgb48 | PixelFormat::Rgba64 => {
            set_data_two_bytes(line, index, val)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing() {
        let mut line = [0u8; 2];
        set_data_bit(&mut line, 0, 1);
        set_data_bit(&mut line, 9, 1);
        assert_eq!(line, [0x80, 0x40]);
        assert_eq!(get_data_bit(&line, 0), 1);
        assert_eq!(get_data_bit(&line, 1), 0);
        set_data_bit(&mut line, 0, 0);
        assert_eq!(line[0], 0);
    }

    #[test]
    fn test_interleaved_samples() {
        let mut line = [0u8; 12];
        write_sample(&mut line, PixelFormat::Rgb48, 1, 2, 0xBEEF);
        assert_eq!(read_sample(&line, PixelFormat::Rgb48, 1, 2), 0xBEEF);
        assert_eq!(&line[10..12], &0xBEEFu16.to_ne_bytes());

        write_sample(&mut line, PixelFormat::Rgba32, 2, 3, 7);
        assert_eq!(line[11], 7);
    }
}
