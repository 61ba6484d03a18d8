//! Pixel formats
//!
//! Every surface carries one of a fixed set of formats. Channels are
//! interleaved in R, G, B, A order; alpha, when present, is always the last
//! channel. 16-bit samples are stored in native byte order.

/// Pixel format of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 1-bit packed binary image, MSB first within each byte
    Mono1,
    /// 8-bit grayscale
    Gray8,
    /// 16-bit grayscale
    Gray16,
    /// 8-bit per channel RGB
    Rgb24,
    /// 8-bit per channel RGBA
    Rgba32,
    /// 16-bit per channel RGB
    Rgb48,
    /// 16-bit per channel RGBA
    Rgba64,
}

impl PixelFormat {
    /// All formats, in declaration order.
    pub const ALL: [PixelFormat; 7] = [
        PixelFormat::Mono1,
        PixelFormat::Gray8,
        PixelFormat::Gray16,
        PixelFormat::Rgb24,
        PixelFormat::Rgba32,
        PixelFormat::Rgb48,
        PixelFormat::Rgba64,
    ];

    /// Number of interleaved channels per pixel.
    pub fn channels(self) -> u32 {
        match self {
            Self::Mono1 | Self::Gray8 | Self::Gray16 => 1,
            Self::Rgb24 | Self::Rgb48 => 3,
            Self::Rgba32 | Self::Rgba64 => 4,
        }
    }

    /// Whether the last channel is alpha.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba32 | Self::Rgba64)
    }

    /// Number of channels that carry intensity (everything but alpha).
    pub fn color_channels(self) -> u32 {
        if self.has_alpha() {
            self.channels() - 1
        } else {
            self.channels()
        }
    }

    /// Bits used by a single channel sample.
    pub fn bits_per_sample(self) -> u32 {
        match self {
            Self::Mono1 => 1,
            Self::Gray8 | Self::Rgb24 | Self::Rgba32 => 8,
            Self::Gray16 | Self::Rgb48 | Self::Rgba64 => 16,
        }
    }

    /// Bits used by a whole pixel.
    pub fn bits_per_pixel(self) -> u32 {
        self.bits_per_sample() * self.channels()
    }

    /// Bytes per pixel, or `None` for sub-byte formats.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        let bits = self.bits_per_pixel();
        (bits % 8 == 0).then_some(bits as usize / 8)
    }

    /// Largest value a sample can hold.
    pub fn max_sample_value(self) -> u32 {
        (1u32 << self.bits_per_sample()) - 1
    }

    /// Minimum number of bytes needed to hold one row of `width` pixels.
    ///
    /// Uses u64 arithmetic to prevent overflow for large widths.
    pub fn min_row_bytes(self, width: u32) -> usize {
        let bits = u64::from(width) * u64::from(self.bits_per_pixel());
        bits.div_ceil(8) as usize
    }
}
