//! Residue filters: top-hat, bottom-hat and morphological gradient
//!
//! Each is the per-channel difference of two morphology results:
//!
//! - **Top-hat**: input - opening. Keeps bright features smaller than the
//!   structuring element.
//! - **Bottom-hat**: closing - input. Keeps dark features smaller than the
//!   structuring element.
//! - **Gradient**: dilation - erosion. Highlights edges.
//!
//! Subtraction saturates at zero. Alpha is carried over from the input.
//!
//! Region-limited variants compute each constituent with the same region
//! rule as the constituent filter, then write the residue inside the region
//! only.

use crate::composite::{Closing, Opening};
use crate::filter::{self, Dilation, Erosion, MorphFilter};
use crate::reduce::{Pixels, ProcessingMode, Sample};
use crate::sel::StructuringElement;
use crate::MorphResult;
use log::{debug, trace};
use rastermorph_core::{Bitmap, BitmapMut, Layout, Region, Surface, SurfaceMut};
use std::ops::Range;

/// Which operand the destination already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Minuend {
    /// dst = dst - other
    Destination,
    /// dst = other - dst
    Other,
}

/// Compute a constituent for `src` restricted to `region`.
///
/// A full-surface region uses the copy strategy; anything smaller filters
/// a copy of `src` in place so that the region rule of `filter` applies.
fn constituent<F: MorphFilter>(
    filter: &F,
    src: &dyn Surface,
    region: Region,
) -> MorphResult<Bitmap> {
    if region == Region::full(src.width(), src.height()) {
        return filter.apply(src);
    }
    let mut copy = BitmapMut::copy_of(src)?;
    filter.apply_in_place_region(&mut copy, region)?;
    Ok(copy.into())
}

fn subtract_typed<S: Sample>(
    dst: &mut dyn SurfaceMut,
    other: &dyn Surface,
    minuend: Minuend,
    region: Region,
) {
    let px = Pixels::of(dst.layout());
    let cols = region.columns();
    let cols: Range<usize> = cols.start as usize..cols.end as usize;

    for y in region.rows() {
        let rhs = other.row(y);
        let out = dst.row_mut(y);
        for x in cols.clone() {
            for c in 0..px.color {
                let i = x * px.channels + c;
                let a = S::load(out, i);
                let b = S::load(rhs, i);
                let v = match minuend {
                    Minuend::Destination => a.saturating_sub(b),
                    Minuend::Other => b.saturating_sub(a),
                };
                S::store(out, i, v);
            }
        }
    }
}

/// Replace color samples of `dst` inside `region` with their difference
/// from `other`.
fn subtract(dst: &mut dyn SurfaceMut, other: &dyn Surface, minuend: Minuend, region: Region) {
    match dst.format().bits_per_sample() {
        16 => subtract_typed::<u16>(dst, other, minuend, region),
        _ => subtract_typed::<u8>(dst, other, minuend, region),
    }
}

fn log_entry(name: &str, layout: Layout, element: &StructuringElement, region: Region) {
    debug!(
        "{}: {}x{} {:?}, {}x{} element, over {}",
        name,
        layout.width(),
        layout.height(),
        layout.format(),
        element.size(),
        element.size(),
        region
    );
}

/// Top-hat: input minus its opening
#[derive(Debug, Clone)]
pub struct TopHat {
    opening: Opening,
}

impl TopHat {
    /// Create the filter with the default processing mode.
    pub fn new(element: StructuringElement) -> Self {
        Self {
            opening: Opening::new(element),
        }
    }

    /// Set the processing mode for the copy stages.
    pub fn with_mode(self, mode: ProcessingMode) -> Self {
        Self {
            opening: self.opening.with_mode(mode),
        }
    }

    /// The structuring element.
    pub fn element(&self) -> &StructuringElement {
        self.opening.element()
    }

    fn residue(
        &self,
        src: &dyn Surface,
        dst: &mut dyn SurfaceMut,
        region: Region,
    ) -> MorphResult<()> {
        log_entry("tophat", src.layout(), self.element(), region);
        let opened = constituent(&self.opening, src, region)?;
        trace!("tophat: opening done");
        subtract(dst, &opened, Minuend::Destination, region);
        Ok(())
    }
}

/// Bottom-hat: closing minus the input
#[derive(Debug, Clone)]
pub struct BottomHat {
    closing: Closing,
}

impl BottomHat {
    /// Create the filter with the default processing mode.
    pub fn new(element: StructuringElement) -> Self {
        Self {
            closing: Closing::new(element),
        }
    }

    /// Set the processing mode for the copy stages.
    pub fn with_mode(self, mode: ProcessingMode) -> Self {
        Self {
            closing: self.closing.with_mode(mode),
        }
    }

    /// The structuring element.
    pub fn element(&self) -> &StructuringElement {
        self.closing.element()
    }

    fn residue(
        &self,
        src: &dyn Surface,
        dst: &mut dyn SurfaceMut,
        region: Region,
    ) -> MorphResult<()> {
        log_entry("bottomhat", src.layout(), self.element(), region);
        let closed = constituent(&self.closing, src, region)?;
        trace!("bottomhat: closing done");
        subtract(dst, &closed, Minuend::Other, region);
        Ok(())
    }
}

/// Morphological gradient: dilation minus erosion
#[derive(Debug, Clone)]
pub struct Gradient {
    dilation: Dilation,
    erosion: Erosion,
}

impl Gradient {
    /// Create the filter with the default processing mode.
    pub fn new(element: StructuringElement) -> Self {
        Self {
            dilation: Dilation::new(element.clone()),
            erosion: Erosion::new(element),
        }
    }

    /// Set the processing mode for the copy stages.
    pub fn with_mode(self, mode: ProcessingMode) -> Self {
        Self {
            dilation: self.dilation.with_mode(mode),
            erosion: self.erosion.with_mode(mode),
        }
    }

    /// The structuring element.
    pub fn element(&self) -> &StructuringElement {
        self.dilation.element()
    }

    fn residue(
        &self,
        src: &dyn Surface,
        dst: &mut dyn SurfaceMut,
        region: Region,
    ) -> MorphResult<()> {
        log_entry("gradient", src.layout(), self.element(), region);
        let dilated = constituent(&self.dilation, src, region)?;
        let eroded = constituent(&self.erosion, src, region)?;
        trace!("gradient: dilation and erosion done");
        // dst holds the erosion, then dst = dilated - dst
        copy_region(dst, &eroded, region);
        subtract(dst, &dilated, Minuend::Other, region);
        Ok(())
    }
}

/// Copy the pixels of `region` from `src` into `dst`.
fn copy_region(dst: &mut dyn SurfaceMut, src: &dyn Surface, region: Region) {
    let bpp = src.format().bits_per_pixel() as usize / 8;
    let cols = region.columns();
    let (start, end) = (cols.start as usize * bpp, cols.end as usize * bpp);
    for y in region.rows() {
        dst.row_mut(y)[start..end].copy_from_slice(&src.row(y)[start..end]);
    }
}

macro_rules! residue_filter {
    ($name:ident) => {
        impl Default for $name {
            /// 3x3 element, every cell active.
            fn default() -> Self {
                Self::new(StructuringElement::default())
            }
        }

        impl MorphFilter for $name {
            fn apply_to(&self, src: &dyn Surface, dst: &mut dyn SurfaceMut) -> MorphResult<()> {
                let layout = src.layout();
                filter::check_destination(self, layout, dst.layout())?;
                let region = Region::full(layout.width(), layout.height());
                let mut out = BitmapMut::copy_of(src)?;
                self.residue(src, &mut out, region)?;
                dst.copy_from(&out)?;
                Ok(())
            }

            fn apply_in_place_region(
                &self,
                surface: &mut dyn SurfaceMut,
                region: Region,
            ) -> MorphResult<()> {
                filter::check_region(self, surface.layout(), region)?;
                let src = BitmapMut::copy_of(&surface.view())?;
                self.residue(&src, surface, region)
            }
        }
    };
}

residue_filter!(TopHat);
residue_filter!(BottomHat);
residue_filter!(Gradient);
