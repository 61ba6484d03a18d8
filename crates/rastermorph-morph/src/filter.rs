//! Erosion and dilation filters
//!
//! Every filter in this crate implements [`MorphFilter`], which offers the
//! same set of operations over any [`Surface`]:
//!
//! - [`MorphFilter::apply`] - Allocate and return a new [`Bitmap`]
//! - [`MorphFilter::apply_to`] - Write into a caller-provided destination
//! - [`MorphFilter::apply_in_place`] - Overwrite the input
//! - [`MorphFilter::apply_in_place_region`] - Overwrite a rectangle of the
//!   input, reading neighbors from the whole surface
//!
//! All arguments are validated before any pixel is written; a failed call
//! leaves every surface untouched.
//!
//! # Example
//!
//! ```
//! use rastermorph_core::{BitmapMut, PixelFormat, Surface, SurfaceMut};
//! use rastermorph_morph::{Dilation, MorphFilter, StructuringElement};
//!
//! let mut pix = BitmapMut::new(5, 5, PixelFormat::Gray8).unwrap();
//! pix.set_sample(2, 2, 0, 200).unwrap();
//!
//! let dilation = Dilation::new(StructuringElement::default());
//! let out = dilation.apply(&pix).unwrap();
//! assert_eq!(out.sample(1, 1, 0), Some(200));
//! assert_eq!(out.sample(0, 0, 0), Some(0));
//! ```

use crate::reduce::{self, MorphOp, Neighborhood, ProcessingMode};
use crate::sel::StructuringElement;
use crate::{MorphError, MorphResult};
use log::debug;
use rastermorph_core::{Bitmap, BitmapMut, Layout, PixelFormat, Region, Surface, SurfaceMut};

/// Accepted input formats and the output format each produces
///
/// Morphology never changes channel depth, so every entry maps a format to
/// itself. [`PixelFormat::Mono1`] is not accepted.
pub const FORMAT_TRANSLATIONS: &[(PixelFormat, PixelFormat)] = &[
    (PixelFormat::Gray8, PixelFormat::Gray8),
    (PixelFormat::Gray16, PixelFormat::Gray16),
    (PixelFormat::Rgb24, PixelFormat::Rgb24),
    (PixelFormat::Rgba32, PixelFormat::Rgba32),
    (PixelFormat::Rgb48, PixelFormat::Rgb48),
    (PixelFormat::Rgba64, PixelFormat::Rgba64),
];

/// A morphological filter over surfaces
///
/// The trait is object safe, so filters can be stored as
/// `Box<dyn MorphFilter>`.
pub trait MorphFilter {
    /// Accepted input formats and the output format each produces.
    fn format_translations(&self) -> &'static [(PixelFormat, PixelFormat)] {
        FORMAT_TRANSLATIONS
    }

    /// Output format for an input format.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnsupportedPixelFormat`] if `input` is not in
    /// [`MorphFilter::format_translations`].
    fn output_format(&self, input: PixelFormat) -> MorphResult<PixelFormat> {
        self.format_translations()
            .iter()
            .find(|(from, _)| *from == input)
            .map(|&(_, to)| to)
            .ok_or(MorphError::UnsupportedPixelFormat(input))
    }

    /// Filter `src` into a newly allocated bitmap; `src` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnsupportedPixelFormat`] for a rejected format.
    fn apply(&self, src: &dyn Surface) -> MorphResult<Bitmap> {
        let format = self.output_format(src.format())?;
        let mut dst = BitmapMut::new(src.width(), src.height(), format)?;
        self.apply_to(src, &mut dst)?;
        Ok(dst.into())
    }

    /// Filter `src` into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnsupportedPixelFormat`] for a rejected source
    /// format, [`MorphError::DimensionMismatch`] if the sizes differ and
    /// [`MorphError::PixelFormatMismatch`] if `dst` does not have the
    /// expected output format.
    fn apply_to(&self, src: &dyn Surface, dst: &mut dyn SurfaceMut) -> MorphResult<()>;

    /// Filter `surface` in place.
    ///
    /// The result is identical to [`MorphFilter::apply`] followed by a copy
    /// back into `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnsupportedPixelFormat`] for a rejected format.
    fn apply_in_place(&self, surface: &mut dyn SurfaceMut) -> MorphResult<()> {
        let region = Region::full(surface.width(), surface.height());
        self.apply_in_place_region(surface, region)
    }

    /// Filter only the pixels of `region`, in place.
    ///
    /// Neighbors outside `region` are still read, so pixels on the region's
    /// edge see the surrounding context.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnsupportedPixelFormat`] for a rejected format
    /// and [`MorphError::InvalidRegion`] if `region` is empty or not inside
    /// the surface.
    fn apply_in_place_region(
        &self,
        surface: &mut dyn SurfaceMut,
        region: Region,
    ) -> MorphResult<()>;
}

/// Check a source / destination pair for a copy operation.
pub(crate) fn check_destination<F: MorphFilter + ?Sized>(
    filter: &F,
    src: Layout,
    dst: Layout,
) -> MorphResult<()> {
    let expected = filter.output_format(src.format())?;
    if !src.same_size(&dst) {
        return Err(MorphError::DimensionMismatch {
            expected: (src.width(), src.height()),
            actual: (dst.width(), dst.height()),
        });
    }
    if dst.format() != expected {
        return Err(MorphError::PixelFormatMismatch {
            expected,
            actual: dst.format(),
        });
    }
    Ok(())
}

/// Check a surface and region for an in-place operation.
pub(crate) fn check_region<F: MorphFilter + ?Sized>(
    filter: &F,
    layout: Layout,
    region: Region,
) -> MorphResult<()> {
    let output = filter.output_format(layout.format())?;
    if output != layout.format() {
        return Err(MorphError::PixelFormatMismatch {
            expected: output,
            actual: layout.format(),
        });
    }
    if !region.fits_within(layout.width(), layout.height()) {
        return Err(MorphError::InvalidRegion {
            region,
            width: layout.width(),
            height: layout.height(),
        });
    }
    Ok(())
}

/// Filter `src` into a new mutable bitmap, for stages that keep working on it.
pub(crate) fn render<F: MorphFilter + ?Sized>(
    filter: &F,
    src: &dyn Surface,
) -> MorphResult<BitmapMut> {
    let format = filter.output_format(src.format())?;
    let mut dst = BitmapMut::new(src.width(), src.height(), format)?;
    filter.apply_to(src, &mut dst)?;
    Ok(dst)
}

/// A single erosion or dilation pass
///
/// [`Erosion`] and [`Dilation`] are thin wrappers that fix the operation.
#[derive(Debug, Clone)]
pub struct Morphology {
    op: MorphOp,
    element: StructuringElement,
    neighborhood: Neighborhood,
    mode: ProcessingMode,
}

impl Morphology {
    /// Create a filter for `op` with the default processing mode.
    pub fn new(op: MorphOp, element: StructuringElement) -> Self {
        let neighborhood = Neighborhood::new(&element);
        Self {
            op,
            element,
            neighborhood,
            mode: ProcessingMode::default(),
        }
    }

    /// Set the processing mode for copy operations.
    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    /// The reduction this filter applies.
    pub fn op(&self) -> MorphOp {
        self.op
    }

    /// The structuring element.
    pub fn element(&self) -> &StructuringElement {
        &self.element
    }

    /// The processing mode for copy operations.
    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }
}

impl MorphFilter for Morphology {
    fn apply_to(&self, src: &dyn Surface, dst: &mut dyn SurfaceMut) -> MorphResult<()> {
        let layout = src.layout();
        check_destination(self, layout, dst.layout())?;
        debug!(
            "{}: {}x{} {:?}, {}x{} element, copy ({})",
            self.op.name(),
            layout.width(),
            layout.height(),
            layout.format(),
            self.element.size(),
            self.element.size(),
            if self.mode.is_parallel() {
                "parallel"
            } else {
                "sequential"
            }
        );
        reduce::reduce_into(
            self.op,
            &self.neighborhood,
            src.bytes(),
            layout,
            dst,
            self.mode,
        );
        Ok(())
    }

    fn apply_in_place_region(
        &self,
        surface: &mut dyn SurfaceMut,
        region: Region,
    ) -> MorphResult<()> {
        let layout = surface.layout();
        check_region(self, layout, region)?;
        debug!(
            "{}: {}x{} {:?}, {}x{} element, in place over {} ({}-row lookback)",
            self.op.name(),
            layout.width(),
            layout.height(),
            layout.format(),
            self.element.size(),
            self.element.size(),
            region,
            self.neighborhood.radius()
        );
        reduce::reduce_in_place(self.op, &self.neighborhood, surface, region);
        Ok(())
    }
}

macro_rules! primitive_filter {
    ($(#[$doc:meta])* $name:ident, $op:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: Morphology,
        }

        impl $name {
            /// Create the filter with the default processing mode.
            pub fn new(element: StructuringElement) -> Self {
                Self {
                    inner: Morphology::new($op, element),
                }
            }

            /// Set the processing mode for copy operations.
            pub fn with_mode(self, mode: ProcessingMode) -> Self {
                Self {
                    inner: self.inner.with_mode(mode),
                }
            }

            /// The structuring element.
            pub fn element(&self) -> &StructuringElement {
                self.inner.element()
            }

            /// The processing mode for copy operations.
            pub fn mode(&self) -> ProcessingMode {
                self.inner.mode()
            }
        }

        impl Default for $name {
            /// 3x3 element, every cell active.
            fn default() -> Self {
                Self::new(StructuringElement::default())
            }
        }

        impl From<$name> for Morphology {
            fn from(filter: $name) -> Self {
                filter.inner
            }
        }

        impl MorphFilter for $name {
            fn apply_to(&self, src: &dyn Surface, dst: &mut dyn SurfaceMut) -> MorphResult<()> {
                self.inner.apply_to(src, dst)
            }

            fn apply_in_place_region(
                &self,
                surface: &mut dyn SurfaceMut,
                region: Region,
            ) -> MorphResult<()> {
                self.inner.apply_in_place_region(surface, region)
            }
        }
    };
}

primitive_filter!(
    /// Erosion: per-pixel minimum over the structuring element
    ///
    /// Shrinks bright regions and grows dark ones.
    Erosion,
    MorphOp::Erode
);

primitive_filter!(
    /// Dilation: per-pixel maximum over the structuring element
    ///
    /// Grows bright regions and shrinks dark ones.
    Dilation,
    MorphOp::Dilate
);
