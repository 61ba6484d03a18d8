//! Closing and opening
//!
//! - **Closing**: dilation then erosion. Fills dark gaps smaller than the
//!   structuring element without growing bright regions overall.
//! - **Opening**: erosion then dilation. Removes bright specks smaller than
//!   the structuring element without shrinking bright regions overall.
//!
//! Both stages are built from the one structuring element given at
//! construction. The first stage renders into an intermediate bitmap owned
//! by the call; the second stage runs in place on it. The intermediate is
//! dropped before the call returns.

use crate::filter::{self, MorphFilter, Morphology};
use crate::reduce::{MorphOp, ProcessingMode};
use crate::sel::StructuringElement;
use crate::MorphResult;
use log::{debug, trace};
use rastermorph_core::{Region, Surface, SurfaceMut};

/// Two primitive passes sharing one structuring element
#[derive(Debug, Clone)]
struct TwoStage {
    name: &'static str,
    first: Morphology,
    second: Morphology,
}

impl TwoStage {
    fn new(name: &'static str, first: MorphOp, element: StructuringElement) -> Self {
        Self {
            name,
            second: Morphology::new(first.dual(), element.clone()),
            first: Morphology::new(first, element),
        }
    }

    fn with_mode(self, mode: ProcessingMode) -> Self {
        Self {
            name: self.name,
            first: self.first.with_mode(mode),
            second: self.second.with_mode(mode),
        }
    }
}

impl MorphFilter for TwoStage {
    fn apply(&self, src: &dyn Surface) -> MorphResult<rastermorph_core::Bitmap> {
        debug!(
            "{}: {}x{} {:?}, {}x{} element, copy",
            self.name,
            src.width(),
            src.height(),
            src.format(),
            self.first.element().size(),
            self.first.element().size()
        );
        let mut mid = filter::render(&self.first, src)?;
        trace!("{}: {} stage done", self.name, self.first.op().name());
        self.second.apply_in_place(&mut mid)?;
        Ok(mid.into())
    }

    fn apply_to(&self, src: &dyn Surface, dst: &mut dyn SurfaceMut) -> MorphResult<()> {
        filter::check_destination(self, src.layout(), dst.layout())?;
        debug!(
            "{}: {}x{} {:?}, {}x{} element, into destination",
            self.name,
            src.width(),
            src.height(),
            src.format(),
            self.first.element().size(),
            self.first.element().size()
        );
        let mut mid = filter::render(&self.first, src)?;
        trace!("{}: {} stage done", self.name, self.first.op().name());
        self.second.apply_in_place(&mut mid)?;
        dst.copy_from(&mid)?;
        Ok(())
    }

    fn apply_in_place(&self, surface: &mut dyn SurfaceMut) -> MorphResult<()> {
        let layout = surface.layout();
        filter::check_region(self, layout, Region::full(layout.width(), layout.height()))?;
        debug!(
            "{}: {}x{} {:?}, {}x{} element, in place",
            self.name,
            layout.width(),
            layout.height(),
            layout.format(),
            self.first.element().size(),
            self.first.element().size()
        );
        let mut mid = filter::render(&self.first, &surface.view())?;
        trace!("{}: {} stage done", self.name, self.first.op().name());
        self.second.apply_in_place(&mut mid)?;
        surface.copy_from(&mid)?;
        Ok(())
    }

    fn apply_in_place_region(
        &self,
        surface: &mut dyn SurfaceMut,
        region: Region,
    ) -> MorphResult<()> {
        let layout = surface.layout();
        filter::check_region(self, layout, region)?;
        debug!(
            "{}: {}x{} {:?}, {}x{} element, in place over {}",
            self.name,
            layout.width(),
            layout.height(),
            layout.format(),
            self.first.element().size(),
            self.first.element().size(),
            region
        );
        self.first.apply_in_place_region(surface, region)?;
        trace!("{}: {} stage done", self.name, self.first.op().name());
        self.second.apply_in_place_region(surface, region)
    }
}

macro_rules! composite_filter {
    ($(#[$doc:meta])* $name:ident, $label:literal, $first:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            stages: TwoStage,
        }

        impl $name {
            /// Create the filter with the default processing mode.
            pub fn new(element: StructuringElement) -> Self {
                Self {
                    stages: TwoStage::new($label, $first, element),
                }
            }

            /// Set the processing mode for the copy stages.
            pub fn with_mode(self, mode: ProcessingMode) -> Self {
                Self {
                    stages: self.stages.with_mode(mode),
                }
            }

            /// The structuring element.
            pub fn element(&self) -> &StructuringElement {
                self.stages.first.element()
            }

            /// The processing mode for the copy stages.
            pub fn mode(&self) -> ProcessingMode {
                self.stages.first.mode()
            }
        }

        impl Default for $name {
            /// 3x3 element, every cell active.
            fn default() -> Self {
                Self::new(StructuringElement::default())
            }
        }

        impl MorphFilter for $name {
            fn apply(&self, src: &dyn Surface) -> MorphResult<rastermorph_core::Bitmap> {
                self.stages.apply(src)
            }

            fn apply_to(&self, src: &dyn Surface, dst: &mut dyn SurfaceMut) -> MorphResult<()> {
                self.stages.apply_to(src, dst)
            }

            fn apply_in_place(&self, surface: &mut dyn SurfaceMut) -> MorphResult<()> {
                self.stages.apply_in_place(surface)
            }

            fn apply_in_place_region(
                &self,
                surface: &mut dyn SurfaceMut,
                region: Region,
            ) -> MorphResult<()> {
                self.stages.apply_in_place_region(surface, region)
            }
        }
    };
}

composite_filter!(
    /// Closing: dilation followed by erosion
    Closing,
    "close",
    MorphOp::Dilate
);

composite_filter!(
    /// Opening: erosion followed by dilation
    Opening,
    "open",
    MorphOp::Erode
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dilation, Erosion, MorphError};
    use rastermorph_core::{BitmapMut, PixelFormat};

    fn speckled() -> BitmapMut {
        let mut pix = BitmapMut::new(9, 9, PixelFormat::Gray8).unwrap();
        pix.fill(50).unwrap();
        // Bright speck, dark hole inside a bright block
        pix.set_sample(1, 1, 0, 250).unwrap();
        for y in 4..9 {
            for x in 4..9 {
                pix.set_sample(x, y, 0, 200).unwrap();
            }
        }
        pix.set_sample(6, 6, 0, 10).unwrap();
        pix
    }

    #[test]
    fn test_opening_removes_speck() {
        let opened = Opening::default().apply(&speckled()).unwrap();
        assert_eq!(opened.sample(1, 1, 0), Some(50));
        assert_eq!(opened.sample(8, 8, 0), Some(200));
    }

    #[test]
    fn test_closing_fills_hole() {
        let closed = Closing::default().apply(&speckled()).unwrap();
        assert_eq!(closed.sample(6, 6, 0), Some(200));
        assert_eq!(closed.sample(0, 8, 0), Some(50));
    }

    #[test]
    fn test_closing_composes() {
        let pix = speckled();
        let se = StructuringElement::cross(3).unwrap();
        let dilated = Dilation::new(se.clone()).apply(&pix).unwrap();
        let expected = Erosion::new(se.clone()).apply(&dilated).unwrap();
        let closed = Closing::new(se).apply(&pix).unwrap();
        assert!(closed.equals(&expected));
    }

    #[test]
    fn test_in_place_and_apply_to_match_apply() {
        let se = StructuringElement::diamond(1).unwrap();
        let opening = Opening::new(se);
        let expected = opening.apply(&speckled()).unwrap();

        let mut pix = speckled();
        opening.apply_in_place(&mut pix).unwrap();
        assert!(expected.equals(&pix));

        let mut dst = BitmapMut::new(9, 9, PixelFormat::Gray8).unwrap();
        opening.apply_to(&speckled(), &mut dst).unwrap();
        assert!(expected.equals(&dst));
    }

    #[test]
    fn test_validation_before_work() {
        let pix = speckled();
        let mut dst = BitmapMut::new(9, 9, PixelFormat::Rgb24).unwrap();
        assert!(matches!(
            Closing::default().apply_to(&pix, &mut dst),
            Err(MorphError::PixelFormatMismatch { .. })
        ));
        assert!(dst.bytes().iter().all(|&b| b == 0));
    }
}
