//! Closing / opening and residue regression test
//!
//! Tests idempotence of closing and opening (identity element, binary
//! checkerboards with symmetric elements), the spot scenario for closing,
//! and the top-hat, bottom-hat and gradient residues.
//!
//! Run with:
//! ```
//! cargo test -p rastermorph-morph --test composite_reg
//! ```

use rastermorph_core::{PixelFormat, Surface};
use rastermorph_morph::{
    BottomHat, Closing, Dilation, Erosion, Gradient, MorphFilter, Opening, StructuringElement,
    TopHat,
};
use rastermorph_test::{RegParams, synthetic};

#[test]
fn composite_reg() {
    let mut rp = RegParams::new("composite");

    // 1x1 element: every filter is the identity, so repetition changes nothing
    let identity = StructuringElement::square(1).expect("identity");
    for format in [PixelFormat::Gray8, PixelFormat::Rgb48] {
        let pixs = synthetic::pattern(15, 10, format, 9).expect("pattern");
        let closing = Closing::new(identity.clone());
        let once = closing.apply(&pixs).expect("close");
        let twice = closing.apply(&once).expect("close twice");
        rp.compare_surfaces(&pixs, &once);
        rp.compare_surfaces(&once, &twice);
    }

    // Binary checkerboards under symmetric elements
    let elements = [
        StructuringElement::square(3).expect("square"),
        StructuringElement::cross(3).expect("cross"),
        StructuringElement::diamond(2).expect("diamond"),
        StructuringElement::disk(1).expect("disk"),
    ];
    for block in [1, 2, 3, 5] {
        let board =
            synthetic::checkerboard(20, 20, PixelFormat::Gray8, block, 0, 255).expect("board");
        for se in &elements {
            let closing = Closing::new(se.clone());
            let once = closing.apply(&board).expect("close");
            let twice = closing.apply(&once).expect("close twice");
            rp.compare_surfaces(&once, &twice);

            let opening = Opening::new(se.clone());
            let once = opening.apply(&board).expect("open");
            let twice = opening.apply(&once).expect("open twice");
            rp.compare_surfaces(&once, &twice);
        }
    }

    assert!(rp.cleanup());
}

/// Closing the 5x5 spot is the erosion of its dilation.
#[test]
fn composite_reg_spot() {
    let mut rp = RegParams::new("composite_spot");
    let pixs = synthetic::spot(5, 5, PixelFormat::Gray8, (2, 2), 100, 200).expect("spot");
    let se = StructuringElement::default();

    let dilated = Dilation::new(se.clone()).apply(&pixs).expect("dilate");
    let expected = Erosion::new(se.clone()).apply(&dilated).expect("erode");
    let closed = Closing::new(se.clone()).apply(&pixs).expect("close");
    rp.compare_surfaces(&expected, &closed);
    rp.compare_values(200.0, closed.sample(2, 2, 0).unwrap_or(0) as f64, 0.0);
    rp.compare_values(100.0, closed.sample(1, 2, 0).unwrap_or(0) as f64, 0.0);

    // Opening removes the spot entirely
    let opened = Opening::new(se).apply(&pixs).expect("open");
    let flat = synthetic::from_gray8(5, 5, &[100; 25]).expect("flat");
    rp.compare_surfaces(&flat, &opened);

    assert!(rp.cleanup());
}

/// Residues are the differences of their constituents.
#[test]
fn composite_reg_residues() {
    let mut rp = RegParams::new("composite_residues");
    let se = StructuringElement::disk(2).expect("disk");

    for format in [PixelFormat::Gray8, PixelFormat::Gray16, PixelFormat::Rgb24] {
        let pixs = synthetic::pattern(17, 13, format, 23).expect("pattern");
        let opened = Opening::new(se.clone()).apply(&pixs).expect("open");
        let closed = Closing::new(se.clone()).apply(&pixs).expect("close");
        let dilated = Dilation::new(se.clone()).apply(&pixs).expect("dilate");
        let eroded = Erosion::new(se.clone()).apply(&pixs).expect("erode");

        let tophat = TopHat::new(se.clone()).apply(&pixs).expect("tophat");
        let bottomhat = BottomHat::new(se.clone()).apply(&pixs).expect("bottomhat");
        let gradient = Gradient::new(se.clone()).apply(&pixs).expect("gradient");

        let diff = |a: &dyn Surface, b: &dyn Surface, x, y, c| {
            a.sample(x, y, c)
                .unwrap_or(0)
                .saturating_sub(b.sample(x, y, c).unwrap_or(0))
        };
        let mut ok = [true; 3];
        for y in 0..pixs.height() {
            for x in 0..pixs.width() {
                for c in 0..format.channels() {
                    ok[0] &= tophat.sample(x, y, c) == Some(diff(&pixs, &opened, x, y, c));
                    ok[1] &= bottomhat.sample(x, y, c) == Some(diff(&closed, &pixs, x, y, c));
                    ok[2] &= gradient.sample(x, y, c) == Some(diff(&dilated, &eroded, x, y, c));
                }
            }
        }
        for passed in ok {
            rp.compare_values(1.0, if passed { 1.0 } else { 0.0 }, 0.0);
        }
    }

    // In place matches copy
    let pixs = synthetic::gradient(12, 9, PixelFormat::Rgba32).expect("gradient");
    let filters: [Box<dyn MorphFilter>; 3] = [
        Box::new(TopHat::default()),
        Box::new(BottomHat::default()),
        Box::new(Gradient::default()),
    ];
    for filter in &filters {
        let expected = filter.apply(&pixs).expect("apply");
        let mut pix = pixs.to_mut();
        filter.apply_in_place(&mut pix).expect("in place");
        rp.compare_surfaces(&expected, &pix);
    }

    assert!(rp.cleanup());
}
