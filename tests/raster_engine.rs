//! Raster transforms through the public API.

use xform_engine::geom::Axis;
use xform_engine::raster::{self, Affine2, BorderMode, Interpolation, Raster};
use xform_engine::TransformError;

/// A 12x8 RGB test card with distinct corners.
fn test_card() -> Raster {
    Raster::from_fn(12, 8, |x, y| {
        let r = (x * 255 / 11) as u8;
        let g = (y * 255 / 7) as u8;
        let b = if (x / 3 + y / 2) % 2 == 0 { 220 } else { 30 };
        [r, g, b]
    })
    .expect("test card")
}

#[test]
fn reflect_twice_is_byte_identical() {
    let card = test_card();
    for axis in [Axis::X, Axis::Y] {
        let once = raster::reflect(&card, axis).unwrap();
        assert_ne!(once, card);
        let twice = raster::reflect(&once, axis).unwrap();
        assert_eq!(twice.as_bytes(), card.as_bytes());
    }
}

#[test]
fn reflect_is_a_pixel_permutation() {
    let card = test_card();
    let flipped = raster::reflect(&card, Axis::Y).unwrap();
    let mut before: Vec<&[u8]> = card.as_bytes().chunks(3).collect();
    let mut after: Vec<&[u8]> = flipped.as_bytes().chunks(3).collect();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);
}

#[test]
fn rotate_zero_returns_input() {
    let card = test_card();
    let rotated = raster::rotate(&card, 0.0).unwrap();
    assert_eq!((rotated.width(), rotated.height()), (card.width(), card.height()));
    assert_eq!(rotated, card);
}

#[test]
fn rotate_keeps_canvas_size_and_replicates_border() {
    let card = Raster::filled(10, 6, 1, 77).unwrap();
    let rotated = raster::rotate(&card, 33.0).unwrap();
    assert_eq!((rotated.width(), rotated.height()), (10, 6));
    // A uniform image stays uniform: corners replicate the edge, no black fill.
    assert!(rotated.as_bytes().iter().all(|&v| v == 77));
}

#[test]
fn rotate_half_turn_square_swaps_opposite_pixels() {
    let src = Raster::from_fn(4, 4, |x, y| [(y * 4 + x) as u8 * 10]).unwrap();
    // Center (2, 2): pixel (1, 1) maps to (3, 3).
    let out = raster::rotate(&src, 180.0).unwrap();
    assert_eq!(out.pixel(3, 3), src.pixel(1, 1));
    assert_eq!(out.pixel(2, 2), src.pixel(2, 2));
}

#[test]
fn scale_output_size_is_rounded_product() {
    let card = test_card();
    let up = raster::scale(&card, 2.0, 0.5).unwrap();
    assert_eq!((up.width(), up.height()), (24, 4));
    let odd = raster::scale(&card, 0.3, 1.1).unwrap();
    assert_eq!((odd.width(), odd.height()), (4, 9));
    assert_eq!(odd.channels(), 3);
}

#[test]
fn scale_by_one_is_identity() {
    let card = test_card();
    assert_eq!(raster::scale(&card, 1.0, 1.0).unwrap(), card);
}

#[test]
fn shear_keeps_size_and_fixes_first_row() {
    let card = test_card();
    let sheared = raster::shear(&card, 0.5, Axis::X).unwrap();
    assert_eq!((sheared.width(), sheared.height()), (12, 8));
    for x in 0..12 {
        assert_eq!(sheared.pixel(x, 0), card.pixel(x, 0));
    }
}

#[test]
fn shear_y_fixes_first_column() {
    let card = test_card();
    let sheared = raster::shear(&card, 0.25, Axis::Y).unwrap();
    for y in 0..8 {
        assert_eq!(sheared.pixel(0, y), card.pixel(0, y));
    }
}

#[test]
fn invalid_axis_produces_no_output() {
    let card = test_card();
    assert!(matches!(
        raster::shear(&card, 0.5, Axis::Z),
        Err(TransformError::InvalidAxis { .. })
    ));
    assert!(matches!(
        raster::reflect_token(&card, "w"),
        Err(TransformError::InvalidAxis { .. })
    ));
}

#[test]
fn demo_chains_commute_in_size_only() {
    let card = test_card();
    let a = raster::shear(&card, 0.5, Axis::X).unwrap();
    let a = raster::reflect(&a, Axis::Y).unwrap();
    let a = raster::rotate(&a, 90.0).unwrap();

    let b = raster::rotate(&card, 90.0).unwrap();
    let b = raster::reflect(&b, Axis::Y).unwrap();
    let b = raster::shear(&b, 0.5, Axis::X).unwrap();

    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    assert_ne!(a, b);
}

#[test]
fn warp_affine_matches_rotate() {
    let card = test_card();
    let m = Affine2::rotation_about([6.0, 4.0], 20.0, 1.0);
    let direct = raster::warp_affine(&card, &m, 12, 8, Interpolation::Bilinear, BorderMode::Replicate)
        .unwrap();
    assert_eq!(direct, raster::rotate(&card, 20.0).unwrap());
}
