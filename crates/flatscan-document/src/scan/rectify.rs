// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quad rectification — maps the document quadrilateral onto an axis-aligned
// page using two affine triangles.
//
// The two halves meet on the top-left → bottom-right diagonal. A real
// perspective warp is not affine, so under strong perspective the halves
// disagree slightly near that diagonal and a seam can show. For near-planar
// page photos the error is small.

use flatscan_core::{Corners, OutputSize, Point};
use image::RgbaImage;
use tracing::{debug, info, instrument, warn};

use crate::geometry::AffineEstimate;
use crate::raster::{Canvas, warp_triangle};

/// Rectified page plus the affine fit used for each half.
#[derive(Debug)]
pub struct Rectification {
    pub image: RgbaImage,
    /// Triangle `(top_left, top_right, bottom_right)`.
    pub upper: AffineEstimate,
    /// Triangle `(top_left, bottom_right, bottom_left)`.
    pub lower: AffineEstimate,
}

/// Straighten the quad bounded by `corners` into a fresh `size` image.
///
/// The output is always exactly `size.width x size.height`. Dimensions are
/// assumed valid; see [`OutputSize::new`] for host-side validation.
pub fn rectify(source: &RgbaImage, corners: &Corners, size: OutputSize) -> RgbaImage {
    rectify_detailed(source, corners, size).image
}

/// Like [`rectify`] but also returns the per-triangle affine estimates.
#[instrument(
    skip(source, corners),
    fields(src_w = source.width(), src_h = source.height(), out_w = size.width, out_h = size.height)
)]
pub fn rectify_detailed(source: &RgbaImage, corners: &Corners, size: OutputSize) -> Rectification {
    if !corners.is_convex() || corners.signed_area() <= 0.0 {
        warn!(
            ?corners,
            signed_area = corners.signed_area(),
            "Corners are not a clockwise convex quad; output may be folded or blank"
        );
    }

    let [src_tl, src_tr, src_br, src_bl] = corners.clockwise();
    let (w, h) = (size.width as f64, size.height as f64);
    let dst_tl = Point::new(0.0, 0.0);
    let dst_tr = Point::new(w, 0.0);
    let dst_br = Point::new(w, h);
    let dst_bl = Point::new(0.0, h);

    let mut canvas = Canvas::new(size.width, size.height);

    let upper = warp_triangle(
        &mut canvas,
        source,
        [src_tl, src_tr, src_br],
        [dst_tl, dst_tr, dst_br],
    );
    debug!(degenerate = upper.is_degenerate(), "Upper triangle drawn");

    let lower = warp_triangle(
        &mut canvas,
        source,
        [src_tl, src_br, src_bl],
        [dst_tl, dst_br, dst_bl],
    );
    debug!(degenerate = lower.is_degenerate(), "Lower triangle drawn");

    info!("Quad rectified");
    Rectification {
        image: canvas.into_image(),
        upper,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::enhance::enhance;
    use flatscan_core::EnhancementOptions;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn size(width: u32, height: u32) -> OutputSize {
        OutputSize { width, height }
    }

    fn photo_corners() -> Corners {
        Corners::new(
            p(100.0, 150.0),
            p(1900.0, 180.0),
            p(90.0, 2850.0),
            p(1920.0, 2800.0),
        )
    }

    /// White page with a coloured 60x60 marker centred on each corner.
    fn marked_photo(corners: &Corners) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(2000, 3000, WHITE);
        for (corner, colour) in [
            (corners.top_left, RED),
            (corners.top_right, GREEN),
            (corners.bottom_left, BLUE),
            (corners.bottom_right, YELLOW),
        ] {
            let (cx, cy) = (corner.x as u32, corner.y as u32);
            for y in cy - 30..cy + 30 {
                for x in cx - 30..cx + 30 {
                    img.put_pixel(x, y, colour);
                }
            }
        }
        img
    }

    /// Bilinear weights are f32, so uniform regions can come back one off.
    fn assert_rgba_near(actual: Rgba<u8>, expected: Rgba<u8>) {
        let close = actual
            .0
            .iter()
            .zip(expected.0.iter())
            .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 2);
        assert!(close, "expected {expected:?}, got {actual:?}");
    }

    fn assert_maps_back(estimate: &AffineEstimate, dst: Point, expected: Point) {
        let inverse = estimate
            .coefficients()
            .inverse()
            .expect("non-degenerate triangle must be invertible");
        let back = inverse.apply(dst);
        assert!(
            back.distance(&expected) <= 1.0,
            "{dst:?} mapped back to {back:?}, expected {expected:?}"
        );
    }

    #[test]
    fn photo_scenario_corners_round_trip() {
        let corners = photo_corners();
        let source = marked_photo(&corners);
        let result = rectify_detailed(&source, &corners, size(1200, 1600));

        assert_eq!(result.image.dimensions(), (1200, 1600));
        assert!(!result.upper.is_degenerate());
        assert!(!result.lower.is_degenerate());

        assert_maps_back(&result.upper, p(0.0, 0.0), corners.top_left);
        assert_maps_back(&result.upper, p(1200.0, 0.0), corners.top_right);
        assert_maps_back(&result.upper, p(1200.0, 1600.0), corners.bottom_right);
        assert_maps_back(&result.lower, p(0.0, 0.0), corners.top_left);
        assert_maps_back(&result.lower, p(1200.0, 1600.0), corners.bottom_right);
        assert_maps_back(&result.lower, p(0.0, 1600.0), corners.bottom_left);

        // Pixels next to each output corner come from that corner's marker.
        let out = &result.image;
        assert_rgba_near(*out.get_pixel(2, 2), RED);
        assert_rgba_near(*out.get_pixel(1197, 2), GREEN);
        assert_rgba_near(*out.get_pixel(2, 1597), BLUE);
        assert_rgba_near(*out.get_pixel(1197, 1597), YELLOW);
        // Page interior.
        assert_rgba_near(*out.get_pixel(600, 800), WHITE);
    }

    #[test]
    fn photo_scenario_then_default_enhancement() {
        let corners = photo_corners();
        let source = marked_photo(&corners);
        let rectified = rectify(&source, &corners, OutputSize::default());
        let enhanced = enhance(rectified, &EnhancementOptions::default());

        assert_eq!(enhanced.dimensions(), (1200, 1600));
        // White stays saturated, red keeps its zeroed channels at 0.
        assert_rgba_near(*enhanced.get_pixel(600, 800), WHITE);
        assert_rgba_near(*enhanced.get_pixel(2, 2), RED);
    }

    fn full_frame(source: &RgbaImage) -> Corners {
        let (w, h) = (source.width() as f64, source.height() as f64);
        Corners::new(p(0.0, 0.0), p(w, 0.0), p(0.0, h), p(w, h))
    }

    #[test]
    fn output_size_is_independent_of_source() {
        let grey = Rgba([200, 200, 200, 255]);
        for (src_w, src_h) in [(64, 80), (300, 20), (1, 1)] {
            let source = RgbaImage::from_pixel(src_w, src_h, grey);
            let corners = full_frame(&source);
            for (w, h) in [(1, 1), (17, 9), (120, 160), (300, 40)] {
                let out = rectify(&source, &corners, size(w, h));
                assert_eq!(out.dimensions(), (w, h), "source {src_w}x{src_h}");
                for (x, y, px) in out.enumerate_pixels() {
                    assert!(px.0[3] != 0, "{src_w}x{src_h} -> {w}x{h}: ({x},{y}) unpainted");
                    assert_rgba_near(*px, grey);
                }
            }
        }
    }

    #[test]
    fn full_frame_corners_paint_every_pixel() {
        let source = RgbaImage::from_pixel(40, 40, Rgba([200, 200, 200, 255]));
        let out = rectify(&source, &full_frame(&source), size(40, 40));

        let unpainted = out.pixels().filter(|px| px.0[3] == 0).count();
        assert_eq!(unpainted, 0);
        // Last column and row come from the source's last column and row.
        assert_rgba_near(*out.get_pixel(39, 20), Rgba([200, 200, 200, 255]));
        assert_rgba_near(*out.get_pixel(20, 39), Rgba([200, 200, 200, 255]));
        assert_rgba_near(*out.get_pixel(39, 39), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn corners_off_the_source_leave_pixels_transparent() {
        // Right half of the quad lies beyond the source.
        let source = RgbaImage::from_pixel(20, 20, WHITE);
        let corners = Corners::new(p(0.0, 0.0), p(40.0, 0.0), p(0.0, 20.0), p(40.0, 20.0));
        let out = rectify(&source, &corners, size(40, 20));

        assert_rgba_near(*out.get_pixel(5, 10), WHITE);
        assert_rgba_near(*out.get_pixel(19, 10), WHITE);
        assert_eq!(out.get_pixel(30, 10).0[3], 0);
    }

    #[test]
    fn identical_corners_do_not_panic() {
        let source = RgbaImage::from_pixel(50, 50, WHITE);
        let q = p(10.0, 10.0);
        let result = rectify_detailed(&source, &Corners::new(q, q, q, q), size(40, 30));

        assert_eq!(result.image.dimensions(), (40, 30));
        assert_eq!(result.image.as_raw().len(), 40 * 30 * 4);
        assert!(result.upper.is_degenerate());
        assert!(result.lower.is_degenerate());
    }

    #[test]
    fn collinear_corners_do_not_panic() {
        let source = RgbaImage::from_pixel(50, 50, WHITE);
        let corners = Corners::new(p(0.0, 0.0), p(10.0, 10.0), p(20.0, 20.0), p(30.0, 30.0));
        let out = rectify(&source, &corners, size(20, 20));
        assert_eq!(out.dimensions(), (20, 20));
    }

    #[test]
    fn bowtie_corners_do_not_panic() {
        let source = RgbaImage::from_pixel(50, 50, WHITE);
        let corners = Corners::new(p(5.0, 5.0), p(45.0, 5.0), p(45.0, 45.0), p(5.0, 45.0));
        let out = rectify(&source, &corners, size(25, 25));
        assert_eq!(out.dimensions(), (25, 25));
    }

    #[test]
    fn full_frame_corners_reproduce_source() {
        let source = RgbaImage::from_fn(40, 40, |x, y| match (x < 20, y < 20) {
            (true, true) => RED,
            (false, true) => GREEN,
            (true, false) => BLUE,
            (false, false) => YELLOW,
        });
        let corners = Corners::new(p(0.0, 0.0), p(40.0, 0.0), p(0.0, 40.0), p(40.0, 40.0));
        let out = rectify(&source, &corners, size(40, 40));

        assert_rgba_near(*out.get_pixel(5, 5), RED);
        assert_rgba_near(*out.get_pixel(30, 5), GREEN);
        assert_rgba_near(*out.get_pixel(5, 30), BLUE);
        assert_rgba_near(*out.get_pixel(30, 30), YELLOW);
    }

    #[test]
    fn downscales_to_half_size() {
        let source = RgbaImage::from_fn(80, 80, |x, _| if x < 40 { RED } else { BLUE });
        let corners = Corners::new(p(0.0, 0.0), p(80.0, 0.0), p(0.0, 80.0), p(80.0, 80.0));
        let out = rectify(&source, &corners, size(40, 40));

        assert_rgba_near(*out.get_pixel(5, 20), RED);
        assert_rgba_near(*out.get_pixel(35, 20), BLUE);
    }
}
