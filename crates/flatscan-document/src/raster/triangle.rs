// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Triangle rasterizer — warps one source triangle onto one destination
// triangle of a canvas.

use flatscan_core::Point;
use image::RgbaImage;
use tracing::{debug, warn};

use super::canvas::Canvas;
use crate::geometry::{AffineEstimate, estimate_affine};

/// Composite the part of `source` under `src_tri` into `dst_tri` on `canvas`.
///
/// Only pixels inside the destination triangle are written. The canvas clip
/// and transform are the same after the call as before it.
///
/// When the affine fit is degenerate (collinear or coincident vertices) the
/// source is drawn untransformed inside the triangle instead.
pub fn warp_triangle(
    canvas: &mut Canvas,
    source: &RgbaImage,
    src_tri: [Point; 3],
    dst_tri: [Point; 3],
) -> AffineEstimate {
    let estimate = estimate_affine(src_tri, dst_tri);

    let mut scoped = canvas.save();
    scoped.clip_polygon(&dst_tri);

    match estimate {
        AffineEstimate::Solved(coefficients) => {
            debug!(?coefficients, "Triangle affine solved");
            scoped.set_transform(coefficients);
        }
        AffineEstimate::Degenerate(coefficients) => {
            warn!(
                ?src_tri,
                ?dst_tri,
                ?coefficients,
                "Degenerate triangle; drawing source untransformed"
            );
        }
    }

    scoped.draw_image(source);
    estimate
}
