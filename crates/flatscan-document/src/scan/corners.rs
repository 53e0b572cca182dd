// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Default corner placement when nothing better is known.

use flatscan_core::{Corners, Point};

pub use flatscan_core::DEFAULT_CORNER_PADDING;

/// Corners of the rectangle inset by `width * padding` horizontally and
/// `height * padding` vertically from each image edge.
pub fn default_corners(width: u32, height: u32, padding: f64) -> Corners {
    let (w, h) = (width as f64, height as f64);
    let pad_x = w * padding;
    let pad_y = h * padding;
    Corners {
        top_left: Point::new(pad_x, pad_y),
        top_right: Point::new(w - pad_x, pad_y),
        bottom_left: Point::new(pad_x, h - pad_y),
        bottom_right: Point::new(w - pad_x, h - pad_y),
    }
}
