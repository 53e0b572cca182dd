// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// flatscan-document — Turns a photographed page into a flat, axis-aligned
// page image.
//
// Provides a small Gaussian-elimination solver and affine estimation
// (geometry), clipped and transformed compositing onto an RGBA canvas
// (raster), and the scanning pipeline (default corners, two-triangle quad
// rectification, contrast/brightness enhancement, batch scanning).

pub mod geometry;
pub mod raster;
pub mod scan;

/// 8-bit RGBA, row-major, 4 bytes per pixel.
pub type RasterImage = image::RgbaImage;

// Re-export the primary entry points so callers can use `flatscan_document::rectify` etc.
pub use geometry::{AffineCoefficients, AffineEstimate, estimate_affine};
pub use raster::{Canvas, warp_triangle};
pub use scan::{
    DocumentScanner, Rectification, ScanJob, default_corners, enhance, rectify, rectify_detailed,
    scan_batch,
};
