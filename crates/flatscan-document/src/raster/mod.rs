// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — clipped, transformed compositing onto an RGBA canvas.

pub mod canvas;
pub mod triangle;

pub use canvas::{Canvas, CanvasGuard};
pub use triangle::warp_triangle;
