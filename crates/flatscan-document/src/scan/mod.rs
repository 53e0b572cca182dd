// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — default corners, quad rectification, enhancement,
// and batch scanning.

pub mod batch;
pub mod corners;
pub mod enhance;
pub mod rectify;
pub mod scanner;

pub use batch::{ScanJob, scan_batch};
pub use corners::{DEFAULT_CORNER_PADDING, default_corners};
pub use enhance::{enhance, enhance_channel};
pub use rectify::{Rectification, rectify, rectify_detailed};
pub use scanner::DocumentScanner;
