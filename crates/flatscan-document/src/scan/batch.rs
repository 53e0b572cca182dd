// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch scanning across the rayon thread pool.

use flatscan_core::Corners;
use image::RgbaImage;
use rayon::prelude::*;
use tracing::{info, instrument};

use super::scanner::DocumentScanner;

/// One photographed page and, optionally, where its corners are.
#[derive(Debug, Clone)]
pub struct ScanJob {
    pub source: RgbaImage,
    pub corners: Option<Corners>,
}

impl ScanJob {
    pub fn new(source: RgbaImage, corners: Option<Corners>) -> Self {
        Self { source, corners }
    }
}

/// Scan every job in parallel. Results keep the order of `jobs`.
///
/// Jobs share nothing but the scanner's configuration; each reads only its
/// own source image.
#[instrument(skip_all, fields(jobs = jobs.len()))]
pub fn scan_batch(scanner: &DocumentScanner, jobs: &[ScanJob]) -> Vec<RgbaImage> {
    let pages: Vec<RgbaImage> = jobs
        .par_iter()
        .map(|job| scanner.scan(&job.source, job.corners.as_ref()))
        .collect();
    info!(pages = pages.len(), "Batch scanned");
    pages
}
