// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan pipeline — default corners, rectification and enhancement in one call.

use flatscan_core::{Corners, Result, ScanConfig};
use image::RgbaImage;
use tracing::{debug, info, instrument};

use super::corners::default_corners;
use super::enhance::enhance;
use super::rectify::rectify;

/// Turns photographed pages into flat, enhanced page images.
///
/// Holds a validated [`ScanConfig`]; every call works on caller-owned input
/// and returns a freshly allocated image, so one scanner can be shared
/// across threads.
///
/// ```ignore
/// let scanner = DocumentScanner::new(ScanConfig::default())?;
/// let page = scanner.scan(&photo, Some(&corners));
/// ```
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self {
            config: ScanConfig::default(),
        }
    }
}

impl DocumentScanner {
    /// Create a scanner, rejecting invalid sizes or options up front.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Corners used when the caller has no estimate for `source`.
    pub fn fallback_corners(&self, source: &RgbaImage) -> Corners {
        default_corners(source.width(), source.height(), self.config.corner_padding)
    }

    /// Rectify (and, if configured, enhance) the page bounded by `corners`.
    ///
    /// With `corners = None` the page is assumed to sit inside the configured
    /// inset of the whole photo.
    #[instrument(skip_all, fields(src_w = source.width(), src_h = source.height()))]
    pub fn scan(&self, source: &RgbaImage, corners: Option<&Corners>) -> RgbaImage {
        let corners = match corners {
            Some(c) => *c,
            None => {
                let c = self.fallback_corners(source);
                debug!(?c, "No corners supplied; using inset defaults");
                c
            }
        };

        let page = rectify(source, &corners, self.config.output);
        let page = if self.config.enhance {
            enhance(page, &self.config.enhancement)
        } else {
            page
        };

        info!(
            out_w = page.width(),
            out_h = page.height(),
            enhanced = self.config.enhance,
            "Page scanned"
        );
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatscan_core::{EnhancementOptions, FlatscanError, OutputSize, Point};
    use image::Rgba;

    fn small_config() -> ScanConfig {
        ScanConfig {
            output: OutputSize {
                width: 60,
                height: 80,
            },
            ..ScanConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ScanConfig {
            output: OutputSize {
                width: 0,
                height: 80,
            },
            ..ScanConfig::default()
        };
        assert!(matches!(
            DocumentScanner::new(config),
            Err(FlatscanError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn scan_without_corners_uses_inset() {
        let scanner = DocumentScanner::new(small_config()).unwrap();
        let source = RgbaImage::from_pixel(100, 100, Rgba([90, 90, 90, 255]));

        let fallback = scanner.fallback_corners(&source);
        assert_eq!(fallback.top_left, Point::new(10.0, 10.0));
        assert_eq!(fallback.bottom_right, Point::new(90.0, 90.0));

        let page = scanner.scan(&source, None);
        assert_eq!(page.dimensions(), (60, 80));
    }

    #[test]
    fn enhancement_toggle() {
        let source = RgbaImage::from_pixel(100, 100, Rgba([200, 200, 200, 255]));
        let corners = Corners::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
        );

        let plain = DocumentScanner::new(ScanConfig {
            enhance: false,
            ..small_config()
        })
        .unwrap()
        .scan(&source, Some(&corners));
        let boosted = DocumentScanner::new(small_config())
            .unwrap()
            .scan(&source, Some(&corners));

        let before = plain.get_pixel(30, 40).0[0];
        let after = boosted.get_pixel(30, 40).0[0];
        assert!((before as i16 - 200).abs() <= 2, "got {before}");
        assert!((after as i16 - 225).abs() <= 2, "got {after}");
    }

    #[test]
    fn identity_enhancement_matches_plain() {
        let source = RgbaImage::from_fn(50, 50, |x, y| Rgba([x as u8 * 5, y as u8 * 5, 7, 255]));
        let with_identity = DocumentScanner::new(ScanConfig {
            enhancement: EnhancementOptions::IDENTITY,
            ..small_config()
        })
        .unwrap()
        .scan(&source, None);
        let without = DocumentScanner::new(ScanConfig {
            enhance: false,
            ..small_config()
        })
        .unwrap()
        .scan(&source, None);
        assert_eq!(with_identity, without);
    }
}
