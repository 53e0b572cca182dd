// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Flatscan rectifier.

use serde::{Deserialize, Serialize};

use crate::error::{FlatscanError, Result};

/// Default rectified page width in pixels.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 1200;
/// Default rectified page height in pixels.
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 1600;
/// Default contrast factor applied around mid-gray.
pub const DEFAULT_CONTRAST: f64 = 1.2;
/// Default multiplicative brightness factor.
pub const DEFAULT_BRIGHTNESS: f64 = 1.05;

/// A 2D coordinate in source-image or destination-canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The four corners of the document quadrilateral in the source image.
///
/// Corners are expected in their natural page positions, so that walking
/// top-left, top-right, bottom-right, bottom-left traces the page clockwise
/// on screen. Inconsistent input is processed as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl Corners {
    pub fn new(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Corners as `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn clockwise(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Shoelace area over the clockwise ordering.
    ///
    /// Image space is y-down, so a correctly ordered page yields a positive
    /// value. Negative means the corners wind the other way.
    pub fn signed_area(&self) -> f64 {
        let pts = self.clockwise();
        let mut twice_area = 0.0;
        for i in 0..pts.len() {
            let j = (i + 1) % pts.len();
            twice_area += pts[i].x * pts[j].y - pts[j].x * pts[i].y;
        }
        twice_area / 2.0
    }

    /// True when the clockwise ordering forms a strictly convex quad.
    ///
    /// Self-intersecting ("bow-tie") and collapsed quads return `false`.
    pub fn is_convex(&self) -> bool {
        let pts = self.clockwise();
        let mut sign = 0.0f64;
        for i in 0..4 {
            let a = pts[i];
            let b = pts[(i + 1) % 4];
            let c = pts[(i + 2) % 4];
            let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
            if cross == 0.0 || !cross.is_finite() {
                return false;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}

/// Linear contrast/brightness settings for the enhancer.
///
/// `contrast` scales each channel's deviation from mid-gray (128), then
/// `brightness` scales the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhancementOptions {
    #[serde(default = "default_contrast")]
    pub contrast: f64,
    #[serde(default = "default_brightness")]
    pub brightness: f64,
}

fn default_contrast() -> f64 {
    DEFAULT_CONTRAST
}

fn default_brightness() -> f64 {
    DEFAULT_BRIGHTNESS
}

impl Default for EnhancementOptions {
    fn default() -> Self {
        Self {
            contrast: DEFAULT_CONTRAST,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl EnhancementOptions {
    /// The no-op setting.
    pub const IDENTITY: Self = Self {
        contrast: 1.0,
        brightness: 1.0,
    };

    /// Reject factors that are negative or not finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("contrast", self.contrast), ("brightness", self.brightness)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FlatscanError::InvalidOption(format!(
                    "{name} must be a finite, non-negative factor (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// Pixel dimensions of the rectified page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl Default for OutputSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
        }
    }
}

impl OutputSize {
    /// Validated constructor; both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FlatscanError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Size of a portrait page of `paper` rendered at `dpi`.
    pub fn for_paper(paper: PaperSize, dpi: f64) -> Result<Self> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(FlatscanError::InvalidOption(format!(
                "dpi must be positive (got {dpi})"
            )));
        }
        let (w_mm, h_mm) = paper.dimensions_mm();
        let width = (w_mm as f64 * dpi / 25.4).round() as u32;
        let height = (h_mm as f64 * dpi / 25.4).round() as u32;
        Self::new(width, height)
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}
