// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing canvas with a save/restore stack for clip and transform state.
//
// `Canvas::save` hands out a `CanvasGuard`; whatever clip or transform is set
// through the guard is rolled back when it drops, including on early return.

use std::ops::{Deref, DerefMut};

use flatscan_core::Point;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::geometric_transformations::{Interpolation, warp_into_with};
use imageproc::point::Point as PixelPoint;
use tracing::{debug, warn};

use crate::geometry::AffineCoefficients;

/// Clip vertices are clamped to this magnitude before scan conversion so
/// edge arithmetic stays inside `i32`.
const CLIP_COORD_LIMIT: f64 = (1 << 20) as f64;

/// Sample points this far below zero still count as inside the source, so
/// rounding in the inverse map does not drop the first row or column.
const SAMPLE_SLACK: f64 = 1e-6;

/// Any sample point with a negative coordinate falls back to transparent.
const OUTSIDE: (f32, f32) = (-1.0, -1.0);

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const INSIDE: Luma<u8> = Luma([255]);

#[derive(Debug, Clone)]
struct DrawState {
    /// `None` means unclipped; otherwise non-zero mask pixels are writable.
    clip: Option<GrayImage>,
    /// Maps source image coordinates onto the canvas.
    transform: AffineCoefficients,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            clip: None,
            transform: AffineCoefficients::identity(),
        }
    }
}

/// An RGBA drawing surface with clip and transform state.
#[derive(Debug)]
pub struct Canvas {
    surface: RgbaImage,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    /// Draw on top of an existing image.
    pub fn from_image(surface: RgbaImage) -> Self {
        Self {
            surface,
            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn transform(&self) -> AffineCoefficients {
        self.state.transform
    }

    pub fn is_clipped(&self) -> bool {
        self.state.clip.is_some()
    }

    /// Number of states currently saved.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Whether drawing at `(x, y)` would reach the surface.
    pub fn is_writable(&self, x: u32, y: u32) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        match &self.state.clip {
            Some(mask) => mask.get_pixel(x, y).0[0] != 0,
            None => true,
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn into_image(self) -> RgbaImage {
        self.surface
    }

    // -- State stack ----------------------------------------------------------

    /// Push the current clip and transform; they come back when the returned
    /// guard is dropped.
    pub fn save(&mut self) -> CanvasGuard<'_> {
        self.saved.push(self.state.clone());
        CanvasGuard { canvas: self }
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    // -- State mutation -------------------------------------------------------

    /// Replace the drawing transform (source coords → canvas coords).
    pub fn set_transform(&mut self, transform: AffineCoefficients) {
        self.state.transform = transform;
    }

    /// Intersect the clip region with `polygon` (canvas coordinates).
    ///
    /// Vertices are rounded to whole pixels and filled with straight edges.
    /// A polygon with fewer than three distinct pixel vertices has no area,
    /// so the clip becomes empty.
    pub fn clip_polygon(&mut self, polygon: &[Point]) {
        let (width, height) = self.surface.dimensions();
        let mut mask = GrayImage::new(width, height);

        let vertices = pixel_vertices(polygon);
        if vertices.len() >= 3 {
            draw_polygon_mut(&mut mask, &vertices, INSIDE);
        } else {
            debug!(vertices = vertices.len(), "Zero-area clip polygon");
        }

        if let Some(existing) = &self.state.clip {
            for (m, e) in mask.pixels_mut().zip(existing.pixels()) {
                m.0[0] = m.0[0].min(e.0[0]);
            }
        }
        self.state.clip = Some(mask);
    }

    // -- Drawing --------------------------------------------------------------

    /// Composite `source` onto the canvas through the current transform and
    /// clip, using source-over blending.
    ///
    /// Every canvas pixel whose pre-image lies inside `source` is painted,
    /// including those that land on its last row or column (sampled
    /// clamp-to-edge). Pixels whose pre-image falls outside are left as they
    /// were.
    pub fn draw_image(&mut self, source: &RgbaImage) {
        let (width, height) = self.surface.dimensions();
        let (src_w, src_h) = source.dimensions();
        if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
            return;
        }

        let transform = self.state.transform;
        let inverse = match transform.inverse() {
            Some(inv) => inv,
            None => {
                warn!(?transform, "Drawing transform is not invertible; drawing untransformed");
                AffineCoefficients::identity()
            }
        };

        // Bilinear sampling needs a right and lower neighbour, so sample from
        // an edge-extended copy and clamp to the last real row and column.
        let padded = extend_edges(source);
        let (max_x, max_y) = ((src_w - 1) as f64, (src_h - 1) as f64);

        let mut layer = RgbaImage::new(width, height);
        warp_into_with(
            &padded,
            |x, y| {
                let p = inverse.apply(Point::new(x as f64, y as f64));
                if within(p.x, src_w) && within(p.y, src_h) {
                    (p.x.clamp(0.0, max_x) as f32, p.y.clamp(0.0, max_y) as f32)
                } else {
                    OUTSIDE
                }
            },
            Interpolation::Bilinear,
            TRANSPARENT,
            &mut layer,
        );

        match &self.state.clip {
            Some(mask) => {
                for ((dst, src), m) in self
                    .surface
                    .pixels_mut()
                    .zip(layer.pixels())
                    .zip(mask.pixels())
                {
                    if m.0[0] != 0 {
                        blend_over(dst, *src);
                    }
                }
            }
            None => {
                for (dst, src) in self.surface.pixels_mut().zip(layer.pixels()) {
                    blend_over(dst, *src);
                }
            }
        }
    }
}

/// Scoped canvas state; restores the saved clip and transform on drop.
pub struct CanvasGuard<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for CanvasGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for CanvasGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for CanvasGuard<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

/// Round to pixel vertices, dropping repeats so the fill never sees a
/// closed (first == last) or zero-length edge list.
fn pixel_vertices(polygon: &[Point]) -> Vec<PixelPoint<i32>> {
    let mut vertices: Vec<PixelPoint<i32>> = Vec::with_capacity(polygon.len());
    for p in polygon {
        let v = PixelPoint::new(to_pixel(p.x), to_pixel(p.y));
        if vertices.last() != Some(&v) {
            vertices.push(v);
        }
    }
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// `source` with its last column and row repeated once more.
fn extend_edges(source: &RgbaImage) -> RgbaImage {
    let (w, h) = source.dimensions();
    RgbaImage::from_fn(w + 1, h + 1, |x, y| {
        *source.get_pixel(x.min(w - 1), y.min(h - 1))
    })
}

/// Whether sample coordinate `v` lies in `[0, extent)`. NaN never does.
fn within(v: f64, extent: u32) -> bool {
    v > -SAMPLE_SLACK && v < extent as f64
}

fn to_pixel(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(-CLIP_COORD_LIMIT, CLIP_COORD_LIMIT) as i32
}

/// Porter-Duff source-over on straight (non-premultiplied) 8-bit RGBA.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src.0[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = src;
        return;
    }

    let da = dst.0[3] as u32;
    let out_a = sa + da * (255 - sa) / 255;
    if out_a == 0 {
        *dst = TRANSPARENT;
        return;
    }
    let denom = out_a * 255;
    for c in 0..3 {
        let num = src.0[c] as u32 * sa * 255 + dst.0[c] as u32 * da * (255 - sa);
        dst.0[c] = ((num + denom / 2) / denom).min(255) as u8;
    }
    dst.0[3] = out_a as u8;
}
