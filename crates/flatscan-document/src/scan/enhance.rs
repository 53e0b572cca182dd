// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan enhancement — linear contrast around mid-gray followed by a
// brightness scale, clamped to the 8-bit range.

use flatscan_core::EnhancementOptions;
use image::RgbaImage;
use tracing::{debug, instrument};

/// Channel value contrast pivots around.
const MID_GRAY: f64 = 128.0;

/// Enhance the colour channels of `image` in place and hand it back.
///
/// Each of R, G and B becomes
/// `clamp(round(((v - 128) * contrast + 128) * brightness), 0, 255)`.
/// Alpha is left alone.
#[instrument(
    skip(image, options),
    fields(
        width = image.width(),
        height = image.height(),
        contrast = options.contrast,
        brightness = options.brightness
    )
)]
pub fn enhance(mut image: RgbaImage, options: &EnhancementOptions) -> RgbaImage {
    // The transform depends only on the input byte, so build it once.
    let lut = lookup_table(options);

    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [lut[r as usize], lut[g as usize], lut[b as usize], a];
    }

    debug!("Enhancement applied");
    image
}

/// Enhanced value for a single channel byte.
pub fn enhance_channel(value: u8, options: &EnhancementOptions) -> u8 {
    let v = ((value as f64 - MID_GRAY) * options.contrast + MID_GRAY) * options.brightness;
    // NaN (from non-finite options) saturates to 0 in the cast.
    v.round().clamp(0.0, 255.0) as u8
}

fn lookup_table(options: &EnhancementOptions) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        *slot = enhance_channel(value as u8, options);
    }
    lut
}
