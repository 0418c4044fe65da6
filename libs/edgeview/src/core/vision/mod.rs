// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Vision routines used by the edge path: luma conversion, Canny, and
//! expansion back to RGBA.

mod canny;
mod color;

pub use canny::canny;
pub use color::{gray_to_rgba, luma, rgba_to_gray};

use image::RgbaImage;

/// Lower Canny hysteresis threshold used for camera frames.
pub const CANNY_LOW_THRESHOLD: f64 = 80.0;
/// Upper Canny hysteresis threshold used for camera frames.
pub const CANNY_HIGH_THRESHOLD: f64 = 100.0;

/// RGBA in, RGBA out: gray conversion, Canny at the fixed camera
/// thresholds, and the edge map replicated into R, G and B with opaque
/// alpha.
pub fn detect_edges(frame: &RgbaImage) -> RgbaImage {
    let gray = rgba_to_gray(frame);
    let edges = canny(&gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
    gray_to_rgba(&edges)
}
