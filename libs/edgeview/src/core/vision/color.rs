// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use image::{GrayImage, Luma, Rgba, RgbaImage};

// BT.601 luma weights in 14-bit fixed point; they sum to 1 << 14.
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Rounded BT.601 luma of one pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((weighted + LUMA_ROUND) >> LUMA_SHIFT) as u8
}

/// RGBA8 → 8-bit gray. Alpha is ignored.
pub fn rgba_to_gray(src: &RgbaImage) -> GrayImage {
    let mut out = GrayImage::new(src.width(), src.height());
    for (dst, px) in out.pixels_mut().zip(src.pixels()) {
        let [r, g, b, _] = px.0;
        *dst = Luma([luma(r, g, b)]);
    }
    out
}

/// 8-bit gray → RGBA8 with the intensity in every color channel and
/// alpha 255.
pub fn gray_to_rgba(src: &GrayImage) -> RgbaImage {
    let mut out = RgbaImage::new(src.width(), src.height());
    for (dst, px) in out.pixels_mut().zip(src.pixels()) {
        let v = px.0[0];
        *dst = Rgba([v, v, v, u8::MAX]);
    }
    out
}
