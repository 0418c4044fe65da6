// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use image::RgbaImage;

use crate::core::Result;
use crate::core::rhi::{FrameDimensions, TextureHandle};

/// Moves RGBA8 pixels between textures and host memory.
///
/// Implementations mutate shared graphics state (texture bindings), hence
/// `&mut self`. Callers must stay on the thread that owns the context.
pub trait TextureIo {
    /// Copy `dims` worth of RGBA8 pixels out of `source`.
    fn read_rgba(&mut self, source: TextureHandle, dims: FrameDimensions) -> Result<RgbaImage>;

    /// Replace the storage of `dest` with `frame`.
    fn write_rgba(&mut self, dest: TextureHandle, frame: &RgbaImage) -> Result<()>;
}

impl<T: TextureIo + ?Sized> TextureIo for &mut T {
    fn read_rgba(&mut self, source: TextureHandle, dims: FrameDimensions) -> Result<RgbaImage> {
        (**self).read_rgba(source, dims)
    }

    fn write_rgba(&mut self, dest: TextureHandle, frame: &RgbaImage) -> Result<()> {
        (**self).write_rgba(dest, frame)
    }
}
