// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Host-memory texture table with the same contract as the GL path.

use std::collections::HashMap;

use image::RgbaImage;

use crate::core::rhi::{FrameDimensions, TextureHandle, TextureIo};
use crate::core::{EdgeViewError, Result};

/// Texture table keyed by handle, for running the frame path without a GL
/// context.
///
/// Mirrors what the driver enforces through `glIsTexture`: only handles
/// that were created (via [`create`](Self::create) or
/// [`insert`](Self::insert)) can be read or written.
#[derive(Debug, Default)]
pub struct MemoryTextureIo {
    textures: HashMap<TextureHandle, RgbaImage>,
}

impl MemoryTextureIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture name with no storage, like a freshly generated
    /// GL texture.
    pub fn create(&mut self, handle: TextureHandle) {
        self.textures.insert(handle, RgbaImage::new(0, 0));
    }

    /// Register a texture with contents, replacing any previous storage.
    pub fn insert(&mut self, handle: TextureHandle, pixels: RgbaImage) {
        self.textures.insert(handle, pixels);
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&RgbaImage> {
        self.textures.get(&handle)
    }

    pub fn remove(&mut self, handle: TextureHandle) -> Option<RgbaImage> {
        self.textures.remove(&handle)
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureIo for MemoryTextureIo {
    fn read_rgba(&mut self, source: TextureHandle, dims: FrameDimensions) -> Result<RgbaImage> {
        let pixels = self
            .textures
            .get(&source)
            .ok_or(EdgeViewError::InvalidTextureHandle(source.name().into()))?;

        let actual = FrameDimensions::new(pixels.width(), pixels.height());
        if actual != dims {
            return Err(EdgeViewError::DimensionMismatch {
                expected: dims,
                actual,
            });
        }
        Ok(pixels.clone())
    }

    fn write_rgba(&mut self, dest: TextureHandle, frame: &RgbaImage) -> Result<()> {
        let storage = self
            .textures
            .get_mut(&dest)
            .ok_or(EdgeViewError::InvalidTextureHandle(dest.name().into()))?;
        storage.clone_from(frame);
        Ok(())
    }
}
