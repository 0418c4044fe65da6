// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Texture handles and frame geometry.

use std::fmt;
use std::num::NonZeroU32;

use crate::core::{EdgeViewError, Result};

/// GL enum values not covered by the desktop `gl` bindings.
pub mod gl_constants {
    /// GL_TEXTURE_EXTERNAL_OES - camera stream sampler target (OES_EGL_image_external).
    pub const GL_TEXTURE_EXTERNAL_OES: u32 = 0x8D65;
}

/// Width x height of a frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of a tightly packed RGBA8 buffer of these dimensions.
    pub const fn rgba_byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The only frame geometry the camera path supports. Never queried from
/// the source texture.
pub const CAMERA_FRAME: FrameDimensions = FrameDimensions::new(1280, 720);

/// Non-owning reference to a GL texture name supplied by the host.
///
/// The host allocates and frees the texture; a handle is only valid for
/// the duration of the call it was passed into. Zero (the GL default
/// texture) is never a valid handle here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(NonZeroU32);

impl TextureHandle {
    pub fn new(name: u32) -> Option<Self> {
        NonZeroU32::new(name).map(Self)
    }

    /// The raw GL texture name.
    #[inline]
    pub fn name(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<i64> for TextureHandle {
    type Error = EdgeViewError;

    /// Host handles arrive as `jlong`.
    fn try_from(raw: i64) -> Result<Self> {
        u32::try_from(raw)
            .ok()
            .and_then(Self::new)
            .ok_or(EdgeViewError::InvalidTextureHandle(raw))
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_frame_byte_len() {
        assert_eq!(CAMERA_FRAME.rgba_byte_len(), 1280 * 720 * 4);
        assert_eq!(CAMERA_FRAME.to_string(), "1280x720");
    }

    #[test]
    fn test_handle_from_host_integer() {
        let handle = TextureHandle::try_from(7i64).unwrap();
        assert_eq!(handle.name(), 7);

        let max = TextureHandle::try_from(u32::MAX as i64).unwrap();
        assert_eq!(max.name(), u32::MAX);
    }

    #[test]
    fn test_handle_rejects_zero_negative_and_overflow() {
        for raw in [0i64, -1, i64::MIN, u32::MAX as i64 + 1] {
            match TextureHandle::try_from(raw) {
                Err(EdgeViewError::InvalidTextureHandle(v)) => assert_eq!(v, raw),
                other => panic!("expected InvalidTextureHandle for {raw}, got {other:?}"),
            }
        }
    }
}
