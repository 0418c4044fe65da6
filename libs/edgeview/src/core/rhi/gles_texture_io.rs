// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! GLES implementation of [`TextureIo`].
//!
//! Source textures are camera frames bound through the external-OES
//! target; destinations are plain `GL_TEXTURE_2D`. Every path leaves both
//! targets unbound on return, including the error paths.

use image::RgbaImage;

use crate::core::rhi::gl_constants::GL_TEXTURE_EXTERNAL_OES;
use crate::core::rhi::{FrameDimensions, TextureHandle, TextureIo, ensure_gl_loaded};
use crate::core::{EdgeViewError, Result};

/// Texture I/O against the GL context current on the calling thread.
///
/// Construct with [`GlesTextureIo::current`] on the thread that owns the
/// context. The type is deliberately `!Send`: a GL context is bound to one
/// thread.
#[derive(Debug)]
pub struct GlesTextureIo {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl GlesTextureIo {
    /// Bind to whatever GL context is current, loading entry points on
    /// first use.
    pub fn current() -> Result<Self> {
        ensure_gl_loaded()?;
        Ok(Self {
            _not_send: std::marker::PhantomData,
        })
    }

    fn ensure_texture(&self, handle: TextureHandle) -> Result<()> {
        // Safety: entry points are loaded (checked in `current`) and the
        // caller holds the context.
        let known = unsafe { gl::IsTexture(handle.name()) };
        if known == gl::FALSE {
            return Err(EdgeViewError::InvalidTextureHandle(handle.name().into()));
        }
        Ok(())
    }
}

impl TextureIo for GlesTextureIo {
    fn read_rgba(&mut self, source: TextureHandle, dims: FrameDimensions) -> Result<RgbaImage> {
        drain_gl_errors();
        self.ensure_texture(source)?;

        let mut frame = RgbaImage::new(dims.width, dims.height);
        // Safety: `frame` holds exactly width * height * 4 bytes and the
        // default pack alignment (4) matches RGBA8 rows.
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, 0);
            gl::BindTexture(GL_TEXTURE_EXTERNAL_OES, source.name());
            gl::ReadPixels(
                0,
                0,
                dims.width as i32,
                dims.height as i32,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                frame.as_mut_ptr().cast(),
            );
            gl::BindTexture(GL_TEXTURE_EXTERNAL_OES, 0);
        }
        check_gl_error("read external texture")?;

        Ok(frame)
    }

    fn write_rgba(&mut self, dest: TextureHandle, frame: &RgbaImage) -> Result<()> {
        drain_gl_errors();
        self.ensure_texture(dest)?;

        // Safety: `frame` is a tightly packed RGBA8 buffer of the size
        // passed to glTexImage2D.
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, dest.name());
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                frame.width() as i32,
                frame.height() as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                frame.as_ptr().cast(),
            );
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }
        check_gl_error("upload texture")
    }
}

const MAX_DRAINED_ERRORS: usize = 32;

/// Discard errors left behind by earlier, unrelated GL calls so they are
/// not attributed to this frame.
fn drain_gl_errors() {
    // Bounded: without a current context some drivers report an error on
    // every call.
    for _ in 0..MAX_DRAINED_ERRORS {
        // Safety: entry points are loaded before any GlesTextureIo exists.
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }
        tracing::trace!("Discarding stale GL error 0x{:04X}", code);
    }
}

/// Report the first error raised by `operation`, draining the rest.
fn check_gl_error(operation: &'static str) -> Result<()> {
    // Safety: see `drain_gl_errors`.
    let code = unsafe { gl::GetError() };
    if code == gl::NO_ERROR {
        return Ok(());
    }
    drain_gl_errors();
    Err(EdgeViewError::Gl { operation, code })
}
