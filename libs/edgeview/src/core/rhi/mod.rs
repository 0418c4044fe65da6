// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Texture access: handles, frame geometry, and the read/write seam between
//! the frame processor and the graphics driver.

mod gl_loader;
mod gles_texture_io;
mod memory_texture_io;
mod texture;
mod texture_io;

pub use gl_loader::ensure_gl_loaded;
pub use gles_texture_io::GlesTextureIo;
pub use memory_texture_io::MemoryTextureIo;
pub use texture::{CAMERA_FRAME, FrameDimensions, TextureHandle, gl_constants};
pub use texture_io::TextureIo;
