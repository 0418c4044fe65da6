// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! edgeview: camera frame edge detection over GLES textures.
//!
//! One frame per call: the camera's external-OES texture is read back into
//! host memory, optionally run through a fixed Canny pass, and uploaded into
//! a `GL_TEXTURE_2D` the host renders. The JNI entry points live in the
//! `edgeview-jni-native` cdylib; this crate holds everything they call so it
//! can be exercised off-device through [`core::rhi::MemoryTextureIo`].

pub mod core;

pub use self::core::{
    CAMERA_FRAME, EdgeViewError, FrameDimensions, FrameProcessor,
    ProcessingMode, Result, TextureHandle, TextureIo,
};
