// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod processors;
pub mod rhi;
pub mod vision;

pub use error::{EdgeViewError, Result};
pub use processors::{FrameProcessor, ProcessingMode};
pub use rhi::{CAMERA_FRAME, FrameDimensions, TextureHandle, TextureIo};
