// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use thiserror::Error;

use crate::core::rhi::FrameDimensions;

#[derive(Error, Debug)]
pub enum EdgeViewError {
    #[error("Invalid texture handle: {0}")]
    InvalidTextureHandle(i64),

    #[error("Frame dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: FrameDimensions,
        actual: FrameDimensions,
    },

    #[error("GL operation '{operation}' failed: 0x{code:04X}")]
    Gl { operation: &'static str, code: u32 },

    #[error("GL loader failed: {0}")]
    GlLoader(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EdgeViewError>;
