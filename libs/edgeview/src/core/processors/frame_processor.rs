// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! One camera frame from a source texture into a destination texture.

use image::RgbaImage;

use crate::core::Result;
use crate::core::rhi::{CAMERA_FRAME, TextureHandle, TextureIo};
use crate::core::vision::detect_edges;

/// What happens to the pixels between readback and upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Upload the readback unchanged.
    #[default]
    Passthrough,
    /// Upload the Canny edge map as opaque gray RGBA.
    Edges,
}

impl ProcessingMode {
    /// Map the host's "apply edges" flag.
    pub fn from_flag(apply_edges: bool) -> Self {
        if apply_edges {
            Self::Edges
        } else {
            Self::Passthrough
        }
    }

    pub fn applies_edges(&self) -> bool {
        matches!(self, Self::Edges)
    }
}

/// Apply `mode` to a frame already in host memory.
pub fn process_pixels(frame: RgbaImage, mode: ProcessingMode) -> RgbaImage {
    match mode {
        ProcessingMode::Passthrough => frame,
        ProcessingMode::Edges => detect_edges(&frame),
    }
}

/// Reads a camera frame, optionally edge-detects it, and writes it out.
///
/// Holds no per-frame state: each [`process_frame`](Self::process_frame)
/// allocates its own buffers and drops them before returning. Frame size
/// is always [`CAMERA_FRAME`]; nothing is queried from the textures.
pub struct FrameProcessor<T: TextureIo> {
    io: T,
}

impl<T: TextureIo> FrameProcessor<T> {
    pub fn new(io: T) -> Self {
        Self { io }
    }

    /// Process one frame from `source` into `dest`.
    ///
    /// Both handles are borrowed from the host for this call only. `dest`
    /// is fully overwritten with a 1280x720 RGBA8 image.
    pub fn process_frame(
        &mut self,
        source: TextureHandle,
        dest: TextureHandle,
        mode: ProcessingMode,
    ) -> Result<()> {
        let frame = self.io.read_rgba(source, CAMERA_FRAME)?;
        let processed = process_pixels(frame, mode);
        self.io.write_rgba(dest, &processed)?;

        tracing::debug!(
            "Frame processed, edges: {} ({} -> {})",
            mode.applies_edges(),
            source,
            dest
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EdgeViewError;
    use crate::core::rhi::MemoryTextureIo;
    use image::Rgba;

    fn handle(name: u32) -> TextureHandle {
        TextureHandle::new(name).unwrap()
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(ProcessingMode::from_flag(true), ProcessingMode::Edges);
        assert_eq!(ProcessingMode::from_flag(false), ProcessingMode::Passthrough);
        assert!(!ProcessingMode::default().applies_edges());
    }

    #[test]
    fn test_passthrough_moves_pixels_untouched() {
        let frame = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8, y as u8, 7, 9]));
        let out = process_pixels(frame.clone(), ProcessingMode::Passthrough);
        assert_eq!(out, frame);
    }

    #[test]
    fn test_missing_source_leaves_dest_untouched() {
        let mut io = MemoryTextureIo::new();
        io.create(handle(2));

        let mut processor = FrameProcessor::new(&mut io);
        let err = processor
            .process_frame(handle(1), handle(2), ProcessingMode::Edges)
            .unwrap_err();
        assert!(matches!(err, EdgeViewError::InvalidTextureHandle(1)));
        assert_eq!(io.get(handle(2)).unwrap().dimensions(), (0, 0));
    }

    #[test]
    fn test_source_of_wrong_size_is_rejected() {
        let mut io = MemoryTextureIo::new();
        io.insert(handle(1), RgbaImage::new(640, 480));
        io.create(handle(2));

        let err = FrameProcessor::new(&mut io)
            .process_frame(handle(1), handle(2), ProcessingMode::Passthrough)
            .unwrap_err();
        assert!(matches!(err, EdgeViewError::DimensionMismatch { .. }));
    }
}
