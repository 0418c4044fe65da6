// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

#![allow(dead_code)]

use std::io;
use std::sync::Arc;

use edgeview::core::rhi::MemoryTextureIo;
use edgeview::{CAMERA_FRAME, TextureHandle};
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use tracing::Level;

pub const SOURCE: u32 = 11;
pub const DEST: u32 = 12;

pub fn handle(name: u32) -> TextureHandle {
    TextureHandle::new(name).expect("non-zero texture name")
}

/// Camera-sized frame with a bright rectangle on a colored gradient.
pub fn camera_scene() -> RgbaImage {
    RgbaImage::from_fn(CAMERA_FRAME.width, CAMERA_FRAME.height, |x, y| {
        if (400..880).contains(&x) && (200..520).contains(&y) {
            Rgba([250, 250, 240, 255])
        } else {
            Rgba([(x / 10) as u8, (y / 6) as u8, 60, 255])
        }
    })
}

/// Texture table holding `source` under [`SOURCE`] and an empty [`DEST`].
pub fn textures_with_source(source: RgbaImage) -> MemoryTextureIo {
    let mut io = MemoryTextureIo::new();
    io.insert(handle(SOURCE), source);
    io.create(handle(DEST));
    io
}

/// Collects everything a fmt subscriber writes.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber writing into the returned buffer.
pub fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}
