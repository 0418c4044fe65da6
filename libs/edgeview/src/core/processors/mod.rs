// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod frame_processor;

pub use frame_processor::{FrameProcessor, ProcessingMode, process_pixels};
