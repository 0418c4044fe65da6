// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Bracket points around the vision library's lifetime.
//!
//! The vision routines need no global setup, so both hooks only log. The
//! host still calls them from its activity lifecycle; anything that needs
//! per-process setup or teardown (worker pools, GPU compute contexts) hangs
//! off these two functions.

/// Called once when the host activity is created.
pub fn init_vision_library() {
    tracing::debug!("Initializing vision library");
}

/// Called once when the host activity is destroyed.
pub fn release_vision_library() {
    tracing::debug!("Vision library released");
}
