// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! JNI cdylib for the edge detection viewer activity.
//!
//! Exports the three `native` methods of
//! `com.example.edgedetectionviewer.MainActivity`. All of them return
//! `void` to Java: failures are logged to logcat and swallowed, and panics
//! are caught before they can unwind into the JVM.
//!
//! # Packaging
//!
//! The activity loads the library with `System.loadLibrary("native-lib")`,
//! which looks for `libnative-lib.so`. Cargo does not allow `-` in a lib
//! name, so this crate builds `libnative_lib.so`. Copy it under the
//! expected name when packaging, once per ABI:
//!
//! ```text
//! cargo build --release --target aarch64-linux-android -p edgeview-jni-native
//! cp target/aarch64-linux-android/release/libnative_lib.so \
//!    app/src/main/jniLibs/arm64-v8a/libnative-lib.so
//! ```
//!
//! Only the `Java_…` symbol names matter to the JVM; the file name just has
//! to match the `loadLibrary` argument.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use edgeview::core::lifecycle::{init_vision_library, release_vision_library};
use edgeview::core::logging::init_logging;
use edgeview::core::rhi::GlesTextureIo;
use edgeview::{EdgeViewError, FrameProcessor, ProcessingMode, Result, TextureHandle};
use jni::JNIEnv;
use jni::objects::JObject;
use jni::sys::{JNI_FALSE, jboolean, jlong};

// ============================================================================
// JNI exports
// ============================================================================

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_edgedetectionviewer_MainActivity_initOpenCV<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
) {
    init_logging();
    report("initOpenCV", guarded(|| {
        init_vision_library();
        Ok(())
    }));
}

/// `texIn` is the camera's external-OES texture, `texOut` a `GL_TEXTURE_2D`
/// the activity renders afterwards. Must be called on the GL thread.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_edgedetectionviewer_MainActivity_processFrame<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    tex_in: jlong,
    tex_out: jlong,
    apply_edges: jboolean,
) {
    init_logging();
    report(
        "processFrame",
        guarded(|| process_frame(tex_in, tex_out, apply_edges != JNI_FALSE)),
    );
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_edgedetectionviewer_MainActivity_releaseOpenCV<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
) {
    init_logging();
    report("releaseOpenCV", guarded(|| {
        release_vision_library();
        Ok(())
    }));
}

// ============================================================================
// Helpers
// ============================================================================

/// Process one frame on the GL context current on this thread.
///
/// Handles are validated before any GL call is made.
pub fn process_frame(tex_in: jlong, tex_out: jlong, apply_edges: bool) -> Result<()> {
    let source = TextureHandle::try_from(tex_in)?;
    let dest = TextureHandle::try_from(tex_out)?;
    let io = GlesTextureIo::current()?;

    FrameProcessor::new(io).process_frame(source, dest, ProcessingMode::from_flag(apply_edges))
}

/// Run `f`, turning a panic into an error.
pub fn guarded(f: impl FnOnce() -> Result<()>) -> Result<()> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(EdgeViewError::Other(anyhow::anyhow!(
            "panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn report(entry_point: &str, result: Result<()>) {
    if let Err(e) = result {
        tracing::error!("{} failed: {}", entry_point, e);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
