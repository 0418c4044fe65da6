// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Resolves the GLES entry points used by [`super::GlesTextureIo`].
//!
//! The `gl` crate keeps its function pointers in process-wide statics, so
//! loading happens once. The library handle is parked in a `OnceLock` for
//! the lifetime of the process so the resolved pointers never dangle.

use std::ffi::c_void;
use std::sync::OnceLock;

use libloading::Library;

use crate::core::{EdgeViewError, Result};

/// Tried in order. Android ships the unversioned name; desktop Mesa only
/// the soname.
const GLES_LIBRARY_CANDIDATES: &[&str] = &["libGLESv2.so", "libGLESv2.so.2"];

type IsLoaded = fn() -> bool;

const REQUIRED_ENTRY_POINTS: &[(&str, IsLoaded)] = &[
    ("glBindTexture", gl::BindTexture::is_loaded),
    ("glReadPixels", gl::ReadPixels::is_loaded),
    ("glTexImage2D", gl::TexImage2D::is_loaded),
    ("glIsTexture", gl::IsTexture::is_loaded),
    ("glGetError", gl::GetError::is_loaded),
];

static GLES_LIBRARY: OnceLock<std::result::Result<Library, String>> = OnceLock::new();

/// Load GLES entry points if this process has not done so yet.
///
/// A failed load is cached too; every later call reports the same error.
pub fn ensure_gl_loaded() -> Result<()> {
    match GLES_LIBRARY.get_or_init(load_gles) {
        Ok(_) => Ok(()),
        Err(reason) => Err(EdgeViewError::GlLoader(reason.clone())),
    }
}

fn load_gles() -> std::result::Result<Library, String> {
    load_first(
        GLES_LIBRARY_CANDIDATES,
        // Safety: libGLESv2 runs no initializers with caller preconditions.
        |candidate| unsafe { Library::new(candidate) }.map_err(|e| e.to_string()),
        bind_entry_points,
    )
}

/// Open each candidate in turn and keep the first one `bind` accepts.
///
/// A candidate that opens but fails `bind` is skipped like one that does
/// not open. The error lists every candidate's failure.
fn load_first<L>(
    candidates: &[&str],
    mut open: impl FnMut(&str) -> std::result::Result<L, String>,
    mut bind: impl FnMut(&L) -> std::result::Result<(), String>,
) -> std::result::Result<L, String> {
    let mut failures = Vec::with_capacity(candidates.len());

    for &candidate in candidates {
        let library = match open(candidate) {
            Ok(library) => library,
            Err(e) => {
                failures.push(format!("{candidate}: {e}"));
                continue;
            }
        };

        match bind(&library) {
            Ok(()) => {
                tracing::debug!("Loaded GLES entry points from {}", candidate);
                return Ok(library);
            }
            Err(e) => failures.push(format!("{candidate}: {e}")),
        }
    }

    Err(failures.join("; "))
}

/// Point the `gl` statics at `library`. Every pointer is overwritten, so a
/// rejected candidate leaves nothing behind once the next one binds.
fn bind_entry_points(library: &Library) -> std::result::Result<(), String> {
    gl::load_with(|symbol| resolve(library, symbol));

    let missing: Vec<&str> = REQUIRED_ENTRY_POINTS
        .iter()
        .filter(|(_, is_loaded)| !is_loaded())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing {}", missing.join(", ")))
    }
}

fn resolve(library: &Library, symbol: &str) -> *const c_void {
    // Safety: the address is handed to `gl`, which casts it to the
    // prototype it generated for `symbol`.
    match unsafe { library.get::<*const c_void>(symbol.as_bytes()) } {
        Ok(address) => *address,
        Err(_) => std::ptr::null(),
    }
}
