// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Process-wide `tracing` subscriber for the native library.
//!
//! The library is loaded into an app process with no terminal attached.
//! On Android every formatted event is forwarded to logcat through liblog;
//! elsewhere (host-side tests, desktop tooling) it goes to stderr.
//!
//! Verbosity comes from `EDGEVIEW_LOG` (an `EnvFilter` directive string),
//! defaulting to `debug` so the per-frame line is visible.

use std::ffi::{CStr, CString};
use std::io::{self, Write};
use std::sync::Once;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILTER_ENV: &str = "EDGEVIEW_LOG";
pub const DEFAULT_LOG_FILTER: &str = "debug";
/// Logcat tag the host app filters on.
pub const LOG_TAG: &CStr = c"NativeLib";

static INIT: Once = Once::new();

/// Install the subscriber. Safe to call from every FFI entry point; only
/// the first call does anything, and an already-installed global
/// subscriber (e.g. from a test harness) is left alone.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_target(false)
            // logcat already shows the priority.
            .with_level(!cfg!(target_os = "android"))
            .with_writer(PlatformLogWriter);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}

/// Android log priorities (`android/log.h`).
pub mod priority {
    pub const VERBOSE: i32 = 2;
    pub const DEBUG: i32 = 3;
    pub const INFO: i32 = 4;
    pub const WARN: i32 = 5;
    pub const ERROR: i32 = 6;
}

pub fn android_priority(level: &Level) -> i32 {
    match *level {
        Level::TRACE => priority::VERBOSE,
        Level::DEBUG => priority::DEBUG,
        Level::INFO => priority::INFO,
        Level::WARN => priority::WARN,
        Level::ERROR => priority::ERROR,
    }
}

/// One formatted event as liblog expects it: no trailing newline, no
/// interior NULs.
pub fn log_text(formatted: &[u8]) -> CString {
    let mut end = formatted.len();
    while end > 0 && matches!(formatted[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    let bytes: Vec<u8> = formatted[..end].iter().copied().filter(|&b| b != 0).collect();
    CString::new(bytes).unwrap_or_default()
}

/// `MakeWriter` that hands the fmt layer one buffer per event and emits
/// it, tagged with the event's level, when the buffer is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformLogWriter;

impl<'a> MakeWriter<'a> for PlatformLogWriter {
    type Writer = LogLine;

    fn make_writer(&'a self) -> Self::Writer {
        LogLine::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LogLine::new(*meta.level())
    }
}

#[derive(Debug)]
pub struct LogLine {
    level: Level,
    buf: Vec<u8>,
}

impl LogLine {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(128),
        }
    }
}

impl Write for LogLine {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LogLine {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            emit(&self.level, &self.buf);
        }
    }
}

#[cfg(target_os = "android")]
#[link(name = "log")]
unsafe extern "C" {
    fn __android_log_write(
        prio: libc::c_int,
        tag: *const libc::c_char,
        text: *const libc::c_char,
    ) -> libc::c_int;
}

#[cfg(target_os = "android")]
fn emit(level: &Level, formatted: &[u8]) {
    let text = log_text(formatted);
    // Safety: both pointers are NUL-terminated and outlive the call.
    unsafe {
        __android_log_write(android_priority(level), LOG_TAG.as_ptr(), text.as_ptr());
    }
}

#[cfg(not(target_os = "android"))]
fn emit(_level: &Level, formatted: &[u8]) {
    let _ = io::stderr().lock().write_all(formatted);
}
