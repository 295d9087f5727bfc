//! C Foreign Function Interface (FFI) for glyphcast.
//!
//! This module provides a C-compatible API for embedding a [`Bridge`] in a
//! simulation written in another language. All functions are `extern "C"`
//! with stable ABI.
//!
//! # Safety
//!
//! Handles must come from `glyphcast_bridge_new*` and be destroyed exactly
//! once. Null handles are tolerated and treated as "no bridge". A handle must
//! not be used from two threads at once.
//!
//! # Example (C)
//!
//! ```c
//! #include "glyphcast.h"
//!
//! GlyphcastBridge* bridge = glyphcast_bridge_new();
//!
//! // Host side, e.g. a key handler.
//! glyphcast_queue_key(bridge, 0xac);   // left arrow pressed
//!
//! // Simulation side, every tick.
//! int pressed; unsigned char key;
//! while (glyphcast_get_key(bridge, &pressed, &key)) { /* ... */ }
//! const char* text = glyphcast_draw_frame(bridge, framebuffer, 320, 200);
//!
//! glyphcast_bridge_destroy(bridge);
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::bridge::{Bridge, BridgeConfig};
use crate::host::RenderSink;
use crate::sink::CaptureSink;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uchar, c_uint};
use std::ptr;

// =============================================================================
// Opaque Handle Types
// =============================================================================

/// Opaque handle to a bridge and its latest frame text.
pub struct GlyphcastBridge {
    bridge: Bridge,
    frame: CaptureSink,
}

// =============================================================================
// Result and Error Codes
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphcastResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
    /// Invalid UTF-8 string.
    InvalidUtf8 = 2,
    /// Key code is 0 or its magnitude exceeds 255.
    InvalidKey = 3,
}

// =============================================================================
// Bridge Lifetime
// =============================================================================

/// Create a bridge with the default 106x20 grid.
///
/// Returns NULL on failure.
#[unsafe(no_mangle)]
pub extern "C" fn glyphcast_bridge_new() -> *mut GlyphcastBridge {
    into_handle(BridgeConfig::default())
}

/// Create a bridge with a custom grid, status bar height and palette.
///
/// `palette` may be NULL for the default ramp. Returns NULL if the
/// configuration is invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_bridge_new_with(
    width: u16,
    height: u16,
    status_bar_rows: c_uint,
    palette: *const c_char,
) -> *mut GlyphcastBridge {
    let mut config = BridgeConfig::default()
        .with_grid(width, height)
        .with_status_bar_rows(status_bar_rows as usize);

    if !palette.is_null() {
        let Ok(ramp) = CStr::from_ptr(palette).to_str() else {
            tracing::warn!("palette is not valid UTF-8");
            return ptr::null_mut();
        };
        config = config.with_palette(ramp);
    }

    into_handle(config)
}

fn into_handle(config: BridgeConfig) -> *mut GlyphcastBridge {
    match Bridge::new(config) {
        Ok(bridge) => Box::into_raw(Box::new(GlyphcastBridge {
            bridge,
            frame: CaptureSink::new(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "bridge configuration rejected");
            ptr::null_mut()
        }
    }
}

/// Destroy a bridge.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_bridge_destroy(bridge: *mut GlyphcastBridge) {
    if !bridge.is_null() {
        drop(Box::from_raw(bridge));
    }
}

// =============================================================================
// Input Functions
// =============================================================================

/// Enqueue a key code: positive for a press, negative for a release.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_queue_key(bridge: *mut GlyphcastBridge, code: c_int) -> GlyphcastResult {
    if bridge.is_null() {
        return GlyphcastResult::NullPointer;
    }
    if (*bridge).bridge.queue_key(code) {
        GlyphcastResult::Ok
    } else {
        GlyphcastResult::InvalidKey
    }
}

/// Dequeue the next key event.
///
/// Returns 1 and fills `pressed` (1 or 0) and `key` when an event was
/// pending, 0 otherwise. Either output pointer may be NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_get_key(
    bridge: *mut GlyphcastBridge,
    pressed: *mut c_int,
    key: *mut c_uchar,
) -> c_int {
    if bridge.is_null() {
        return 0;
    }
    let Some(event) = (*bridge).bridge.next_key() else {
        return 0;
    };

    if !pressed.is_null() {
        *pressed = c_int::from(event.pressed);
    }
    if !key.is_null() {
        *key = event.key.get();
    }
    1
}

// =============================================================================
// Time Functions
// =============================================================================

/// Milliseconds since the bridge was created (wraps after ~49.7 days).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_ticks_ms(bridge: *const GlyphcastBridge) -> u32 {
    if bridge.is_null() {
        return 0;
    }
    (*bridge).bridge.ticks_ms()
}

/// Block the calling thread for `ms` milliseconds.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_sleep_ms(bridge: *const GlyphcastBridge, ms: u32) {
    if !bridge.is_null() {
        (*bridge).bridge.sleep_ms(ms);
    }
}

// =============================================================================
// Video Functions
// =============================================================================

/// Downsample a `width x height` framebuffer of packed pixels.
///
/// Returns the frame as NUL-terminated UTF-8, rows concatenated without
/// separators. The pointer stays valid until the next draw or until the
/// bridge is destroyed. Returns NULL if a pointer is NULL or a dimension
/// is zero.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_draw_frame(
    bridge: *mut GlyphcastBridge,
    pixels: *const u32,
    width: c_uint,
    height: c_uint,
) -> *const c_char {
    if bridge.is_null() || pixels.is_null() {
        return ptr::null();
    }
    let (width, height) = (width as usize, height as usize);
    let Some(len) = width.checked_mul(height) else {
        return ptr::null();
    };

    let handle = &mut *bridge;
    let pixels = std::slice::from_raw_parts(pixels, len);
    let frame = match handle.bridge.frame_from(pixels, width, height) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(error = %e, "rejected framebuffer");
            return ptr::null();
        }
    };

    let grid = handle.bridge.render(&frame);
    // CaptureSink::present is infallible.
    let _ = handle.frame.present(grid);
    handle.frame.as_bytes_with_nul().as_ptr().cast::<c_char>()
}

/// Text of the most recent frame, or an empty string before the first draw.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_frame_text(bridge: *const GlyphcastBridge) -> *const c_char {
    if bridge.is_null() {
        return ptr::null();
    }
    (*bridge).frame.as_bytes_with_nul().as_ptr().cast::<c_char>()
}

/// Grid width in columns.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_frame_width(bridge: *const GlyphcastBridge) -> u16 {
    if bridge.is_null() {
        return 0;
    }
    (*bridge).bridge.grid().width()
}

/// Grid height in rows.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_frame_height(bridge: *const GlyphcastBridge) -> u16 {
    if bridge.is_null() {
        return 0;
    }
    (*bridge).bridge.grid().height()
}

// =============================================================================
// Window Functions
// =============================================================================

/// Record a new window title.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glyphcast_set_window_title(
    bridge: *mut GlyphcastBridge,
    title: *const c_char,
) -> GlyphcastResult {
    if bridge.is_null() || title.is_null() {
        return GlyphcastResult::NullPointer;
    }
    let Ok(title) = CStr::from_ptr(title).to_str() else {
        return GlyphcastResult::InvalidUtf8;
    };
    (*bridge).bridge.set_window_title(title);
    GlyphcastResult::Ok
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Get the glyphcast version string.
#[unsafe(no_mangle)]
pub extern "C" fn glyphcast_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr().cast::<c_char>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(ptr: *const c_char) -> String {
        assert!(!ptr.is_null());
        unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_string() }
    }

    #[test]
    fn test_glyphcast_version() {
        assert_eq!(text(glyphcast_version()), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_key_round_trip() {
        unsafe {
            let bridge = glyphcast_bridge_new();
            assert!(!bridge.is_null());

            assert_eq!(glyphcast_queue_key(bridge, 65), GlyphcastResult::Ok);
            assert_eq!(glyphcast_queue_key(bridge, -65), GlyphcastResult::Ok);
            assert_eq!(glyphcast_queue_key(bridge, 0), GlyphcastResult::InvalidKey);

            let mut pressed: c_int = -1;
            let mut key: c_uchar = 0;
            assert_eq!(glyphcast_get_key(bridge, &mut pressed, &mut key), 1);
            assert_eq!((pressed, key), (1, 65));
            assert_eq!(glyphcast_get_key(bridge, &mut pressed, &mut key), 1);
            assert_eq!((pressed, key), (0, 65));
            assert_eq!(glyphcast_get_key(bridge, &mut pressed, &mut key), 0);

            glyphcast_bridge_destroy(bridge);
        }
    }

    #[test]
    fn test_draw_frame_text() {
        unsafe {
            let palette = b" #\0";
            let bridge = glyphcast_bridge_new_with(2, 1, 0, palette.as_ptr().cast());
            assert!(!bridge.is_null());
            assert_eq!(text(glyphcast_frame_text(bridge)), "");

            // Left half black, right half white.
            let pixels = [0xFF00_0000_u32, 0xFF00_0000, 0xFFFF_FFFF, 0xFFFF_FFFF];
            let frame = glyphcast_draw_frame(bridge, pixels.as_ptr(), 4, 1);
            assert_eq!(text(frame), " #");
            assert_eq!(glyphcast_frame_width(bridge), 2);
            assert_eq!(glyphcast_frame_height(bridge), 1);

            assert!(glyphcast_draw_frame(bridge, pixels.as_ptr(), 0, 1).is_null());
            assert!(glyphcast_draw_frame(bridge, ptr::null(), 4, 1).is_null());

            glyphcast_bridge_destroy(bridge);
        }
    }

    #[test]
    fn test_invalid_config_returns_null() {
        unsafe {
            assert!(glyphcast_bridge_new_with(0, 20, 10, ptr::null()).is_null());
            let empty = b"\0";
            assert!(glyphcast_bridge_new_with(106, 20, 10, empty.as_ptr().cast()).is_null());
        }
    }

    #[test]
    fn test_null_handles() {
        unsafe {
            assert_eq!(glyphcast_queue_key(ptr::null_mut(), 1), GlyphcastResult::NullPointer);
            assert_eq!(glyphcast_get_key(ptr::null_mut(), ptr::null_mut(), ptr::null_mut()), 0);
            assert_eq!(glyphcast_ticks_ms(ptr::null()), 0);
            assert_eq!(glyphcast_frame_width(ptr::null()), 0);
            glyphcast_bridge_destroy(ptr::null_mut());
        }
    }

    #[test]
    fn test_window_title() {
        unsafe {
            let bridge = glyphcast_bridge_new();
            let title = b"DOOM\0";
            assert_eq!(glyphcast_set_window_title(bridge, title.as_ptr().cast()), GlyphcastResult::Ok);
            assert_eq!((*bridge).bridge.window_title(), Some("DOOM"));
            assert_eq!(
                glyphcast_set_window_title(bridge, ptr::null()),
                GlyphcastResult::NullPointer
            );
            glyphcast_bridge_destroy(bridge);
        }
    }
}
