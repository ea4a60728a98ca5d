//! C ABI DLL for hwinput -- loadable by ctypes, C#, or any FFI consumer.
//!
//! All exported functions follow the convention:
//! - Return `i32` status code: `HWINPUT_OK=0`, negative on failure, one code
//!   per error kind
//! - Simulators are opaque handles from `hwinput_new()`, freed with
//!   `hwinput_free()` (which releases any held keys)
//! - String outputs allocated by Rust, freed via `hwinput_free_string()`
//! - Last error retrievable via `hwinput_last_error()`
//!
//! Integer encodings: direction `0=click 1=press 2=release`; button
//! `0=left 1=middle 2=right 3=back 4=forward 5..8=scroll up/down/left/right`;
//! axis `0=horizontal 1=vertical`; coordinate `0=absolute 1=relative`.
//! Keys are passed as Windows virtual-key codes.

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::ptr;

use hwinput_core::keymap::from_platform_code;
use hwinput_core::{
    Axis, Button, Coordinate, Direction, ErrorKind, InputError, Keyboard, Mouse, Platform,
    Settings, Simulator,
};
use parking_lot::Mutex;

pub const HWINPUT_OK: i32 = 0;
pub const HWINPUT_ERROR: i32 = -1;
pub const HWINPUT_INVALID_INPUT: i32 = -2;
pub const HWINPUT_MAPPING: i32 = -3;
pub const HWINPUT_SIMULATE: i32 = -4;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn fail(err: &InputError) -> i32 {
    set_last_error(&err.to_string());
    match err.kind() {
        ErrorKind::InvalidInput => HWINPUT_INVALID_INPUT,
        ErrorKind::Mapping => HWINPUT_MAPPING,
        ErrorKind::Simulate => HWINPUT_SIMULATE,
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Opaque simulator handle.  Each call locks it, so one handle may be
/// shared between threads.
pub struct HwInput {
    inner: Mutex<Simulator<Box<dyn Platform + Send>>>,
}

#[cfg_attr(not(windows), allow(dead_code))]
fn into_handle<P: Platform + Send + 'static>(settings: &Settings, platform: P) -> *mut HwInput {
    let platform: Box<dyn Platform + Send> = Box::new(platform);
    Box::into_raw(Box::new(HwInput {
        inner: Mutex::new(Simulator::new(settings, platform)),
    }))
}

/// Run `f` against the simulator behind `handle`.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
unsafe fn with_simulator<F>(handle: *mut HwInput, f: F) -> i32
where
    F: FnOnce(&mut Simulator<Box<dyn Platform + Send>>) -> Result<(), InputError>,
{
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        set_last_error("handle is null");
        return HWINPUT_ERROR;
    };
    let mut sim = handle.inner.lock();
    match f(&mut sim) {
        Ok(()) => HWINPUT_OK,
        Err(e) => fail(&e),
    }
}

/// Parse optional settings JSON; null means defaults.
///
/// # Safety
///
/// `settings_json` must be null or a valid null-terminated C string.
#[cfg_attr(not(windows), allow(dead_code))]
unsafe fn parse_settings(settings_json: *const c_char) -> Result<Settings, InputError> {
    if settings_json.is_null() {
        return Ok(Settings::default());
    }
    let json = unsafe { CStr::from_ptr(settings_json) }
        .to_str()
        .map_err(|e| InputError::InvalidInput(format!("Invalid UTF-8: {e}")))?;
    Settings::from_json(json)
}

/// Create a simulator bound to the live Windows input queue.
///
/// # Safety
///
/// `settings_json` must be null or a valid null-terminated UTF-8 C string.
/// `out_handle` must be a valid pointer to a `*mut HwInput`.
#[cfg(windows)]
#[no_mangle]
pub unsafe extern "C" fn hwinput_new(
    settings_json: *const c_char,
    out_handle: *mut *mut HwInput,
) -> i32 {
    if out_handle.is_null() {
        set_last_error("out_handle is null");
        return HWINPUT_ERROR;
    }
    let settings = match unsafe { parse_settings(settings_json) } {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    let platform = hwinput_core::WindowsPlatform::new();
    if !platform.request_dpi_awareness() {
        log::debug!("hwinput_new: DPI awareness already set or refused");
    }
    unsafe { *out_handle = into_handle(&settings, platform) };
    HWINPUT_OK
}

/// Destroy a simulator, releasing everything it still holds (unless
/// disabled in its settings).
///
/// # Safety
///
/// `handle` must be null or a pointer from `hwinput_new()` not yet freed.
#[no_mangle]
pub unsafe extern "C" fn hwinput_free(handle: *mut HwInput) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

// ---------------------------------------------------------------------------
// Errors and strings
// ---------------------------------------------------------------------------

/// Retrieve the last error message (thread-local).
///
/// Returns a pointer valid until the next hwinput_* call on this thread.
/// Returns null if no error has occurred.
#[no_mangle]
pub extern "C" fn hwinput_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Free a string previously allocated by a hwinput_* function.
///
/// # Safety
///
/// `ptr` must be a pointer returned by a hwinput_* function or null.
#[no_mangle]
pub unsafe extern "C" fn hwinput_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Press, release or click the key with virtual-key code `vk`.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_key(handle: *mut HwInput, vk: u16, direction: i32) -> i32 {
    unsafe {
        with_simulator(handle, |sim| {
            let key = from_platform_code(vk)?;
            sim.key(key, Direction::try_from(direction)?)
        })
    }
}

/// Press, release or click a hardware scan code.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_raw(handle: *mut HwInput, scan: u16, direction: i32) -> i32 {
    unsafe { with_simulator(handle, |sim| sim.raw(scan, Direction::try_from(direction)?)) }
}

/// Type UTF-8 text.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
/// `text` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn hwinput_text(handle: *mut HwInput, text: *const c_char) -> i32 {
    if text.is_null() {
        set_last_error("text is null");
        return HWINPUT_ERROR;
    }
    let text_str = match unsafe { CStr::from_ptr(text) }.to_str() {
        Ok(s) => s,
        Err(e) => return fail(&InputError::InvalidInput(format!("Invalid UTF-8: {e}"))),
    };
    unsafe { with_simulator(handle, |sim| sim.text(text_str)) }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_button(handle: *mut HwInput, button: i32, direction: i32) -> i32 {
    unsafe {
        with_simulator(handle, |sim| {
            sim.button(Button::try_from(button)?, Direction::try_from(direction)?)
        })
    }
}

/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_scroll(handle: *mut HwInput, length: i32, axis: i32) -> i32 {
    unsafe { with_simulator(handle, |sim| sim.scroll(length, Axis::try_from(axis)?)) }
}

/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_move_mouse(
    handle: *mut HwInput,
    x: i32,
    y: i32,
    coordinate: i32,
) -> i32 {
    unsafe {
        with_simulator(handle, |sim| {
            sim.move_mouse(x, y, Coordinate::try_from(coordinate)?)
        })
    }
}

/// Current cursor position.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
/// `out_x` and `out_y` must be valid pointers to `i32`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_location(
    handle: *mut HwInput,
    out_x: *mut i32,
    out_y: *mut i32,
) -> i32 {
    if out_x.is_null() || out_y.is_null() {
        set_last_error("null pointer argument");
        return HWINPUT_ERROR;
    }
    unsafe {
        with_simulator(handle, |sim| {
            let (x, y) = sim.location()?;
            *out_x = x;
            *out_y = y;
            Ok(())
        })
    }
}

/// Primary display size in pixels.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
/// `out_width` and `out_height` must be valid pointers to `i32`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_main_display(
    handle: *mut HwInput,
    out_width: *mut i32,
    out_height: *mut i32,
) -> i32 {
    if out_width.is_null() || out_height.is_null() {
        set_last_error("null pointer argument");
        return HWINPUT_ERROR;
    }
    unsafe {
        with_simulator(handle, |sim| {
            let (width, height) = sim.main_display()?;
            *out_width = width;
            *out_height = height;
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Held keys and scan codes as a JSON string:
/// `{"keys":["Shift"],"scancodes":[30]}`.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
/// `out_json` must be a valid pointer to a `*mut c_char`.  On success,
/// `*out_json` is set to a heap-allocated JSON C string; free it with
/// `hwinput_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_held(handle: *mut HwInput, out_json: *mut *mut c_char) -> i32 {
    if out_json.is_null() {
        set_last_error("out_json is null");
        return HWINPUT_ERROR;
    }
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        set_last_error("handle is null");
        return HWINPUT_ERROR;
    };

    let held = handle.inner.lock().held();
    match serde_json::to_string(&held) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => {
                unsafe { *out_json = cstr.into_raw() };
                HWINPUT_OK
            }
            Err(e) => {
                set_last_error(&format!("CString conversion failed: {e}"));
                HWINPUT_ERROR
            }
        },
        Err(e) => {
            set_last_error(&format!("JSON serialization failed: {e}"));
            HWINPUT_ERROR
        }
    }
}

/// The `dwExtraInfo` marker attached to every event, or 0 for a null handle.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `hwinput_new()`.
#[no_mangle]
pub unsafe extern "C" fn hwinput_marker(handle: *mut HwInput) -> usize {
    match unsafe { handle.as_ref() } {
        Some(handle) => handle.inner.lock().marker(),
        None => 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
