//! Win32 backend: `SendInput` injection plus the layout, geometry and
//! cursor queries the engine needs.
//!
//! # Safety
//!
//! `SendInput` is subject to UIPI: injection into a window of a higher
//! integrity level is silently dropped and the call returns 0.  The
//! dispatch gateway surfaces that as a `Simulate` error.

use std::ffi::c_void;

use windows::Win32::Foundation::{GetLastError, POINT};
use windows::Win32::UI::HiDpi::{SetProcessDpiAwareness, PROCESS_PER_MONITOR_DPI_AWARE};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyboardLayout, MapVirtualKeyExW, SendInput, HKL, INPUT, INPUT_0, INPUT_KEYBOARD,
    INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS, MAPVK_VK_TO_VSC_EX, MAPVK_VSC_TO_VK_EX,
    MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetForegroundWindow, GetSystemMetrics, GetWindowThreadProcessId, SM_CXSCREEN,
    SM_CYSCREEN,
};

use super::{LayoutHandle, MapDirection, Platform};
use crate::errors::{InputError, Result};
use crate::record::InputRecord;

/// Pre-computed size of `INPUT` struct for `SendInput` calls.
const INPUT_SIZE: i32 = std::mem::size_of::<INPUT>() as i32;

/// The live Windows input subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        WindowsPlatform
    }
}

// ---------------------------------------------------------------------------
// Helpers: build INPUT structs
// ---------------------------------------------------------------------------

fn to_win32_input(record: &InputRecord) -> INPUT {
    match record {
        InputRecord::Keyboard(ki) => INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(ki.vk),
                    wScan: ki.scan,
                    dwFlags: KEYBD_EVENT_FLAGS(ki.flags),
                    time: ki.time,
                    dwExtraInfo: ki.extra_info,
                },
            },
        },
        InputRecord::Mouse(mi) => INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: mi.dx,
                    dy: mi.dy,
                    // Win32 treats mouseData as signed for WHEEL/HWHEEL events.
                    // Rust `as u32` is a bitwise reinterpret, preserving the sign bits.
                    mouseData: mi.mouse_data as u32,
                    dwFlags: MOUSE_EVENT_FLAGS(mi.flags),
                    time: mi.time,
                    dwExtraInfo: mi.extra_info,
                },
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Platform impl
// ---------------------------------------------------------------------------

impl Platform for WindowsPlatform {
    fn submit_input(&self, records: &[InputRecord]) -> u32 {
        let inputs: Vec<INPUT> = records.iter().map(to_win32_input).collect();
        unsafe { SendInput(&inputs, INPUT_SIZE) }
    }

    fn last_error_code(&self) -> u32 {
        unsafe { GetLastError() }.0
    }

    /// Layout of the thread owning the foreground window, so translation
    /// matches what the receiving application will see.
    fn current_keyboard_layout(&self) -> LayoutHandle {
        let hkl = unsafe {
            let thread_id = GetWindowThreadProcessId(GetForegroundWindow(), None);
            GetKeyboardLayout(thread_id)
        };
        LayoutHandle(hkl.0 as isize)
    }

    fn translate_code(&self, code: u16, direction: MapDirection, layout: LayoutHandle) -> u16 {
        let map_type = match direction {
            MapDirection::VirtualKeyToScanCode => MAPVK_VK_TO_VSC_EX,
            MapDirection::ScanCodeToVirtualKey => MAPVK_VSC_TO_VK_EX,
        };
        let hkl = HKL(layout.0 as *mut c_void);
        unsafe { MapVirtualKeyExW(u32::from(code), map_type, hkl) as u16 }
    }

    fn primary_display_size(&self) -> Result<(i32, i32)> {
        // GetSystemMetrics returns 0 on failure
        let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        if width == 0 || height == 0 {
            return Err(InputError::simulate(
                "Could not get the dimensions of the screen",
            ));
        }
        Ok((width, height))
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }.map_err(|e| InputError::Simulate {
            message: "Could not get the current mouse location".into(),
            os_code: Some(e.code().0 as u32),
        })?;
        Ok((point.x, point.y))
    }

    fn request_dpi_awareness(&self) -> bool {
        set_dpi_awareness()
    }
}

/// Make the process per-monitor DPI aware so absolute coordinates are in
/// physical pixels on scaled displays.
///
/// Returns false if the call failed (typically: awareness already set, e.g.
/// by the application manifest).
pub fn set_dpi_awareness() -> bool {
    match unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) } {
        Ok(()) => true,
        Err(e) => {
            log::debug!("SetProcessDpiAwareness failed: {e}");
            false
        }
    }
}
