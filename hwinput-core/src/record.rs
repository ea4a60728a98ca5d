//! Platform input records.
//!
//! [`InputRecord`] mirrors the Win32 `INPUT` union (`KEYBDINPUT` /
//! `MOUSEINPUT`) field for field, but is a plain Rust value so the event
//! builder stays pure and testable on any host.  The Windows backend
//! converts records to `INPUT` at the `SendInput` boundary.
//!
//! `time` is always 0: the OS stamps the event with the current system
//! time, exactly as it does for hardware-sourced events.

use serde::Serialize;

// Keyboard flags (KEYBDINPUT.dwFlags)
pub const KEYEVENTF_EXTENDEDKEY: u32 = 0x0001;
pub const KEYEVENTF_KEYUP: u32 = 0x0002;
pub const KEYEVENTF_UNICODE: u32 = 0x0004;
pub const KEYEVENTF_SCANCODE: u32 = 0x0008;

// Mouse flags (MOUSEINPUT.dwFlags)
pub const MOUSEEVENTF_MOVE: u32 = 0x0001;
pub const MOUSEEVENTF_LEFTDOWN: u32 = 0x0002;
pub const MOUSEEVENTF_LEFTUP: u32 = 0x0004;
pub const MOUSEEVENTF_RIGHTDOWN: u32 = 0x0008;
pub const MOUSEEVENTF_RIGHTUP: u32 = 0x0010;
pub const MOUSEEVENTF_MIDDLEDOWN: u32 = 0x0020;
pub const MOUSEEVENTF_MIDDLEUP: u32 = 0x0040;
pub const MOUSEEVENTF_XDOWN: u32 = 0x0080;
pub const MOUSEEVENTF_XUP: u32 = 0x0100;
pub const MOUSEEVENTF_WHEEL: u32 = 0x0800;
pub const MOUSEEVENTF_HWHEEL: u32 = 0x1000;
pub const MOUSEEVENTF_ABSOLUTE: u32 = 0x8000;

/// One wheel notch.
pub const WHEEL_DELTA: i32 = 120;

/// `mouseData` values for the X buttons.
pub const XBUTTON1: i32 = 0x0001;
pub const XBUTTON2: i32 = 0x0002;

/// Keyboard half of the `INPUT` union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyboardInput {
    pub vk: u16,
    /// Scan code, or the UTF-16 code unit when `KEYEVENTF_UNICODE` is set.
    pub scan: u16,
    pub flags: u32,
    pub time: u32,
    pub extra_info: usize,
}

/// Mouse half of the `INPUT` union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MouseInput {
    pub dx: i32,
    pub dy: i32,
    /// Signed wheel delta, or the X button index.
    pub mouse_data: i32,
    pub flags: u32,
    pub time: u32,
    pub extra_info: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputRecord {
    Keyboard(KeyboardInput),
    Mouse(MouseInput),
}

impl InputRecord {
    pub fn keyboard(flags: u32, vk: u16, scan: u16, extra_info: usize) -> Self {
        InputRecord::Keyboard(KeyboardInput {
            vk,
            scan,
            flags,
            time: 0,
            extra_info,
        })
    }

    pub fn mouse(flags: u32, data: i32, dx: i32, dy: i32, extra_info: usize) -> Self {
        InputRecord::Mouse(MouseInput {
            dx,
            dy,
            mouse_data: data,
            flags,
            time: 0,
            extra_info,
        })
    }

    pub fn as_keyboard(&self) -> Option<&KeyboardInput> {
        match self {
            InputRecord::Keyboard(ki) => Some(ki),
            InputRecord::Mouse(_) => None,
        }
    }

    pub fn as_mouse(&self) -> Option<&MouseInput> {
        match self {
            InputRecord::Mouse(mi) => Some(mi),
            InputRecord::Keyboard(_) => None,
        }
    }

    /// True for keyboard records carrying `KEYEVENTF_KEYUP`.
    pub fn is_key_up(&self) -> bool {
        self.as_keyboard()
            .is_some_and(|ki| ki.flags & KEYEVENTF_KEYUP != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_record_has_zero_time() {
        let r = InputRecord::keyboard(KEYEVENTF_KEYUP, 0x57, 0x11, 0x1234_5678);
        let ki = r.as_keyboard().unwrap();
        assert_eq!(ki.time, 0);
        assert_eq!(ki.extra_info, 0x1234_5678);
        assert!(r.is_key_up());
        assert!(r.as_mouse().is_none());
    }

    #[test]
    fn test_mouse_record_serialization() {
        let r = InputRecord::mouse(MOUSEEVENTF_WHEEL, -WHEEL_DELTA, 0, 0, 7);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"mouse_data\":-120"));
        assert!(json.contains("\"flags\":2048"));
        assert!(!r.is_key_up());
    }
}
