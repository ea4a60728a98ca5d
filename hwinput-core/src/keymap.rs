//! Windows virtual-key code (u16) <-> [`Key`] mapping.
//!
//! VK codes are from the Windows SDK (winuser.h).  The table is injective:
//! no two keys share a code, so [`from_platform_code`] inverts
//! [`to_platform_code`] for every key except [`Key::Unicode`], which has no
//! virtual key at all.

use crate::errors::{InputError, Result};
use crate::keys::Key;

/// Windows virtual-key code.
pub type PlatformCode = u16;

pub const VK_BACK: u16 = 0x08;
pub const VK_TAB: u16 = 0x09;
pub const VK_RETURN: u16 = 0x0D;
pub const VK_SHIFT: u16 = 0x10;
pub const VK_CONTROL: u16 = 0x11;
pub const VK_MENU: u16 = 0x12;
pub const VK_PAUSE: u16 = 0x13;
pub const VK_CAPITAL: u16 = 0x14;
pub const VK_ESCAPE: u16 = 0x1B;
pub const VK_SPACE: u16 = 0x20;
pub const VK_PRIOR: u16 = 0x21;
pub const VK_NEXT: u16 = 0x22;
pub const VK_END: u16 = 0x23;
pub const VK_HOME: u16 = 0x24;
pub const VK_LEFT: u16 = 0x25;
pub const VK_UP: u16 = 0x26;
pub const VK_RIGHT: u16 = 0x27;
pub const VK_DOWN: u16 = 0x28;
pub const VK_SNAPSHOT: u16 = 0x2C;
pub const VK_INSERT: u16 = 0x2D;
pub const VK_DELETE: u16 = 0x2E;
pub const VK_LWIN: u16 = 0x5B;
pub const VK_RWIN: u16 = 0x5C;
pub const VK_APPS: u16 = 0x5D;
pub const VK_NUMPAD0: u16 = 0x60;
pub const VK_MULTIPLY: u16 = 0x6A;
pub const VK_ADD: u16 = 0x6B;
pub const VK_SUBTRACT: u16 = 0x6D;
pub const VK_DECIMAL: u16 = 0x6E;
pub const VK_DIVIDE: u16 = 0x6F;
pub const VK_F1: u16 = 0x70;
pub const VK_NUMLOCK: u16 = 0x90;
pub const VK_SCROLL: u16 = 0x91;
pub const VK_RSHIFT: u16 = 0xA1;
pub const VK_RCONTROL: u16 = 0xA3;
pub const VK_RMENU: u16 = 0xA5;

/// Converts a [`Key`] to its Windows virtual-key code.
///
/// Fails with [`InputError::Mapping`] for [`Key::Unicode`].
pub fn to_platform_code(key: Key) -> Result<PlatformCode> {
    let vk = match key {
        // Letters (VK_A = 0x41 .. VK_Z = 0x5A, same as ASCII uppercase)
        Key::A => 0x41,
        Key::B => 0x42,
        Key::C => 0x43,
        Key::D => 0x44,
        Key::E => 0x45,
        Key::F => 0x46,
        Key::G => 0x47,
        Key::H => 0x48,
        Key::I => 0x49,
        Key::J => 0x4A,
        Key::K => 0x4B,
        Key::L => 0x4C,
        Key::M => 0x4D,
        Key::N => 0x4E,
        Key::O => 0x4F,
        Key::P => 0x50,
        Key::Q => 0x51,
        Key::R => 0x52,
        Key::S => 0x53,
        Key::T => 0x54,
        Key::U => 0x55,
        Key::V => 0x56,
        Key::W => 0x57,
        Key::X => 0x58,
        Key::Y => 0x59,
        Key::Z => 0x5A,

        // Top-row digits (VK_0 = 0x30 .. VK_9 = 0x39, same as ASCII)
        Key::Num0 => 0x30,
        Key::Num1 => 0x31,
        Key::Num2 => 0x32,
        Key::Num3 => 0x33,
        Key::Num4 => 0x34,
        Key::Num5 => 0x35,
        Key::Num6 => 0x36,
        Key::Num7 => 0x37,
        Key::Num8 => 0x38,
        Key::Num9 => 0x39,

        // Function keys (VK_F1 = 0x70 .. VK_F24 = 0x87)
        Key::F1 => 0x70,
        Key::F2 => 0x71,
        Key::F3 => 0x72,
        Key::F4 => 0x73,
        Key::F5 => 0x74,
        Key::F6 => 0x75,
        Key::F7 => 0x76,
        Key::F8 => 0x77,
        Key::F9 => 0x78,
        Key::F10 => 0x79,
        Key::F11 => 0x7A,
        Key::F12 => 0x7B,
        Key::F13 => 0x7C,
        Key::F14 => 0x7D,
        Key::F15 => 0x7E,
        Key::F16 => 0x7F,
        Key::F17 => 0x80,
        Key::F18 => 0x81,
        Key::F19 => 0x82,
        Key::F20 => 0x83,
        Key::F21 => 0x84,
        Key::F22 => 0x85,
        Key::F23 => 0x86,
        Key::F24 => 0x87,

        // Editing
        Key::Return => VK_RETURN,
        Key::Tab => VK_TAB,
        Key::Space => VK_SPACE,
        Key::Backspace => VK_BACK,
        Key::Escape => VK_ESCAPE,
        Key::Delete => VK_DELETE,
        Key::CapsLock => VK_CAPITAL,

        // Modifiers -- the unsided VK for the left-hand key, sided VK for the right.
        Key::Control => VK_CONTROL,
        Key::Alt => VK_MENU,
        Key::Shift => VK_SHIFT,
        Key::Super => VK_LWIN,
        Key::RightControl => VK_RCONTROL,
        Key::RightAlt => VK_RMENU,
        Key::RightShift => VK_RSHIFT,
        Key::RightSuper => VK_RWIN,

        // Navigation
        Key::Up => VK_UP,
        Key::Down => VK_DOWN,
        Key::Left => VK_LEFT,
        Key::Right => VK_RIGHT,
        Key::Home => VK_HOME,
        Key::End => VK_END,
        Key::PageUp => VK_PRIOR,
        Key::PageDown => VK_NEXT,
        Key::Insert => VK_INSERT,

        // Numeric pad (VK_NUMPAD0 = 0x60 .. VK_NUMPAD9 = 0x69)
        Key::NumLock => VK_NUMLOCK,
        Key::Numpad0 => 0x60,
        Key::Numpad1 => 0x61,
        Key::Numpad2 => 0x62,
        Key::Numpad3 => 0x63,
        Key::Numpad4 => 0x64,
        Key::Numpad5 => 0x65,
        Key::Numpad6 => 0x66,
        Key::Numpad7 => 0x67,
        Key::Numpad8 => 0x68,
        Key::Numpad9 => 0x69,
        Key::NumpadMultiply => VK_MULTIPLY,
        Key::NumpadAdd => VK_ADD,
        Key::NumpadSubtract => VK_SUBTRACT,
        Key::NumpadDivide => VK_DIVIDE,
        Key::NumpadDecimal => VK_DECIMAL,

        // Misc
        Key::PrintScreen => VK_SNAPSHOT,
        Key::ScrollLock => VK_SCROLL,
        Key::Pause => VK_PAUSE,
        Key::Menu => VK_APPS,

        Key::Unicode => {
            return Err(InputError::Mapping(
                "Key::Unicode has no virtual-key code".into(),
            ))
        }
    };
    Ok(vk)
}

/// Converts a Windows virtual-key code back to a [`Key`].
///
/// Fails with [`InputError::Mapping`] for any code outside the table.
pub fn from_platform_code(vk: PlatformCode) -> Result<Key> {
    let key = match vk {
        0x41 => Key::A,
        0x42 => Key::B,
        0x43 => Key::C,
        0x44 => Key::D,
        0x45 => Key::E,
        0x46 => Key::F,
        0x47 => Key::G,
        0x48 => Key::H,
        0x49 => Key::I,
        0x4A => Key::J,
        0x4B => Key::K,
        0x4C => Key::L,
        0x4D => Key::M,
        0x4E => Key::N,
        0x4F => Key::O,
        0x50 => Key::P,
        0x51 => Key::Q,
        0x52 => Key::R,
        0x53 => Key::S,
        0x54 => Key::T,
        0x55 => Key::U,
        0x56 => Key::V,
        0x57 => Key::W,
        0x58 => Key::X,
        0x59 => Key::Y,
        0x5A => Key::Z,

        0x30 => Key::Num0,
        0x31 => Key::Num1,
        0x32 => Key::Num2,
        0x33 => Key::Num3,
        0x34 => Key::Num4,
        0x35 => Key::Num5,
        0x36 => Key::Num6,
        0x37 => Key::Num7,
        0x38 => Key::Num8,
        0x39 => Key::Num9,

        0x70 => Key::F1,
        0x71 => Key::F2,
        0x72 => Key::F3,
        0x73 => Key::F4,
        0x74 => Key::F5,
        0x75 => Key::F6,
        0x76 => Key::F7,
        0x77 => Key::F8,
        0x78 => Key::F9,
        0x79 => Key::F10,
        0x7A => Key::F11,
        0x7B => Key::F12,
        0x7C => Key::F13,
        0x7D => Key::F14,
        0x7E => Key::F15,
        0x7F => Key::F16,
        0x80 => Key::F17,
        0x81 => Key::F18,
        0x82 => Key::F19,
        0x83 => Key::F20,
        0x84 => Key::F21,
        0x85 => Key::F22,
        0x86 => Key::F23,
        0x87 => Key::F24,

        VK_RETURN => Key::Return,
        VK_TAB => Key::Tab,
        VK_SPACE => Key::Space,
        VK_BACK => Key::Backspace,
        VK_ESCAPE => Key::Escape,
        VK_DELETE => Key::Delete,
        VK_CAPITAL => Key::CapsLock,

        VK_CONTROL => Key::Control,
        VK_MENU => Key::Alt,
        VK_SHIFT => Key::Shift,
        VK_LWIN => Key::Super,
        VK_RCONTROL => Key::RightControl,
        VK_RMENU => Key::RightAlt,
        VK_RSHIFT => Key::RightShift,
        VK_RWIN => Key::RightSuper,

        VK_UP => Key::Up,
        VK_DOWN => Key::Down,
        VK_LEFT => Key::Left,
        VK_RIGHT => Key::Right,
        VK_HOME => Key::Home,
        VK_END => Key::End,
        VK_PRIOR => Key::PageUp,
        VK_NEXT => Key::PageDown,
        VK_INSERT => Key::Insert,

        VK_NUMLOCK => Key::NumLock,
        0x60 => Key::Numpad0,
        0x61 => Key::Numpad1,
        0x62 => Key::Numpad2,
        0x63 => Key::Numpad3,
        0x64 => Key::Numpad4,
        0x65 => Key::Numpad5,
        0x66 => Key::Numpad6,
        0x67 => Key::Numpad7,
        0x68 => Key::Numpad8,
        0x69 => Key::Numpad9,
        VK_MULTIPLY => Key::NumpadMultiply,
        VK_ADD => Key::NumpadAdd,
        VK_SUBTRACT => Key::NumpadSubtract,
        VK_DIVIDE => Key::NumpadDivide,
        VK_DECIMAL => Key::NumpadDecimal,

        VK_SNAPSHOT => Key::PrintScreen,
        VK_SCROLL => Key::ScrollLock,
        VK_PAUSE => Key::Pause,
        VK_APPS => Key::Menu,

        other => {
            return Err(InputError::Mapping(format!(
                "Unsupported virtual key code 0x{other:02X}"
            )))
        }
    };
    Ok(key)
}

/// Whether `vk` needs `KEYEVENTF_EXTENDEDKEY`: its scan code aliases a
/// non-extended key (arrow cluster vs. numeric pad, right vs. left modifier).
pub fn is_extended_key(vk: PlatformCode) -> bool {
    matches!(
        vk,
        VK_RMENU
            | VK_RCONTROL
            | VK_UP
            | VK_DOWN
            | VK_LEFT
            | VK_RIGHT
            | VK_INSERT
            | VK_DELETE
            | VK_HOME
            | VK_END
            | VK_PRIOR
            | VK_NEXT
            | VK_NUMLOCK
            | VK_SNAPSHOT
            | VK_DIVIDE
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::errors::ErrorKind;

    /// Every concrete key, i.e. everything except `Key::Unicode`.
    const ALL_KEYS: &[Key] = &[
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I, Key::J, Key::K,
        Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R, Key::S, Key::T, Key::U, Key::V,
        Key::W, Key::X, Key::Y, Key::Z, Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
        Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9, Key::F1, Key::F2, Key::F3,
        Key::F4, Key::F5, Key::F6, Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
        Key::F13, Key::F14, Key::F15, Key::F16, Key::F17, Key::F18, Key::F19, Key::F20,
        Key::F21, Key::F22, Key::F23, Key::F24, Key::Return, Key::Tab, Key::Space,
        Key::Backspace, Key::Escape, Key::Delete, Key::CapsLock, Key::Control, Key::Alt,
        Key::Shift, Key::Super, Key::RightControl, Key::RightAlt, Key::RightShift,
        Key::RightSuper, Key::Up, Key::Down, Key::Left, Key::Right, Key::Home, Key::End,
        Key::PageUp, Key::PageDown, Key::Insert, Key::NumLock, Key::Numpad0, Key::Numpad1,
        Key::Numpad2, Key::Numpad3, Key::Numpad4, Key::Numpad5, Key::Numpad6, Key::Numpad7,
        Key::Numpad8, Key::Numpad9, Key::NumpadMultiply, Key::NumpadAdd, Key::NumpadSubtract,
        Key::NumpadDivide, Key::NumpadDecimal, Key::PrintScreen, Key::ScrollLock, Key::Pause,
        Key::Menu,
    ];

    #[test]
    fn test_round_trip_every_key() {
        for &key in ALL_KEYS {
            let vk = to_platform_code(key).unwrap();
            assert_eq!(from_platform_code(vk).unwrap(), key, "vk 0x{vk:02X}");
        }
    }

    #[test]
    fn test_table_is_injective() {
        let codes: HashSet<u16> = ALL_KEYS
            .iter()
            .map(|&k| to_platform_code(k).unwrap())
            .collect();
        assert_eq!(codes.len(), ALL_KEYS.len());
    }

    #[test]
    fn test_unicode_has_no_code() {
        let err = to_platform_code(Key::Unicode).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Mapping);
    }

    #[test]
    fn test_unknown_code_fails() {
        for vk in [0x00, 0x07, 0x3A, 0xA0, 0xA2, 0xA4, 0xFF] {
            let err = from_platform_code(vk).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Mapping, "vk 0x{vk:02X}");
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(to_platform_code(Key::W).unwrap(), 0x57);
        assert_eq!(to_platform_code(Key::F24).unwrap(), 0x87);
        assert_eq!(to_platform_code(Key::Numpad9).unwrap(), 0x69);
        assert_eq!(to_platform_code(Key::Menu).unwrap(), VK_APPS);
    }

    #[test]
    fn test_extended_keys() {
        for key in [Key::RightAlt, Key::RightControl, Key::Up, Key::PageDown, Key::NumLock, Key::PrintScreen, Key::NumpadDivide] {
            assert!(is_extended_key(to_platform_code(key).unwrap()), "{key:?}");
        }
        for key in [Key::A, Key::Alt, Key::Control, Key::RightShift, Key::Numpad8, Key::Return] {
            assert!(!is_extended_key(to_platform_code(key).unwrap()), "{key:?}");
        }
    }
}
