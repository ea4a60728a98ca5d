//! Platform-independent action model: keys, buttons, directions, axes and
//! coordinate modes.
//!
//! Nothing here knows about virtual-key codes; see [`crate::keymap`] for the
//! translation table.

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// Raw 16-bit hardware scan code, used only by the raw-input path.
pub type ScanCode = u16;

/// Whether to synthesize the down half, the up half, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Down immediately followed by up, in the same batch.
    Click,
    Press,
    Release,
}

impl Direction {
    pub fn has_down(self) -> bool {
        matches!(self, Direction::Click | Direction::Press)
    }

    pub fn has_up(self) -> bool {
        matches!(self, Direction::Click | Direction::Release)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Left,
    Middle,
    Right,
    /// Typically "X1".
    Back,
    /// Typically "X2".
    Forward,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coordinate {
    /// Screen pixel coordinates on the primary display.
    Absolute,
    /// Offset from the current cursor position.
    Relative,
}

/// Logical keyboard keys.
///
/// Every variant except [`Key::Unicode`] maps to exactly one Windows
/// virtual-key code.  `Unicode` is a marker only; text entry never goes
/// through the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Top-row digits
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,

    // Editing
    Return, Tab, Space, Backspace, Escape, Delete, CapsLock,

    // Modifiers
    Control, Alt, Shift, Super, RightControl, RightAlt, RightShift, RightSuper,

    // Navigation
    Up, Down, Left, Right, Home, End, PageUp, PageDown, Insert,

    // Numeric pad
    NumLock,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadMultiply, NumpadAdd, NumpadSubtract, NumpadDivide, NumpadDecimal,

    // Misc
    PrintScreen, ScrollLock, Pause, Menu,

    Unicode,
}

// ---------------------------------------------------------------------------
// Integer conversions (C ABI callers)
// ---------------------------------------------------------------------------

impl TryFrom<i32> for Direction {
    type Error = InputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Click),
            1 => Ok(Direction::Press),
            2 => Ok(Direction::Release),
            other => Err(InputError::InvalidInput(format!("Invalid direction {other}"))),
        }
    }
}

impl TryFrom<i32> for Button {
    type Error = InputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Button::Left),
            1 => Ok(Button::Middle),
            2 => Ok(Button::Right),
            3 => Ok(Button::Back),
            4 => Ok(Button::Forward),
            5 => Ok(Button::ScrollUp),
            6 => Ok(Button::ScrollDown),
            7 => Ok(Button::ScrollLeft),
            8 => Ok(Button::ScrollRight),
            other => Err(InputError::InvalidInput(format!("Invalid button type {other}"))),
        }
    }
}

impl TryFrom<i32> for Axis {
    type Error = InputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Axis::Horizontal),
            1 => Ok(Axis::Vertical),
            other => Err(InputError::InvalidInput(format!("Invalid axis {other}"))),
        }
    }
}

impl TryFrom<i32> for Coordinate {
    type Error = InputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Coordinate::Absolute),
            1 => Ok(Coordinate::Relative),
            other => Err(InputError::InvalidInput(format!("Invalid coordinate mode {other}"))),
        }
    }
}
