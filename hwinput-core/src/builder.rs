//! Event builder: semantic action -> platform input records.
//!
//! Every `queue_*` method appends to a caller-owned queue and never submits
//! anything; the only OS interaction is the layout lookup used to translate
//! between virtual keys and scan codes.  A zero translation result is a soft
//! failure: it is logged and the record carries code 0.

use crate::errors::{InputError, Result};
use crate::keymap::{is_extended_key, to_platform_code};
use crate::keys::{Axis, Button, Direction, Key, ScanCode};
use crate::normalize::scroll_delta;
use crate::platform::{MapDirection, Platform};
use crate::record::{
    InputRecord, KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_SCANCODE, KEYEVENTF_UNICODE,
    MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN,
    MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP,
    MOUSEEVENTF_XDOWN, MOUSEEVENTF_XUP, XBUTTON1, XBUTTON2,
};

/// What [`EventBuilder::queue_button`] did with a button request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvents {
    /// Button records were appended to the queue.
    Queued,
    /// A scroll pseudo-button was pressed: the caller should scroll one
    /// notch instead.  Nothing was queued.
    Scroll { length: i32, axis: Axis },
    /// Release of a scroll pseudo-button.  Nothing to do.
    Ignored,
}

/// Builds records stamped with `marker`, translating codes through
/// `platform`'s active keyboard layout.
pub struct EventBuilder<'p, P: ?Sized> {
    platform: &'p P,
    marker: usize,
}

impl<'p, P: Platform + ?Sized> EventBuilder<'p, P> {
    pub fn new(platform: &'p P, marker: usize) -> Self {
        Self { platform, marker }
    }

    fn translate(&self, code: u16, direction: MapDirection) -> u16 {
        let layout = self.platform.current_keyboard_layout();
        let translated = self.platform.translate_code(code, direction, layout);
        if translated == 0 {
            log::warn!("no {direction:?} mapping for 0x{code:04X} in layout {layout:?}");
        }
        translated
    }

    fn push_key_halves(
        &self,
        queue: &mut Vec<InputRecord>,
        flags: u32,
        vk: u16,
        scan: u16,
        direction: Direction,
    ) {
        if direction.has_down() {
            queue.push(InputRecord::keyboard(flags, vk, scan, self.marker));
        }
        if direction.has_up() {
            queue.push(InputRecord::keyboard(flags | KEYEVENTF_KEYUP, vk, scan, self.marker));
        }
    }

    /// Key by identity: virtual key from the key table, scan code from the
    /// active layout.
    pub fn queue_key(&self, queue: &mut Vec<InputRecord>, key: Key, direction: Direction) -> Result<()> {
        let vk = to_platform_code(key)?;
        let scan = self.translate(vk, MapDirection::VirtualKeyToScanCode);

        let mut flags = 0;
        if is_extended_key(vk) {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        self.push_key_halves(queue, flags, vk, scan, direction);
        Ok(())
    }

    /// Raw scan code: the OS derives the key from the scan code
    /// (`KEYEVENTF_SCANCODE`); the virtual key comes from the active layout
    /// and only decides the extended flag.
    pub fn queue_raw(&self, queue: &mut Vec<InputRecord>, scan: ScanCode, direction: Direction) {
        let vk = self.translate(scan, MapDirection::ScanCodeToVirtualKey);

        let mut flags = KEYEVENTF_SCANCODE;
        if is_extended_key(vk) {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        self.push_key_halves(queue, flags, vk, scan, direction);
    }

    /// Text entry.  `\n` and `\r` click Enter, `\t` clicks Tab; every other
    /// character is sent as `KEYEVENTF_UNICODE` down/up pairs, one pair per
    /// UTF-16 code unit (high surrogate first).
    ///
    /// Text containing a null character is rejected before anything is
    /// queued.
    pub fn queue_text(&self, queue: &mut Vec<InputRecord>, text: &str) -> Result<()> {
        if text.contains('\0') {
            return Err(InputError::InvalidInput(
                "The text contained a null byte".into(),
            ));
        }

        queue.reserve(2 * text.len());
        let mut buffer = [0u16; 2];
        for ch in text.chars() {
            match ch {
                '\n' | '\r' => self.queue_key(queue, Key::Return, Direction::Click)?,
                '\t' => self.queue_key(queue, Key::Tab, Direction::Click)?,
                _ => {
                    for &unit in ch.encode_utf16(&mut buffer).iter() {
                        self.push_key_halves(queue, KEYEVENTF_UNICODE, 0, unit, Direction::Click);
                    }
                }
            }
        }
        Ok(())
    }

    /// Mouse button.  Back/Forward carry their X button index.  Scroll
    /// pseudo-buttons queue nothing; see [`ButtonEvents`].
    pub fn queue_button(
        &self,
        queue: &mut Vec<InputRecord>,
        button: Button,
        direction: Direction,
    ) -> ButtonEvents {
        let (down, up, data) = match button {
            Button::Left => (MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, 0),
            Button::Middle => (MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, 0),
            Button::Right => (MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, 0),
            Button::Back => (MOUSEEVENTF_XDOWN, MOUSEEVENTF_XUP, XBUTTON1),
            Button::Forward => (MOUSEEVENTF_XDOWN, MOUSEEVENTF_XUP, XBUTTON2),
            Button::ScrollUp | Button::ScrollDown | Button::ScrollLeft | Button::ScrollRight => {
                if !direction.has_down() {
                    return ButtonEvents::Ignored;
                }
                let (length, axis) = match button {
                    Button::ScrollUp => (-1, Axis::Vertical),
                    Button::ScrollDown => (1, Axis::Vertical),
                    Button::ScrollLeft => (-1, Axis::Horizontal),
                    _ => (1, Axis::Horizontal),
                };
                return ButtonEvents::Scroll { length, axis };
            }
        };

        if direction.has_down() {
            queue.push(InputRecord::mouse(down, data, 0, 0, self.marker));
        }
        if direction.has_up() {
            queue.push(InputRecord::mouse(up, data, 0, 0, self.marker));
        }
        ButtonEvents::Queued
    }

    pub fn queue_scroll(&self, queue: &mut Vec<InputRecord>, length: i32, axis: Axis) {
        let (flags, data) = scroll_delta(length, axis);
        queue.push(InputRecord::mouse(flags, data, 0, 0, self.marker));
    }

    /// Move to already-normalized absolute coordinates.
    pub fn queue_move_absolute(&self, queue: &mut Vec<InputRecord>, dx: i32, dy: i32) {
        queue.push(InputRecord::mouse(
            MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE,
            0,
            dx,
            dy,
            self.marker,
        ));
    }

    /// Relative move, subject to the OS pointer acceleration.
    pub fn queue_move_relative(&self, queue: &mut Vec<InputRecord>, dx: i32, dy: i32) {
        queue.push(InputRecord::mouse(MOUSEEVENTF_MOVE, 0, dx, dy, self.marker));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
