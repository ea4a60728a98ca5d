//! Held-state tracker.
//!
//! Local bookkeeping of the keys and scan codes this simulator has pressed
//! and not yet released.  It is not a system-wide truth: a release sent by
//! another process is invisible here.
//!
//! Policy: a value is held at most once.  A repeated press does not add a
//! second entry and a release removes every matching entry, so one release
//! always clears a key no matter how often it was pressed.

use serde::Serialize;

use crate::keys::{Key, ScanCode};

/// Snapshot of held keys and scan codes, in press order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Held {
    pub keys: Vec<Key>,
    pub scancodes: Vec<ScanCode>,
}

impl Held {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.scancodes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct HeldState {
    keys: Vec<Key>,
    scancodes: Vec<ScanCode>,
}

fn press<T: PartialEq>(held: &mut Vec<T>, value: T) {
    if !held.contains(&value) {
        held.push(value);
    }
}

fn release<T: PartialEq>(held: &mut Vec<T>, value: &T) {
    held.retain(|v| v != value);
}

impl HeldState {
    pub fn press_key(&mut self, key: Key) {
        press(&mut self.keys, key);
    }

    pub fn release_key(&mut self, key: Key) {
        release(&mut self.keys, &key);
    }

    pub fn press_scancode(&mut self, scan: ScanCode) {
        press(&mut self.scancodes, scan);
    }

    pub fn release_scancode(&mut self, scan: ScanCode) {
        release(&mut self.scancodes, &scan);
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Held {
        Held {
            keys: self.keys.clone(),
            scancodes: self.scancodes.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.scancodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut s = HeldState::default();
        s.press_key(Key::W);
        assert_eq!(s.snapshot().keys, vec![Key::W]);
        s.release_key(Key::W);
        assert!(s.snapshot().keys.is_empty());
    }

    #[test]
    fn test_repeated_press_holds_once() {
        let mut s = HeldState::default();
        s.press_key(Key::Shift);
        s.press_key(Key::A);
        s.press_key(Key::Shift);
        assert_eq!(s.snapshot().keys, vec![Key::Shift, Key::A]);
        s.release_key(Key::Shift);
        assert_eq!(s.snapshot().keys, vec![Key::A]);
    }

    #[test]
    fn test_release_of_unheld_is_noop() {
        let mut s = HeldState::default();
        s.press_scancode(0x1E);
        s.release_scancode(0x30);
        assert_eq!(s.snapshot().scancodes, vec![0x1E]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut s = HeldState::default();
        s.press_scancode(0x1E);
        let snap = s.snapshot();
        s.release_scancode(0x1E);
        assert_eq!(snap.scancodes, vec![0x1E]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut s = HeldState::default();
        s.press_key(Key::Control);
        s.press_scancode(0x2A);
        let json = serde_json::to_string(&s.snapshot()).unwrap();
        assert_eq!(json, "{\"keys\":[\"Control\"],\"scancodes\":[42]}");
    }
}
