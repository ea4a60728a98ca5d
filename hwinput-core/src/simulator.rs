//! Simulation facade.
//!
//! [`Simulator`] owns a platform backend, a snapshot of [`Settings`] and the
//! held-state for its lifetime.  Every operation builds its records, submits
//! them as one batch and returns after the OS call completes.
//!
//! # Thread safety
//!
//! Operations take `&mut self`; sharing a simulator between threads needs
//! an external lock around it (the C ABI wraps each handle in a
//! `parking_lot::Mutex`).

use crate::builder::{ButtonEvents, EventBuilder};
use crate::dispatch;
use crate::errors::Result;
use crate::held::{Held, HeldState};
use crate::keys::{Axis, Button, Coordinate, Direction, Key, ScanCode};
use crate::normalize::{normalize_absolute, relative_target};
use crate::platform::Platform;
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

pub trait Keyboard {
    /// Press, release or click a key by identity.
    fn key(&mut self, key: Key, direction: Direction) -> Result<()>;

    /// Press, release or click a hardware scan code.
    fn raw(&mut self, scan: ScanCode, direction: Direction) -> Result<()>;

    /// Type `text`, one batch for the whole string.
    fn text(&mut self, text: &str) -> Result<()>;
}

pub trait Mouse {
    fn button(&mut self, button: Button, direction: Direction) -> Result<()>;

    /// Scroll `length` notches.  Positive is down / right.
    fn scroll(&mut self, length: i32, axis: Axis) -> Result<()>;

    fn move_mouse(&mut self, x: i32, y: i32, coordinate: Coordinate) -> Result<()>;

    /// Primary display `(width, height)` in pixels.
    fn main_display(&self) -> Result<(i32, i32)>;

    /// Cursor `(x, y)` in screen pixels.
    fn location(&self) -> Result<(i32, i32)>;
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

pub struct Simulator<P: Platform> {
    platform: P,
    held: HeldState,
    marker: usize,
    auto_release_on_teardown: bool,
    honor_os_mouse_acceleration: bool,
}

impl<P: Platform> Simulator<P> {
    pub fn new(settings: &Settings, platform: P) -> Self {
        Self {
            platform,
            held: HeldState::default(),
            marker: settings.effective_marker(),
            auto_release_on_teardown: settings.auto_release_on_teardown,
            honor_os_mouse_acceleration: settings.honor_os_mouse_acceleration,
        }
    }

    fn builder(&self) -> EventBuilder<'_, P> {
        EventBuilder::new(&self.platform, self.marker)
    }

    /// Keys and scan codes currently held by this simulator.
    pub fn held(&self) -> Held {
        self.held.snapshot()
    }

    /// The `dwExtraInfo` value attached to every event.
    pub fn marker(&self) -> usize {
        self.marker
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Ask the OS for per-monitor DPI awareness.  Failure only affects the
    /// accuracy of absolute positioning on scaled displays.
    pub fn request_dpi_awareness(&self) -> bool {
        let aware = self.platform.request_dpi_awareness();
        if !aware {
            log::warn!("DPI awareness not granted; absolute moves may be off on scaled displays");
        }
        aware
    }

    /// Release everything still held, through the normal release path.
    ///
    /// Individual failures are logged and skipped so the whole state is
    /// always drained.  Returns how many releases failed.
    pub fn release_all(&mut self) -> usize {
        let held = self.held.snapshot();
        let mut failed = 0;

        for key in held.keys {
            if let Err(e) = self.key(key, Direction::Release) {
                log::warn!("failed to release held key {key:?}: {e}");
                failed += 1;
            }
        }
        for scan in held.scancodes {
            if let Err(e) = self.raw(scan, Direction::Release) {
                log::warn!("failed to release held scan code 0x{scan:04X}: {e}");
                failed += 1;
            }
        }
        failed
    }
}

impl<P: Platform> Keyboard for Simulator<P> {
    /// Held-state follows the requested direction even when delivery fails.
    fn key(&mut self, key: Key, direction: Direction) -> Result<()> {
        let mut queue = Vec::with_capacity(2);
        self.builder().queue_key(&mut queue, key, direction)?;
        let sent = dispatch::submit(&self.platform, &queue);

        match direction {
            Direction::Press => self.held.press_key(key),
            Direction::Release => self.held.release_key(key),
            Direction::Click => {}
        }
        sent.map(|_| ())
    }

    fn raw(&mut self, scan: ScanCode, direction: Direction) -> Result<()> {
        let mut queue = Vec::with_capacity(2);
        self.builder().queue_raw(&mut queue, scan, direction);
        let sent = dispatch::submit(&self.platform, &queue);

        match direction {
            Direction::Press => self.held.press_scancode(scan),
            Direction::Release => self.held.release_scancode(scan),
            Direction::Click => {}
        }
        sent.map(|_| ())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        let mut queue = Vec::new();
        self.builder().queue_text(&mut queue, text)?;
        dispatch::submit(&self.platform, &queue).map(|_| ())
    }
}

impl<P: Platform> Mouse for Simulator<P> {
    fn button(&mut self, button: Button, direction: Direction) -> Result<()> {
        let mut queue = Vec::with_capacity(2);
        match self.builder().queue_button(&mut queue, button, direction) {
            ButtonEvents::Queued => dispatch::submit(&self.platform, &queue).map(|_| ()),
            ButtonEvents::Scroll { length, axis } => self.scroll(length, axis),
            ButtonEvents::Ignored => Ok(()),
        }
    }

    fn scroll(&mut self, length: i32, axis: Axis) -> Result<()> {
        let mut queue = Vec::with_capacity(1);
        self.builder().queue_scroll(&mut queue, length, axis);
        dispatch::submit(&self.platform, &queue).map(|_| ())
    }

    fn move_mouse(&mut self, x: i32, y: i32, coordinate: Coordinate) -> Result<()> {
        let mut queue = Vec::with_capacity(1);
        match coordinate {
            Coordinate::Absolute => {
                let (width, height) = self.main_display()?;
                let (dx, dy) = normalize_absolute(x, y, width, height)?;
                self.builder().queue_move_absolute(&mut queue, dx, dy);
            }
            Coordinate::Relative if self.honor_os_mouse_acceleration => {
                self.builder().queue_move_relative(&mut queue, x, y);
            }
            Coordinate::Relative => {
                // The cursor may move between this query and the submission.
                let (tx, ty) = relative_target(self.location()?, x, y);
                return self.move_mouse(tx, ty, Coordinate::Absolute);
            }
        }
        dispatch::submit(&self.platform, &queue).map(|_| ())
    }

    fn main_display(&self) -> Result<(i32, i32)> {
        self.platform.primary_display_size()
    }

    fn location(&self) -> Result<(i32, i32)> {
        self.platform.cursor_position()
    }
}

impl<P: Platform> Drop for Simulator<P> {
    fn drop(&mut self) {
        if !self.auto_release_on_teardown || self.held.is_empty() {
            return;
        }
        let failed = self.release_all();
        if failed > 0 {
            log::warn!("{failed} held inputs could not be released on teardown");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, InputError};
    use crate::platform::RecordingPlatform;
    use crate::record::{
        InputRecord, KEYEVENTF_KEYUP, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_MOVE, MOUSEEVENTF_WHEEL,
        WHEEL_DELTA,
    };
    use crate::settings::EVENT_MARKER;

    fn simulator(settings: Settings) -> (Simulator<RecordingPlatform>, RecordingPlatform) {
        let platform = RecordingPlatform::new();
        (Simulator::new(&settings, platform.clone()), platform)
    }

    fn single_mouse(platform: &RecordingPlatform) -> (u32, i32, i32, i32) {
        let records = platform.records();
        assert_eq!(records.len(), 1);
        let mi = records[0].as_mouse().unwrap();
        (mi.flags, mi.dx, mi.dy, mi.mouse_data)
    }

    #[test]
    fn test_press_then_release_tracks_held() {
        let (mut sim, _p) = simulator(Settings::default());
        sim.key(Key::W, Direction::Press).unwrap();
        assert_eq!(sim.held().keys, vec![Key::W]);
        sim.key(Key::W, Direction::Release).unwrap();
        assert!(sim.held().keys.is_empty());
    }

    #[test]
    fn test_click_does_not_touch_held() {
        let (mut sim, p) = simulator(Settings::default());
        sim.key(Key::A, Direction::Click).unwrap();
        sim.raw(0x1E, Direction::Click).unwrap();
        assert!(sim.held().is_empty());
        assert_eq!(p.batches().len(), 2);
        assert_eq!(p.batches()[0].len(), 2);
    }

    #[test]
    fn test_raw_press_tracks_scancode() {
        let (mut sim, _p) = simulator(Settings::default());
        sim.raw(0x2A, Direction::Press).unwrap();
        sim.raw(0x2A, Direction::Press).unwrap();
        assert_eq!(sim.held().scancodes, vec![0x2A]);
        sim.raw(0x2A, Direction::Release).unwrap();
        assert!(sim.held().scancodes.is_empty());
    }

    #[test]
    fn test_partial_delivery_still_updates_held() {
        let (mut sim, p) = simulator(Settings::default());
        p.set_accept_limit(Some(0));
        p.set_error_code(1450);

        let err = sim.key(Key::W, Direction::Press).unwrap_err();
        assert_eq!(
            err,
            InputError::Simulate {
                message: "Not all input events were sent: 0 of 1 accepted".into(),
                os_code: Some(1450),
            }
        );
        assert_eq!(sim.held().keys, vec![Key::W]);

        assert!(sim.key(Key::W, Direction::Release).is_err());
        assert!(sim.held().keys.is_empty());
    }

    #[test]
    fn test_mapping_error_leaves_held_untouched() {
        let (mut sim, p) = simulator(Settings::default());
        let err = sim.key(Key::Unicode, Direction::Press).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Mapping);
        assert!(sim.held().is_empty());
        assert!(p.batches().is_empty());
    }

    #[test]
    fn test_text_is_one_batch() {
        let (mut sim, p) = simulator(Settings::default());
        sim.text("ok\n").unwrap();
        let batches = p.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 6);
    }

    #[test]
    fn test_text_with_null_sends_nothing() {
        let (mut sim, p) = simulator(Settings::default());
        let err = sim.text("a\0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(p.batches().is_empty());
    }

    #[test]
    fn test_empty_text_is_noop() {
        let (mut sim, p) = simulator(Settings::default());
        sim.text("").unwrap();
        assert!(p.batches().is_empty());
    }

    #[test]
    fn test_absolute_move_normalizes() {
        let (mut sim, p) = simulator(Settings::default());
        sim.move_mouse(960, 540, Coordinate::Absolute).unwrap();
        assert_eq!(
            single_mouse(&p),
            (MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE, 32785, 32798, 0)
        );
    }

    #[test]
    fn test_absolute_move_without_geometry_fails() {
        let (mut sim, p) = simulator(Settings::default());
        p.set_display_size(0, 0);
        let err = sim.move_mouse(1, 1, Coordinate::Absolute).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Simulate);
        assert!(p.batches().is_empty());
    }

    #[test]
    fn test_relative_move_bypasses_acceleration() {
        let (mut sim, p) = simulator(Settings::default());
        p.set_cursor_position(Some((500, 500)));
        sim.move_mouse(100, 0, Coordinate::Relative).unwrap();

        let expected = normalize_absolute(600, 500, 1920, 1080).unwrap();
        let (flags, dx, dy, _) = single_mouse(&p);
        assert_eq!(flags, MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE);
        assert_eq!((dx, dy), expected);
    }

    #[test]
    fn test_relative_move_with_acceleration() {
        let settings = Settings {
            honor_os_mouse_acceleration: true,
            ..Settings::default()
        };
        let (mut sim, p) = simulator(settings);
        p.set_cursor_position(None);
        sim.move_mouse(-15, 30, Coordinate::Relative).unwrap();
        assert_eq!(single_mouse(&p), (MOUSEEVENTF_MOVE, -15, 30, 0));
    }

    #[test]
    fn test_relative_move_cursor_failure() {
        let (mut sim, p) = simulator(Settings::default());
        p.set_cursor_position(None);
        let err = sim.move_mouse(1, 1, Coordinate::Relative).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Simulate);
    }

    #[test]
    fn test_scroll() {
        let (mut sim, p) = simulator(Settings::default());
        sim.scroll(3, Axis::Vertical).unwrap();
        assert_eq!(single_mouse(&p), (MOUSEEVENTF_WHEEL, 0, 0, -3 * WHEEL_DELTA));
    }

    #[test]
    fn test_scroll_button_redirects_to_scroll() {
        let (mut sim, p) = simulator(Settings::default());
        sim.button(Button::ScrollDown, Direction::Click).unwrap();
        assert_eq!(single_mouse(&p), (MOUSEEVENTF_WHEEL, 0, 0, -WHEEL_DELTA));

        p.clear();
        sim.button(Button::ScrollUp, Direction::Release).unwrap();
        assert!(p.batches().is_empty());
    }

    #[test]
    fn test_marker_on_every_record() {
        let settings = Settings {
            marker: 0,
            ..Settings::default()
        };
        let (mut sim, p) = simulator(settings);
        assert_eq!(sim.marker(), EVENT_MARKER);
        sim.key(Key::B, Direction::Click).unwrap();
        sim.button(Button::Left, Direction::Click).unwrap();
        for r in p.records() {
            let extra = match r {
                InputRecord::Keyboard(ki) => ki.extra_info,
                InputRecord::Mouse(mi) => mi.extra_info,
            };
            assert_eq!(extra, EVENT_MARKER);
        }
    }

    #[test]
    fn test_settings_are_copied() {
        let mut settings = Settings::default();
        let (mut sim, p) = simulator(settings.clone());
        settings.honor_os_mouse_acceleration = true;
        p.set_cursor_position(Some((10, 10)));
        sim.move_mouse(5, 5, Coordinate::Relative).unwrap();
        let (flags, ..) = single_mouse(&p);
        assert_eq!(flags, MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE);
    }

    #[test]
    fn test_drop_releases_held() {
        let platform = RecordingPlatform::new();
        {
            let mut sim = Simulator::new(&Settings::default(), platform.clone());
            sim.key(Key::Shift, Direction::Press).unwrap();
            sim.raw(0x1E, Direction::Press).unwrap();
            platform.clear();
        }
        let records = platform.records();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(InputRecord::is_key_up));
        assert_eq!(records[0].as_keyboard().unwrap().vk, 0x10);
        assert_eq!(records[1].as_keyboard().unwrap().scan, 0x1E);
    }

    #[test]
    fn test_drop_without_auto_release() {
        let platform = RecordingPlatform::new();
        let settings = Settings {
            auto_release_on_teardown: false,
            ..Settings::default()
        };
        {
            let mut sim = Simulator::new(&settings, platform.clone());
            sim.key(Key::Shift, Direction::Press).unwrap();
            platform.clear();
        }
        assert!(platform.records().is_empty());
    }

    #[test]
    fn test_release_all_swallows_failures() {
        let (mut sim, p) = simulator(Settings::default());
        sim.key(Key::A, Direction::Press).unwrap();
        sim.key(Key::B, Direction::Press).unwrap();
        sim.raw(0x30, Direction::Press).unwrap();
        p.set_accept_limit(Some(0));

        assert_eq!(sim.release_all(), 3);
        assert!(sim.held().is_empty());
    }

    #[test]
    fn test_release_all_sends_key_ups() {
        let (mut sim, p) = simulator(Settings::default());
        sim.key(Key::Control, Direction::Press).unwrap();
        p.clear();
        assert_eq!(sim.release_all(), 0);
        let ki = *p.records()[0].as_keyboard().unwrap();
        assert_eq!(ki.flags & KEYEVENTF_KEYUP, KEYEVENTF_KEYUP);
        assert!(sim.held().is_empty());
    }

    #[test]
    fn test_queries() {
        let (sim, p) = simulator(Settings::default());
        p.set_cursor_position(Some((12, 34)));
        assert_eq!(sim.location().unwrap(), (12, 34));
        assert_eq!(sim.main_display().unwrap(), (1920, 1080));
        p.set_dpi_awareness_result(false);
        assert!(!sim.request_dpi_awareness());
    }
}
