//! In-memory platform that records batches instead of injecting them.
//!
//! Clones share one log (`Arc<parking_lot::Mutex<_>>`), so a caller can keep
//! a handle for inspection while a [`Simulator`](crate::Simulator) owns
//! another.  The keyboard layout is a fixed US set-1 scan-code table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{LayoutHandle, MapDirection, Platform};
use crate::errors::{InputError, Result};
use crate::record::InputRecord;

/// `LayoutHandle` reported for the built-in US table (`HKL` 0x04090409).
pub const US_LAYOUT: LayoutHandle = LayoutHandle(0x0409_0409);

/// (virtual key, extended scan code) pairs of a US keyboard.
const US_SCAN_CODES: &[(u16, u16)] = &[
    // Letters
    (0x41, 0x1E), (0x42, 0x30), (0x43, 0x2E), (0x44, 0x20), (0x45, 0x12),
    (0x46, 0x21), (0x47, 0x22), (0x48, 0x23), (0x49, 0x17), (0x4A, 0x24),
    (0x4B, 0x25), (0x4C, 0x26), (0x4D, 0x32), (0x4E, 0x31), (0x4F, 0x18),
    (0x50, 0x19), (0x51, 0x10), (0x52, 0x13), (0x53, 0x1F), (0x54, 0x14),
    (0x55, 0x16), (0x56, 0x2F), (0x57, 0x11), (0x58, 0x2D), (0x59, 0x15),
    (0x5A, 0x2C),
    // Digits
    (0x30, 0x0B), (0x31, 0x02), (0x32, 0x03), (0x33, 0x04), (0x34, 0x05),
    (0x35, 0x06), (0x36, 0x07), (0x37, 0x08), (0x38, 0x09), (0x39, 0x0A),
    // Editing
    (0x08, 0x0E), (0x09, 0x0F), (0x0D, 0x1C), (0x1B, 0x01), (0x20, 0x39),
    // Modifiers
    (0x10, 0x2A), (0x11, 0x1D), (0x12, 0x38), (0xA1, 0x36), (0xA3, 0xE01D), (0xA5, 0xE038),
    // Navigation
    (0x21, 0xE049), (0x22, 0xE051), (0x23, 0xE04F), (0x24, 0xE047), (0x25, 0xE04B),
    (0x26, 0xE048), (0x27, 0xE04D), (0x28, 0xE050), (0x2D, 0xE052), (0x2E, 0xE053),
    // Numeric pad
    (0x6F, 0xE035), (0x6A, 0x37), (0x6D, 0x4A), (0x6B, 0x4E),
];

#[derive(Debug)]
struct RecordingState {
    batches: Vec<Vec<InputRecord>>,
    display: (i32, i32),
    cursor: Option<(i32, i32)>,
    accept_limit: Option<u32>,
    error_code: u32,
    dpi_aware: bool,
    vk_to_scan: HashMap<u16, u16>,
    scan_to_vk: HashMap<u16, u16>,
}

/// Dry-run [`Platform`]: accepts everything (unless limited), answers
/// geometry and cursor queries from configured values.
#[derive(Debug, Clone)]
pub struct RecordingPlatform {
    state: Arc<Mutex<RecordingState>>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPlatform {
    /// A 1920x1080 display with the cursor at the origin and a US layout.
    pub fn new() -> Self {
        let vk_to_scan: HashMap<u16, u16> = US_SCAN_CODES.iter().copied().collect();
        let scan_to_vk = US_SCAN_CODES.iter().map(|&(vk, scan)| (scan, vk)).collect();
        Self {
            state: Arc::new(Mutex::new(RecordingState {
                batches: Vec::new(),
                display: (1920, 1080),
                cursor: Some((0, 0)),
                accept_limit: None,
                error_code: 0,
                dpi_aware: true,
                vk_to_scan,
                scan_to_vk,
            })),
        }
    }

    // -- configuration ------------------------------------------------------

    pub fn set_display_size(&self, width: i32, height: i32) {
        self.state.lock().display = (width, height);
    }

    /// `None` makes cursor queries fail.
    pub fn set_cursor_position(&self, position: Option<(i32, i32)>) {
        self.state.lock().cursor = position;
    }

    /// Accept at most `limit` records per batch; the rest are dropped and
    /// the batch reports a short count.
    pub fn set_accept_limit(&self, limit: Option<u32>) {
        self.state.lock().accept_limit = limit;
    }

    /// Code returned by `last_error_code`.
    pub fn set_error_code(&self, code: u32) {
        self.state.lock().error_code = code;
    }

    pub fn set_dpi_awareness_result(&self, aware: bool) {
        self.state.lock().dpi_aware = aware;
    }

    // -- inspection ---------------------------------------------------------

    /// Every delivered batch, in submission order.
    pub fn batches(&self) -> Vec<Vec<InputRecord>> {
        self.state.lock().batches.clone()
    }

    /// Every delivered record, flattened.
    pub fn records(&self) -> Vec<InputRecord> {
        self.state.lock().batches.iter().flatten().copied().collect()
    }

    pub fn clear(&self) {
        self.state.lock().batches.clear();
    }
}

impl Platform for RecordingPlatform {
    fn submit_input(&self, records: &[InputRecord]) -> u32 {
        let mut state = self.state.lock();
        let accepted = match state.accept_limit {
            Some(limit) => (limit as usize).min(records.len()),
            None => records.len(),
        };
        state.batches.push(records[..accepted].to_vec());
        accepted as u32
    }

    fn last_error_code(&self) -> u32 {
        self.state.lock().error_code
    }

    fn current_keyboard_layout(&self) -> LayoutHandle {
        US_LAYOUT
    }

    fn translate_code(&self, code: u16, direction: MapDirection, layout: LayoutHandle) -> u16 {
        if layout != US_LAYOUT {
            return 0;
        }
        let state = self.state.lock();
        let table = match direction {
            MapDirection::VirtualKeyToScanCode => &state.vk_to_scan,
            MapDirection::ScanCodeToVirtualKey => &state.scan_to_vk,
        };
        table.get(&code).copied().unwrap_or(0)
    }

    fn primary_display_size(&self) -> Result<(i32, i32)> {
        let (width, height) = self.state.lock().display;
        if width == 0 || height == 0 {
            return Err(InputError::simulate(
                "Could not get the dimensions of the screen",
            ));
        }
        Ok((width, height))
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        self.state
            .lock()
            .cursor
            .ok_or_else(|| InputError::simulate("Could not get the current mouse location"))
    }

    fn request_dpi_awareness(&self) -> bool {
        self.state.lock().dpi_aware
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_translation_both_directions() {
        let p = RecordingPlatform::new();
        let layout = p.current_keyboard_layout();
        assert_eq!(p.translate_code(0x57, MapDirection::VirtualKeyToScanCode, layout), 0x11);
        assert_eq!(p.translate_code(0x11, MapDirection::ScanCodeToVirtualKey, layout), 0x57);
        assert_eq!(p.translate_code(0xE048, MapDirection::ScanCodeToVirtualKey, layout), 0x26);
        assert_eq!(p.translate_code(0x7F, MapDirection::ScanCodeToVirtualKey, layout), 0);
        assert_eq!(
            p.translate_code(0x57, MapDirection::VirtualKeyToScanCode, LayoutHandle(1)),
            0
        );
    }

    #[test]
    fn test_accept_limit_truncates_batch() {
        let p = RecordingPlatform::new();
        p.set_accept_limit(Some(1));
        let batch = [
            InputRecord::keyboard(0, 0x41, 0x1E, 0),
            InputRecord::keyboard(0x2, 0x41, 0x1E, 0),
        ];
        assert_eq!(p.submit_input(&batch), 1);
        assert_eq!(p.records(), vec![batch[0]]);
    }

    #[test]
    fn test_clones_share_log() {
        let p = RecordingPlatform::new();
        let observer = p.clone();
        p.submit_input(&[InputRecord::mouse(0x1, 0, 5, 5, 0)]);
        assert_eq!(observer.batches().len(), 1);
        observer.clear();
        assert!(p.records().is_empty());
    }

    #[test]
    fn test_geometry_failures() {
        let p = RecordingPlatform::new();
        assert_eq!(p.primary_display_size().unwrap(), (1920, 1080));
        p.set_display_size(0, 1080);
        assert_eq!(p.primary_display_size().unwrap_err().kind(), ErrorKind::Simulate);
        p.set_cursor_position(None);
        assert_eq!(p.cursor_position().unwrap_err().kind(), ErrorKind::Simulate);
    }
}
