//! OS service seam.
//!
//! The engine consumes the operating system through the narrow, synchronous
//! [`Platform`] trait.  Two backends exist:
//!
//! | Backend | Purpose |
//! |---------|---------|
//! | [`WindowsPlatform`] | `SendInput`, `MapVirtualKeyExW`, `GetSystemMetrics`, `GetCursorPos` (Windows only) |
//! | [`RecordingPlatform`] | Records batches instead of injecting them (dry runs, tests) |

mod recording;
#[cfg(windows)]
mod win32;

pub use recording::RecordingPlatform;
#[cfg(windows)]
pub use win32::{set_dpi_awareness, WindowsPlatform};

use crate::errors::Result;
use crate::record::InputRecord;

/// Opaque keyboard layout handle (`HKL` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutHandle(pub isize);

/// Direction of a scan-code <-> virtual-key translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapDirection {
    /// `MAPVK_VK_TO_VSC_EX`
    VirtualKeyToScanCode,
    /// `MAPVK_VSC_TO_VK_EX`
    ScanCodeToVirtualKey,
}

/// Operating-system services consumed by the simulation engine.
///
/// Every method is a single synchronous call; implementations keep no
/// state the engine depends on between calls.
pub trait Platform {
    /// Deliver a batch of records to the input queue.  Returns how many
    /// were accepted; partial delivery is reported only through this count.
    fn submit_input(&self, records: &[InputRecord]) -> u32;

    /// OS error code describing the last failed call on this thread.
    fn last_error_code(&self) -> u32;

    fn current_keyboard_layout(&self) -> LayoutHandle;

    /// Translate between scan codes and virtual keys under `layout`.
    /// A result of 0 means "no mapping".
    fn translate_code(&self, code: u16, direction: MapDirection, layout: LayoutHandle) -> u16;

    /// Primary display `(width, height)` in pixels.
    fn primary_display_size(&self) -> Result<(i32, i32)>;

    /// Current cursor `(x, y)` in screen pixels.
    fn cursor_position(&self) -> Result<(i32, i32)>;

    /// Best effort per-monitor DPI awareness for the process.
    fn request_dpi_awareness(&self) -> bool;
}

impl<P: Platform + ?Sized> Platform for Box<P> {
    fn submit_input(&self, records: &[InputRecord]) -> u32 {
        (**self).submit_input(records)
    }

    fn last_error_code(&self) -> u32 {
        (**self).last_error_code()
    }

    fn current_keyboard_layout(&self) -> LayoutHandle {
        (**self).current_keyboard_layout()
    }

    fn translate_code(&self, code: u16, direction: MapDirection, layout: LayoutHandle) -> u16 {
        (**self).translate_code(code, direction, layout)
    }

    fn primary_display_size(&self) -> Result<(i32, i32)> {
        (**self).primary_display_size()
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        (**self).cursor_position()
    }

    fn request_dpi_awareness(&self) -> bool {
        (**self).request_dpi_awareness()
    }
}
