//! Coordinate normalization.
//!
//! Absolute mouse moves are expressed on the device-independent 0..=65535
//! axis; wheel movement in multiples of [`WHEEL_DELTA`].

use crate::errors::{InputError, Result};
use crate::keys::Axis;
use crate::record::{MOUSEEVENTF_HWHEEL, MOUSEEVENTF_WHEEL, WHEEL_DELTA};

/// Upper bound of the normalized absolute axis.
pub const ABSOLUTE_RANGE: i64 = 65535;

/// Wheel flag and signed platform delta for `length` notches.
///
/// Positive vertical input scrolls down, which Windows expresses as a
/// negative delta.  Horizontal input is passed through unchanged.
pub fn scroll_delta(length: i32, axis: Axis) -> (u32, i32) {
    match axis {
        Axis::Horizontal => (MOUSEEVENTF_HWHEEL, length.saturating_mul(WHEEL_DELTA)),
        Axis::Vertical => (MOUSEEVENTF_WHEEL, length.saturating_neg().saturating_mul(WHEEL_DELTA)),
    }
}

/// Scale one pixel coordinate onto the absolute axis.
///
/// `(pixel * 65535 + (span - 1) / 2 * sign(pixel)) / (span - 1)` with
/// truncating division: round to nearest, ties away from zero.
fn scale(pixel: i32, span: i32) -> i32 {
    let max = i64::from(span) - 1;
    let half = if pixel >= 0 { max / 2 } else { -(max / 2) };
    let scaled = (i64::from(pixel) * ABSOLUTE_RANGE + half) / max;
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Convert pixel `(x, y)` on a `width` x `height` display to normalized
/// absolute coordinates.
///
/// Fails with `Simulate` when the display geometry is unusable (a span of
/// 0 or 1 pixel leaves nothing to divide by).
pub fn normalize_absolute(x: i32, y: i32, width: i32, height: i32) -> Result<(i32, i32)> {
    if width <= 1 || height <= 1 {
        return Err(InputError::simulate(format!(
            "Display geometry unavailable ({width}x{height})"
        )));
    }
    Ok((scale(x, width), scale(y, height)))
}

/// Absolute pixel target of a relative move from `current`.
pub fn relative_target(current: (i32, i32), dx: i32, dy: i32) -> (i32, i32) {
    (current.0.saturating_add(dx), current.1.saturating_add(dy))
}
