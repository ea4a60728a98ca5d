//! Simulator configuration.
//!
//! A [`Settings`] value is copied into the simulator at construction;
//! changing it afterwards has no effect on an existing simulator.  Missing
//! JSON fields take their defaults, so `{}` is a valid document.

use serde::{Deserialize, Serialize};

use crate::errors::{InputError, Result};

/// Default `dwExtraInfo` marker identifying events from this library.
pub const EVENT_MARKER: usize = 0x1234_5678;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Opaque value attached to every record (`dwExtraInfo`).  0 selects
    /// [`EVENT_MARKER`].
    pub marker: usize,
    /// Release every held key and scan code when the simulator is dropped.
    pub auto_release_on_teardown: bool,
    /// Send relative moves as-is, subject to the OS pointer speed and
    /// acceleration.  When false, relative moves are converted to absolute
    /// ones so the pixel delta is exact.
    pub honor_os_mouse_acceleration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker: EVENT_MARKER,
            auto_release_on_teardown: true,
            honor_os_mouse_acceleration: false,
        }
    }
}

impl Settings {
    /// Parse settings from a (possibly partial) JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| InputError::InvalidInput(format!("Invalid settings JSON: {e}")))
    }

    /// The marker records will actually carry.
    pub fn effective_marker(&self) -> usize {
        if self.marker == 0 {
            EVENT_MARKER
        } else {
            self.marker
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.marker, 0x1234_5678);
        assert!(s.auto_release_on_teardown);
        assert!(!s.honor_os_mouse_acceleration);
    }

    #[test]
    fn test_partial_json() {
        let s = Settings::from_json(r#"{"honor_os_mouse_acceleration": true}"#).unwrap();
        assert!(s.honor_os_mouse_acceleration);
        assert_eq!(s.marker, EVENT_MARKER);
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{\"marker\": \"x\"}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_zero_marker_falls_back() {
        let s = Settings {
            marker: 0,
            ..Settings::default()
        };
        assert_eq!(s.effective_marker(), EVENT_MARKER);
        let s = Settings {
            marker: 42,
            ..Settings::default()
        };
        assert_eq!(s.effective_marker(), 42);
    }
}
