//! `hwinput_core` -- keyboard and mouse input simulation at the level of
//! the OS input queue.
//!
//! Events are built as platform input records and submitted in atomic
//! batches, so receiving applications see them exactly as they would see
//! hardware-generated events (zero timestamp stamped by the OS, scan codes
//! from the active layout).  It can be consumed by:
//! - Rust callers directly, through [`Simulator`]
//! - `hwinput-ffi` (C ABI DLL for ctypes / other languages)
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `InputError` enum via `thiserror` |
//! | [`keys`] | `Key`, `Button`, `Direction`, `Axis`, `Coordinate` |
//! | [`keymap`] | `Key` <-> virtual-key table, extended-key set |
//! | [`record`] | `InputRecord` (`KEYBDINPUT` / `MOUSEINPUT` mirror) and flags |
//! | [`builder`] | Semantic action -> records |
//! | [`normalize`] | Absolute-axis scaling, wheel deltas |
//! | [`dispatch`] | Batch submission and accepted-count validation |
//! | [`held`] | Held keys / scan codes |
//! | [`platform`] | `Platform` trait, Win32 and recording backends |
//! | [`settings`] | `Settings` (serde) |
//! | [`simulator`] | `Simulator` facade, `Keyboard` / `Mouse` traits |
//!
//! # Example
//!
//! ```rust,no_run
//! use hwinput_core::{Direction, Key, Keyboard, RecordingPlatform, Settings, Simulator};
//!
//! let mut sim = Simulator::new(&Settings::default(), RecordingPlatform::new());
//! sim.key(Key::Shift, Direction::Press)?;
//! sim.text("hello")?;
//! // Shift is released when `sim` is dropped.
//! # Ok::<(), hwinput_core::InputError>(())
//! ```

pub mod builder;
pub mod dispatch;
pub mod errors;
pub mod held;
pub mod keymap;
pub mod keys;
pub mod normalize;
pub mod platform;
pub mod record;
pub mod settings;
pub mod simulator;

pub use errors::{ErrorKind, InputError, Result};
pub use held::Held;
pub use keys::{Axis, Button, Coordinate, Direction, Key, ScanCode};
pub use platform::{Platform, RecordingPlatform};
#[cfg(windows)]
pub use platform::{set_dpi_awareness, WindowsPlatform};
pub use settings::{Settings, EVENT_MARKER};
pub use simulator::{Keyboard, Mouse, Simulator};
