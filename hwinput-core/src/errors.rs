//! Error types for `hwinput_core`.
//!
//! Every failure is one of three kinds, surfaced through [`InputError`]
//! (via `thiserror`).  None of them is retried internally; the only place
//! errors are swallowed is teardown (see
//! [`Simulator::release_all`](crate::simulator::Simulator::release_all)).

use thiserror::Error;

/// Top-level error type for the `hwinput_core` library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A caller-supplied value is structurally unusable (null byte in text,
    /// unknown button, malformed settings).
    #[error("InvalidInput: {0}")]
    InvalidInput(String),

    /// No key <-> platform-code translation exists for this input.
    #[error("Mapping: {0}")]
    Mapping(String),

    /// The OS refused or only partially performed the action, or a
    /// geometry / cursor query failed.
    #[error("Simulate: {message}{}", os_suffix(.os_code))]
    Simulate {
        message: String,
        os_code: Option<u32>,
    },
}

fn os_suffix(os_code: &Option<u32>) -> String {
    os_code.map(|c| format!(" (os error {c})")).unwrap_or_default()
}

/// Discriminant of [`InputError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Mapping,
    Simulate,
}

impl InputError {
    /// A `Simulate` error with no OS error code attached.
    pub fn simulate(message: impl Into<String>) -> Self {
        InputError::Simulate {
            message: message.into(),
            os_code: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InputError::InvalidInput(_) => ErrorKind::InvalidInput,
            InputError::Mapping(_) => ErrorKind::Mapping,
            InputError::Simulate { .. } => ErrorKind::Simulate,
        }
    }
}

pub type Result<T> = std::result::Result<T, InputError>;
