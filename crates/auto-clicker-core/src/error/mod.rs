use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Core automation errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Hotkey string did not parse to a canonical binding.
    #[error("Invalid hotkey: {input:?} {location}")]
    InvalidHotkey {
        /// The rejected input string.
        input: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Repeat count outside the accepted range.
    #[error("Repeats out of range: {value} (expected 0..={max}) {location}")]
    RepeatsOutOfRange {
        /// The rejected repeat count.
        value: u64,
        /// Largest accepted repeat count.
        max: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Filesystem operation on the sequence store failed.
    #[error("Sequence store IO error: {source} {location}")]
    SequenceIo {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sequence file did not parse as the expected JSON record.
    #[error("Sequence format error: {source} {location}")]
    SequenceFormat {
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Pointer device operation failed.
    #[error("Pointer device error: {reason} {location}")]
    PointerDevice {
        /// Description of the device failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

// Manual From impls with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::SequenceIo {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        CoreError::SequenceFormat {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
