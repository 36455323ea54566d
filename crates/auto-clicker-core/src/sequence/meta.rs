use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Largest accepted finite repeat count.
pub const MAX_REPEATS: u32 = 100_000;

/// Descriptive and execution-override data for a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceMeta {
    /// Display name; also seeds the saved file name.
    #[serde(default)]
    pub name: String,
    /// Free-text site/application label.
    #[serde(default)]
    pub site: String,
    /// Free-text slot label.
    #[serde(default)]
    pub slot: String,
    /// Free-text date label.
    #[serde(default)]
    pub date: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// When positive, overrides every step's own delay, in milliseconds.
    #[serde(default)]
    pub inter_delay_ms: u64,
    /// Number of full passes over the step list; 0 means infinite.
    #[serde(default)]
    pub repeats: u32,
}

impl SequenceMeta {
    /// Validate a user-supplied repeat count.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RepeatsOutOfRange`] when the value exceeds
    /// [`MAX_REPEATS`]. Zero is valid and means infinite passes.
    #[track_caller]
    pub fn validate_repeats(value: u64) -> CoreResult<u32> {
        if value > u64::from(MAX_REPEATS) {
            return Err(CoreError::RepeatsOutOfRange {
                value,
                max: MAX_REPEATS,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(value as u32)
    }
}
