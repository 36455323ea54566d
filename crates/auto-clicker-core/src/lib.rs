//! Auto-Clicker Core Library
//!
//! Hotkey grammar, click-sequence model and persistence, timed playback
//! engine, and modifier-hold recording session. Pointer actions go
//! through the [`Clicker`] trait so the engine stays testable; the
//! binary crate supplies the enigo-backed implementation and the global
//! listeners.
//!
//! # Example
//!
//! ```no_run
//! use auto_clicker_core::{ClickPlan, Clicker, CoreResult, MouseButton, PlaybackEngine};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! struct NoopClicker;
//!
//! impl Clicker for NoopClicker {
//!     fn move_to(&mut self, _x: i32, _y: i32) -> CoreResult<()> {
//!         Ok(())
//!     }
//!     fn click(&mut self, _button: MouseButton, _count: u8) -> CoreResult<()> {
//!         Ok(())
//!     }
//!     fn position(&mut self) -> CoreResult<(i32, i32)> {
//!         Ok((0, 0))
//!     }
//! }
//!
//! let mut engine = PlaybackEngine::new();
//! engine.start(ClickPlan::default(), || Ok(NoopClicker), StdRng::from_entropy());
//! std::thread::sleep(std::time::Duration::from_millis(500));
//! engine.stop();
//! ```

mod error;
mod hotkey;
mod playback;
mod recording;
mod sequence;

pub use {
    error::{CoreError, Result as CoreResult},
    hotkey::{humanize, normalize, normalize_or},
    playback::{ClickPlan, ClickTiming, Clicker, EngineState, PlaybackEngine, apply_jitter, human_delay},
    recording::{CaptureEvent, RecordingSession, RecordingState},
    sequence::{MAX_REPEATS, MouseButton, Sequence, SequenceEntry, SequenceMeta, SequenceStore, Step},
};

#[cfg(test)]
mod tests;
