//! Delay and jitter computation for the click loop.
//!
//! Randomness is injected as a [`rand::Rng`] so callers can seed or
//! mock it and assert exact values.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Timing and safety settings for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTiming {
    /// Interval between clicks when no sequence is recorded, in ms.
    pub base_interval_ms: u64,
    /// Uniform random offset added to every delay, in ±ms.
    pub random_ms: u64,
    /// Uniform random offset added to click coordinates, in ±px.
    pub jitter_px: i32,
    /// Hard cap on clicks per second, regardless of configured delays.
    pub max_cps: u32,
    /// Issue two rapid clicks per step instead of one.
    pub double_click: bool,
}

impl Default for ClickTiming {
    fn default() -> Self {
        Self {
            base_interval_ms: 100,
            random_ms: 0,
            jitter_px: 0,
            max_cps: 25,
            double_click: false,
        }
    }
}

/// Compute the wait before the next click.
///
/// Starts from `base_ms`, adds a uniform offset in
/// `[-random_ms, +random_ms]` when configured, then floors the result
/// at `1000 / max_cps` ms so the CPS cap holds regardless of the
/// configured interval. Never negative.
pub fn human_delay(base_ms: u64, timing: &ClickTiming, rng: &mut impl Rng) -> Duration {
    let mut ms = base_ms as i64;
    if timing.random_ms > 0 {
        let r = timing.random_ms as i64;
        ms += rng.gen_range(-r..=r);
    }
    let floor = 1000 / i64::from(timing.max_cps.max(1));
    ms = ms.max(floor).max(0);
    Duration::from_millis(ms as u64)
}

/// Apply pixel jitter to click coordinates.
///
/// Independent uniform offsets in `[-jitter_px, +jitter_px]` on each
/// axis; a non-positive jitter leaves the point untouched.
pub fn apply_jitter(x: i32, y: i32, jitter_px: i32, rng: &mut impl Rng) -> (i32, i32) {
    if jitter_px <= 0 {
        return (x, y);
    }
    (
        x + rng.gen_range(-jitter_px..=jitter_px),
        y + rng.gen_range(-jitter_px..=jitter_px),
    )
}
