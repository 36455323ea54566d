use auto_clicker_core::ClickTiming;

use serde::{Deserialize, Serialize};

/// Click behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Interval between clicks when no sequence is recorded, in ms.
    pub base_interval_ms: u64,
    /// Uniform random offset added to every delay, in ±ms.
    pub random_ms: u64,
    /// Uniform random offset added to click coordinates, in ±px.
    pub jitter_px: i32,
    /// Hard cap on clicks per second.
    pub max_cps: u32,
    /// Issue two rapid clicks per step instead of one.
    pub double_click: bool,
}

impl Default for ClickConfig {
    fn default() -> Self {
        ClickTiming::default().into()
    }
}

impl ClickConfig {
    /// Clamp every field to its documented valid range.
    ///
    /// Hand-edited files may carry zeros or negatives; playback relies
    /// on `base_interval_ms >= 1` and `max_cps >= 1` holding.
    pub(crate) fn clamp(&mut self) {
        self.base_interval_ms = self.base_interval_ms.max(1);
        self.max_cps = self.max_cps.max(1);
        self.jitter_px = self.jitter_px.max(0);
    }

    /// Timing settings for the playback engine.
    pub(crate) fn timing(&self) -> ClickTiming {
        ClickTiming {
            base_interval_ms: self.base_interval_ms,
            random_ms: self.random_ms,
            jitter_px: self.jitter_px,
            max_cps: self.max_cps,
            double_click: self.double_click,
        }
    }
}

impl From<ClickTiming> for ClickConfig {
    fn from(timing: ClickTiming) -> Self {
        Self {
            base_interval_ms: timing.base_interval_ms,
            random_ms: timing.random_ms,
            jitter_px: timing.jitter_px,
            max_cps: timing.max_cps,
            double_click: timing.double_click,
        }
    }
}
