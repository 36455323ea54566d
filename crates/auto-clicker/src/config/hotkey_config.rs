use crate::config::{
    DEFAULT_HK_ADD_POINT, DEFAULT_HK_FINISH, DEFAULT_HK_PAUSE, DEFAULT_HK_START_STOP,
    default_hk_add_point, default_hk_finish, default_hk_pause, default_hk_start_stop,
    default_hotkeys_enabled,
};

use auto_clicker_core::normalize_or;
use serde::{Deserialize, Serialize};

/// Hotkey bindings, stored in canonical form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Master switch for global hotkeys.
    #[serde(default = "default_hotkeys_enabled")]
    pub enabled: bool,
    /// Start/stop playback.
    #[serde(default = "default_hk_start_stop")]
    pub start_stop: String,
    /// Pause/resume playback.
    #[serde(default = "default_hk_pause")]
    pub pause: String,
    /// Append a step at the current cursor position.
    #[serde(default = "default_hk_add_point")]
    pub add_point: String,
    /// Finish the recording session manually.
    #[serde(default = "default_hk_finish")]
    pub finish: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            enabled: default_hotkeys_enabled(),
            start_stop: default_hk_start_stop(),
            pause: default_hk_pause(),
            add_point: default_hk_add_point(),
            finish: default_hk_finish(),
        }
    }
}

impl HotkeyConfig {
    /// Re-normalize every binding, falling back to the fixed default
    /// when a stored string is invalid.
    pub(crate) fn clamp(&mut self) {
        self.start_stop = normalize_or(&self.start_stop, DEFAULT_HK_START_STOP);
        self.pause = normalize_or(&self.pause, DEFAULT_HK_PAUSE);
        self.add_point = normalize_or(&self.add_point, DEFAULT_HK_ADD_POINT);
        self.finish = normalize_or(&self.finish, DEFAULT_HK_FINISH);
    }
}
