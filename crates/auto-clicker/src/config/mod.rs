mod behaviour_config;
mod click_config;
#[allow(clippy::module_inception)]
mod config;
mod hotkey_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, click_config::ClickConfig, config::Config,
    hotkey_config::HotkeyConfig,
};

pub(crate) const DEFAULT_AUTO_SAVE_AFTER_RECORD: bool = true;
pub(crate) const DEFAULT_HOTKEYS_ENABLED: bool = true;
pub(crate) const DEFAULT_HK_START_STOP: &str = "<f6>";
pub(crate) const DEFAULT_HK_PAUSE: &str = "<f9>";
pub(crate) const DEFAULT_HK_ADD_POINT: &str = "<f8>";
pub(crate) const DEFAULT_HK_FINISH: &str = "<ctrl>+<f8>";

pub(crate) fn default_auto_save_after_record() -> bool {
    DEFAULT_AUTO_SAVE_AFTER_RECORD
}

pub(crate) fn default_hotkeys_enabled() -> bool {
    DEFAULT_HOTKEYS_ENABLED
}

pub(crate) fn default_hk_start_stop() -> String {
    DEFAULT_HK_START_STOP.to_string()
}

pub(crate) fn default_hk_pause() -> String {
    DEFAULT_HK_PAUSE.to_string()
}

pub(crate) fn default_hk_add_point() -> String {
    DEFAULT_HK_ADD_POINT.to_string()
}

pub(crate) fn default_hk_finish() -> String {
    DEFAULT_HK_FINISH.to_string()
}
