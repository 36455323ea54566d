use crate::{
    HotkeyBinding,
    config::{
        Config, DEFAULT_HK_ADD_POINT, DEFAULT_HK_FINISH, DEFAULT_HK_PAUSE, DEFAULT_HK_START_STOP,
    },
};

/// WHAT: Zero and negative click settings clamp to their minimums
/// WHY: Playback divides by max_cps and sleeps base_interval_ms; a
///      hand-edited zero would spin the click loop flat out
#[test]
fn given_out_of_range_click_settings_when_clamped_then_minimums_applied() {
    let mut config = Config::default();
    config.click.base_interval_ms = 0;
    config.click.max_cps = 0;
    config.click.jitter_px = -5;

    config.clamp();

    assert_eq!(config.click.base_interval_ms, 1);
    assert_eq!(config.click.max_cps, 1);
    assert_eq!(config.click.jitter_px, 0);
}

/// WHAT: An invalid stored hotkey falls back to its fixed default
/// WHY: A corrupted binding must never leave an action unreachable
#[test]
fn given_invalid_hotkey_when_clamped_then_default_restored() {
    let mut config = Config::default();
    config.hotkeys.start_stop = "ctrl+".to_string();
    config.hotkeys.finish = "not a key".to_string();

    config.clamp();

    assert_eq!(config.hotkeys.start_stop, DEFAULT_HK_START_STOP);
    assert_eq!(config.hotkeys.finish, DEFAULT_HK_FINISH);
}

/// WHAT: Valid but non-canonical hotkeys are canonicalized on load
/// WHY: Users type "F7", the registry wants "<f7>"
#[test]
fn given_raw_hotkey_spelling_when_clamped_then_canonical_form_stored() {
    let mut config = Config::default();
    config.hotkeys.pause = "F7".to_string();
    config.hotkeys.add_point = "Ctrl-Alt-A".to_string();

    config.clamp();

    assert_eq!(config.hotkeys.pause, "<f7>");
    assert_eq!(config.hotkeys.add_point, "<ctrl>+<alt>+a");
}

/// WHAT: An empty TOML document deserializes to the full default config
/// WHY: Every field carries a serde default so partial files load
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_toml_when_deserialized_then_defaults_used() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.click.base_interval_ms, 100);
    assert_eq!(config.click.max_cps, 25);
    assert!(!config.click.double_click);
    assert!(config.hotkeys.enabled);
    assert_eq!(config.hotkeys.start_stop, DEFAULT_HK_START_STOP);
    assert!(config.behaviour.auto_save_after_record);
}

/// WHAT: A partial [click] section fills missing fields from defaults
/// WHY: Hand-edited configs rarely spell out every key
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_click_section_when_deserialized_then_rest_defaulted() {
    let config: Config = toml::from_str("[click]\ndouble_click = true\n").unwrap();

    assert!(config.click.double_click);
    assert_eq!(config.click.base_interval_ms, 100);
}

/// WHAT: The default config serializes and parses back unchanged
/// WHY: Save-then-load is the first thing a fresh install does
#[test]
#[allow(clippy::unwrap_used)]
fn given_default_config_when_round_tripped_then_values_preserved() {
    let original = Config::default();

    let toml_str = toml::to_string_pretty(&original).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(parsed.click.base_interval_ms, original.click.base_interval_ms);
    assert_eq!(parsed.hotkeys.pause, original.hotkeys.pause);
    assert_eq!(
        parsed.behaviour.auto_save_after_record,
        original.behaviour.auto_save_after_record
    );
}

/// WHAT: Every default binding is OS-registrable
/// WHY: A default that cannot register would fail startup out of the box
#[test]
fn given_default_bindings_when_parsed_then_all_registrable() {
    for binding in [
        DEFAULT_HK_START_STOP,
        DEFAULT_HK_PAUSE,
        DEFAULT_HK_ADD_POINT,
        DEFAULT_HK_FINISH,
    ] {
        assert!(HotkeyBinding::parse(binding).is_ok(), "{binding}");
    }
}
