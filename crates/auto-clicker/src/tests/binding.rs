use crate::{AppError, HotkeyBinding};

use auto_clicker_core::normalize;
use global_hotkey::hotkey::{Code, Modifiers};

/// WHAT: A canonical modifier combo resolves to OS modifiers plus key code
/// WHY: Registration must present exactly the combo the user configured
#[test]
#[allow(clippy::unwrap_used)]
fn given_canonical_combo_when_parsed_then_modifiers_and_code_resolved() {
    let hotkey = HotkeyBinding::parse("<ctrl>+<alt>+s").unwrap().hotkey();

    assert_eq!(hotkey.mods, Modifiers::CONTROL | Modifiers::ALT);
    assert_eq!(hotkey.key, Code::KeyS);
}

/// WHAT: A bare function key parses with no modifiers
/// WHY: The default bindings are plain F-keys
#[test]
#[allow(clippy::unwrap_used)]
fn given_bare_function_key_when_parsed_then_no_modifiers() {
    let hotkey = HotkeyBinding::parse("<f6>").unwrap().hotkey();

    assert!(hotkey.mods.is_empty());
    assert_eq!(hotkey.key, Code::F6);
}

/// WHAT: Named keys map to their OS key codes
/// WHY: Underscored canonical names differ from the Code identifiers
#[test]
#[allow(clippy::unwrap_used)]
fn given_named_keys_when_parsed_then_codes_resolved() {
    let cases = [
        ("<space>", Code::Space),
        ("<page_up>", Code::PageUp),
        ("<page_down>", Code::PageDown),
        ("<esc>", Code::Escape),
        ("<print_screen>", Code::PrintScreen),
    ];

    for (canonical, expected) in cases {
        let hotkey = HotkeyBinding::parse(canonical).unwrap().hotkey();
        assert_eq!(hotkey.key, expected, "{canonical}");
    }
}

/// WHAT: Bare digits resolve to digit key codes
/// WHY: The grammar leaves alphanumerics unbracketed
#[test]
#[allow(clippy::unwrap_used)]
fn given_bare_digit_when_parsed_then_digit_code() {
    let hotkey = HotkeyBinding::parse("3").unwrap().hotkey();

    assert_eq!(hotkey.key, Code::Digit3);
}

/// WHAT: A bracketed token with no OS equivalent is rejected
/// WHY: The grammar passes unknown bracketed tokens through; the OS
///      layer is where they must be caught
#[test]
fn given_unknown_token_when_parsed_then_not_registrable() {
    let result = HotkeyBinding::parse("<media_play>");

    assert!(matches!(
        result,
        Err(AppError::HotkeyNotRegistrable { .. })
    ));
}

/// WHAT: A modifier with no base key is rejected
/// WHY: The OS cannot register a modifier-only hotkey
#[test]
fn given_modifier_only_when_parsed_then_not_registrable() {
    let result = HotkeyBinding::parse("<ctrl>");

    assert!(matches!(
        result,
        Err(AppError::HotkeyNotRegistrable { .. })
    ));
}

/// WHAT: Raw user input survives normalize-then-parse end to end
/// WHY: This is the path every configured binding takes at startup
#[test]
#[allow(clippy::unwrap_used)]
fn given_raw_user_input_when_normalized_and_parsed_then_combo_resolved() {
    let canonical = normalize("Ctrl+Shift+P");
    let hotkey = HotkeyBinding::parse(&canonical).unwrap().hotkey();

    assert_eq!(hotkey.mods, Modifiers::CONTROL | Modifiers::SHIFT);
    assert_eq!(hotkey.key, Code::KeyP);
}
