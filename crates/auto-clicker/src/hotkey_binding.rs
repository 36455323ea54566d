//! Translation from canonical hotkey strings to OS-level key codes.
//!
//! The core crate's grammar is deliberately wider than what the OS can
//! register as a global hotkey (it accepts any `<bracketed>` token).
//! This module maps the subset we can actually bind to
//! [`global_hotkey`]'s `Modifiers` + `Code` pair and rejects the rest
//! with [`AppError::HotkeyNotRegistrable`].

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use global_hotkey::hotkey::{Code, HotKey, Modifiers};

/// A canonical hotkey string resolved to an OS-registrable key combo.
#[derive(Debug, Clone, Copy)]
pub struct HotkeyBinding {
    modifiers: Modifiers,
    code: Code,
}

impl HotkeyBinding {
    /// Parse a canonical hotkey string (e.g. `<ctrl>+<alt>+s`).
    ///
    /// The input must already be in canonical form; raw user strings go
    /// through `auto_clicker_core::normalize` first.
    #[track_caller]
    pub fn parse(canonical: &str) -> AppResult<Self> {
        let mut modifiers = Modifiers::empty();
        let mut code = None;

        for token in canonical.split('+') {
            match token {
                "<ctrl>" => modifiers |= Modifiers::CONTROL,
                "<alt>" => modifiers |= Modifiers::ALT,
                "<shift>" => modifiers |= Modifiers::SHIFT,
                "<cmd>" => modifiers |= Modifiers::META,
                key => {
                    if code.is_some() {
                        return Err(Self::not_registrable(canonical));
                    }
                    code = Some(key_code(key).ok_or_else(|| Self::not_registrable(canonical))?);
                }
            }
        }

        match code {
            Some(code) => Ok(Self { modifiers, code }),
            None => Err(Self::not_registrable(canonical)),
        }
    }

    /// Build the [`HotKey`] to hand to the OS-level manager.
    pub fn hotkey(&self) -> HotKey {
        let modifiers = if self.modifiers.is_empty() {
            None
        } else {
            Some(self.modifiers)
        };
        HotKey::new(modifiers, self.code)
    }

    #[track_caller]
    fn not_registrable(canonical: &str) -> AppError {
        AppError::HotkeyNotRegistrable {
            binding: canonical.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Map one canonical base-key token to a `Code`.
///
/// Covers the bare alphanumerics, the function keys, and the named keys
/// the core grammar emits. Everything else is unregistrable.
fn key_code(token: &str) -> Option<Code> {
    // Bare single alphanumeric: `s`, `7`.
    if token.len() == 1 {
        let c = token.chars().next()?;
        return match c {
            'a' => Some(Code::KeyA),
            'b' => Some(Code::KeyB),
            'c' => Some(Code::KeyC),
            'd' => Some(Code::KeyD),
            'e' => Some(Code::KeyE),
            'f' => Some(Code::KeyF),
            'g' => Some(Code::KeyG),
            'h' => Some(Code::KeyH),
            'i' => Some(Code::KeyI),
            'j' => Some(Code::KeyJ),
            'k' => Some(Code::KeyK),
            'l' => Some(Code::KeyL),
            'm' => Some(Code::KeyM),
            'n' => Some(Code::KeyN),
            'o' => Some(Code::KeyO),
            'p' => Some(Code::KeyP),
            'q' => Some(Code::KeyQ),
            'r' => Some(Code::KeyR),
            's' => Some(Code::KeyS),
            't' => Some(Code::KeyT),
            'u' => Some(Code::KeyU),
            'v' => Some(Code::KeyV),
            'w' => Some(Code::KeyW),
            'x' => Some(Code::KeyX),
            'y' => Some(Code::KeyY),
            'z' => Some(Code::KeyZ),
            '0' => Some(Code::Digit0),
            '1' => Some(Code::Digit1),
            '2' => Some(Code::Digit2),
            '3' => Some(Code::Digit3),
            '4' => Some(Code::Digit4),
            '5' => Some(Code::Digit5),
            '6' => Some(Code::Digit6),
            '7' => Some(Code::Digit7),
            '8' => Some(Code::Digit8),
            '9' => Some(Code::Digit9),
            _ => None,
        };
    }

    match token {
        "<f1>" => Some(Code::F1),
        "<f2>" => Some(Code::F2),
        "<f3>" => Some(Code::F3),
        "<f4>" => Some(Code::F4),
        "<f5>" => Some(Code::F5),
        "<f6>" => Some(Code::F6),
        "<f7>" => Some(Code::F7),
        "<f8>" => Some(Code::F8),
        "<f9>" => Some(Code::F9),
        "<f10>" => Some(Code::F10),
        "<f11>" => Some(Code::F11),
        "<f12>" => Some(Code::F12),
        "<f13>" => Some(Code::F13),
        "<f14>" => Some(Code::F14),
        "<f15>" => Some(Code::F15),
        "<f16>" => Some(Code::F16),
        "<f17>" => Some(Code::F17),
        "<f18>" => Some(Code::F18),
        "<f19>" => Some(Code::F19),
        "<f20>" => Some(Code::F20),
        "<f21>" => Some(Code::F21),
        "<f22>" => Some(Code::F22),
        "<f23>" => Some(Code::F23),
        "<f24>" => Some(Code::F24),
        "<space>" => Some(Code::Space),
        "<enter>" => Some(Code::Enter),
        "<esc>" => Some(Code::Escape),
        "<tab>" => Some(Code::Tab),
        "<up>" => Some(Code::ArrowUp),
        "<down>" => Some(Code::ArrowDown),
        "<left>" => Some(Code::ArrowLeft),
        "<right>" => Some(Code::ArrowRight),
        "<home>" => Some(Code::Home),
        "<end>" => Some(Code::End),
        "<page_up>" => Some(Code::PageUp),
        "<page_down>" => Some(Code::PageDown),
        "<insert>" => Some(Code::Insert),
        "<delete>" => Some(Code::Delete),
        "<backspace>" => Some(Code::Backspace),
        "<caps_lock>" => Some(Code::CapsLock),
        "<print_screen>" => Some(Code::PrintScreen),
        "<scroll_lock>" => Some(Code::ScrollLock),
        "<pause>" => Some(Code::Pause),
        _ => None,
    }
}
