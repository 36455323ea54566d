//! Hotkey specification grammar.
//!
//! Parses user-supplied key combinations ("F6", "Ctrl+Alt+S", "space",
//! "pageup") into a canonical form used for registration and comparison.
//! Letters and digits stay bare (`x`), modifiers and named keys are
//! wrapped in angle brackets (`<ctrl>`, `<space>`), tokens are joined
//! with `+`. Invalid input normalizes to the empty string; callers must
//! substitute their own default.

use tracing::debug;

/// Named keys and their accepted spellings. The right-hand side is the
/// canonical token placed inside angle brackets.
const NAMED_KEYS: &[(&str, &str)] = &[
    ("space", "space"),
    ("enter", "enter"),
    ("return", "enter"),
    ("esc", "esc"),
    ("escape", "esc"),
    ("tab", "tab"),
    ("up", "up"),
    ("down", "down"),
    ("left", "left"),
    ("right", "right"),
    ("home", "home"),
    ("end", "end"),
    ("pgup", "page_up"),
    ("pageup", "page_up"),
    ("prior", "page_up"),
    ("pgdn", "page_down"),
    ("pagedown", "page_down"),
    ("next", "page_down"),
    ("insert", "insert"),
    ("ins", "insert"),
    ("delete", "delete"),
    ("del", "delete"),
    ("backspace", "backspace"),
    ("bksp", "backspace"),
    ("capslock", "caps_lock"),
    ("caps_lock", "caps_lock"),
    ("printscreen", "print_screen"),
    ("prtsc", "print_screen"),
    ("pause", "pause"),
    ("scrolllock", "scroll_lock"),
    ("scroll_lock", "scroll_lock"),
];

/// Modifier spellings and their canonical tokens.
const MOD_SYNONYMS: &[(&str, &str)] = &[
    ("ctrl", "ctrl"),
    ("control", "ctrl"),
    ("alt", "alt"),
    ("shift", "shift"),
    ("cmd", "cmd"),
    ("win", "cmd"),
    ("super", "cmd"),
    ("meta", "cmd"),
];

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, canonical)| *canonical)
}

fn is_single_alphanumeric(part: &str) -> bool {
    let mut chars = part.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_ascii_alphanumeric()
    )
}

/// Resolve a base-key segment to its canonical token, or `None` when
/// the segment is not a valid base key.
///
/// Resolution order: F-key pattern, named-key table, bare single
/// alphanumeric, already-bracketed passthrough.
fn resolve_base_key(part: &str) -> Option<String> {
    if let Some(digits) = part.strip_prefix('f')
        && !digits.is_empty()
        && digits.len() <= 2
        && digits.bytes().all(|b| b.is_ascii_digit())
    {
        return match digits.parse::<u8>() {
            Ok(n) if (1..=24).contains(&n) => Some(format!("<f{}>", n)),
            _ => None,
        };
    }

    if let Some(name) = lookup(NAMED_KEYS, part) {
        return Some(format!("<{}>", name));
    }

    if is_single_alphanumeric(part) {
        return Some(part.to_string());
    }

    if part.starts_with('<') && part.ends_with('>') && part.len() > 2 {
        return Some(part.to_string());
    }

    None
}

/// Normalize a hotkey string to its canonical form.
///
/// Accepts `F6`, `Ctrl+Alt+S`, `space`, `X`, `p`, `up`, `pageup` and
/// `-` as an alternative separator. Every part except the last must be
/// a modifier; the last part is the base key. Returns the empty string
/// when any part fails to resolve.
pub fn normalize(input: &str) -> String {
    let parts: Vec<String> = input
        .split(['+', '-'])
        .map(|p| p.trim().to_ascii_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    let Some((key_part, mod_parts)) = parts.split_last() else {
        return String::new();
    };

    let mut tokens = Vec::with_capacity(parts.len());
    for part in mod_parts {
        let Some(modifier) = lookup(MOD_SYNONYMS, part) else {
            debug!(input, part = %part, "Rejected hotkey: unknown modifier");
            return String::new();
        };
        tokens.push(format!("<{}>", modifier));
    }

    let Some(base) = resolve_base_key(key_part) else {
        debug!(input, part = %key_part, "Rejected hotkey: unknown base key");
        return String::new();
    };
    tokens.push(base);

    tokens.join("+")
}

/// Normalize a hotkey string, falling back to `default` when invalid.
///
/// Used by configuration loading so that a corrupted or hand-edited
/// hotkey never propagates as invalid state.
pub fn normalize_or(input: &str, default: &str) -> String {
    let canonical = normalize(input);
    if canonical.is_empty() {
        debug!(input, default, "Hotkey invalid, using default");
        default.to_string()
    } else {
        canonical
    }
}

/// Render a canonical hotkey as a human-readable label.
///
/// Bracketed tokens become title-cased words (`<page_up>` -> `Page Up`),
/// bare keys are uppercased. Display-only; the output is not meant to
/// be fed back through [`normalize`], although simple forms round-trip.
pub fn humanize(canonical: &str) -> String {
    if canonical.is_empty() {
        return String::new();
    }

    canonical
        .split('+')
        .map(|token| {
            if let Some(name) = token
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
            {
                let label = title_case(&name.replace('_', " "));
                if label.chars().count() > 1 {
                    label
                } else {
                    label.to_ascii_uppercase()
                }
            } else {
                token.to_ascii_uppercase()
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

fn title_case(words: &str) -> String {
    words
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
