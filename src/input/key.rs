//! Key codes, name parsing, and display normalization.
//!
//! Physical keys are identified by [`rdev::Key`] values, which keep the left
//! and right variants of modifier keys distinct. That distinction matters for
//! hotkey matching (the combination stores whichever side was captured) but
//! not for display, where both sides collapse to one logical label via
//! [`display_name`].

pub use rdev::Key as KeyCode;

/// Key transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A single key transition delivered by the capture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn pressed(key: KeyCode) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    pub fn released(key: KeyCode) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }
}

/// Parses a single key name like "D", "F10", "ControlLeft", or "Escape".
///
/// Bare modifier names pick the canonical left-side code ("Ctrl" means
/// `ControlLeft`); the sided spellings ("CtrlRight", "ShiftRight", "AltGr",
/// "SuperRight") address the other side explicitly.
pub fn parse_key_name(name: &str) -> Option<KeyCode> {
    use rdev::Key;

    let upper = name.trim().to_ascii_uppercase();
    let key = match upper.as_str() {
        "CTRL" | "CONTROL" | "CTRLLEFT" | "CONTROLLEFT" => Key::ControlLeft,
        "CTRLRIGHT" | "CONTROLRIGHT" => Key::ControlRight,
        "SHIFT" | "SHIFTLEFT" => Key::ShiftLeft,
        "SHIFTRIGHT" => Key::ShiftRight,
        "ALT" | "ALTLEFT" => Key::Alt,
        "ALTGR" | "ALTRIGHT" => Key::AltGr,
        "SUPER" | "META" | "WIN" | "SUPERLEFT" | "METALEFT" => Key::MetaLeft,
        "SUPERRIGHT" | "METARIGHT" => Key::MetaRight,
        "SPACE" => Key::Space,
        "TAB" => Key::Tab,
        "ENTER" | "RETURN" => Key::Return,
        "ESC" | "ESCAPE" => Key::Escape,
        "DELETE" => Key::Delete,
        "BACKSPACE" => Key::Backspace,
        "CAPSLOCK" => Key::CapsLock,
        "HOME" => Key::Home,
        "END" => Key::End,
        "PAGEUP" => Key::PageUp,
        "PAGEDOWN" => Key::PageDown,
        "LEFT" | "LEFTARROW" => Key::LeftArrow,
        "RIGHT" | "RIGHTARROW" => Key::RightArrow,
        "UP" | "UPARROW" => Key::UpArrow,
        "DOWN" | "DOWNARROW" => Key::DownArrow,
        "F1" => Key::F1,
        "F2" => Key::F2,
        "F3" => Key::F3,
        "F4" => Key::F4,
        "F5" => Key::F5,
        "F6" => Key::F6,
        "F7" => Key::F7,
        "F8" => Key::F8,
        "F9" => Key::F9,
        "F10" => Key::F10,
        "F11" => Key::F11,
        "F12" => Key::F12,
        _ => {
            if upper.chars().count() != 1 {
                return None;
            }
            let c = upper.chars().next()?;
            return single_char_key(c);
        }
    };
    Some(key)
}

fn single_char_key(c: char) -> Option<KeyCode> {
    use rdev::Key;

    if c.is_ascii_digit() {
        return Some(match c {
            '0' => Key::Num0,
            '1' => Key::Num1,
            '2' => Key::Num2,
            '3' => Key::Num3,
            '4' => Key::Num4,
            '5' => Key::Num5,
            '6' => Key::Num6,
            '7' => Key::Num7,
            '8' => Key::Num8,
            _ => Key::Num9,
        });
    }

    if c.is_ascii_alphabetic() {
        return Some(match c {
            'A' => Key::KeyA,
            'B' => Key::KeyB,
            'C' => Key::KeyC,
            'D' => Key::KeyD,
            'E' => Key::KeyE,
            'F' => Key::KeyF,
            'G' => Key::KeyG,
            'H' => Key::KeyH,
            'I' => Key::KeyI,
            'J' => Key::KeyJ,
            'K' => Key::KeyK,
            'L' => Key::KeyL,
            'M' => Key::KeyM,
            'N' => Key::KeyN,
            'O' => Key::KeyO,
            'P' => Key::KeyP,
            'Q' => Key::KeyQ,
            'R' => Key::KeyR,
            'S' => Key::KeyS,
            'T' => Key::KeyT,
            'U' => Key::KeyU,
            'V' => Key::KeyV,
            'W' => Key::KeyW,
            'X' => Key::KeyX,
            'Y' => Key::KeyY,
            _ => Key::KeyZ,
        });
    }

    None
}

/// Parses a hotkey combination from configuration strings.
///
/// Each entry names one key; entries may also use the compound "Ctrl+Alt+D"
/// form, which is split and flattened. Duplicate codes collapse (membership
/// matters, order does not). Returns an error naming the first entry that
/// fails to parse.
pub fn parse_combination(entries: &[String]) -> Result<Vec<KeyCode>, String> {
    let mut keys = Vec::new();
    for entry in entries {
        for part in entry.split('+') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let key = parse_key_name(part)
                .ok_or_else(|| format!("unrecognized key name '{part}' in hotkey combination"))?;
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    if keys.is_empty() {
        return Err("hotkey combination is empty".to_string());
    }
    Ok(keys)
}

/// Human-readable name for a key, with left/right modifier variants
/// normalized to a single logical label.
///
/// Matching still distinguishes the sides; this normalization is cosmetic.
pub fn display_name(key: KeyCode) -> String {
    use rdev::Key;

    match key {
        Key::ControlLeft | Key::ControlRight => "Ctrl".to_string(),
        Key::ShiftLeft | Key::ShiftRight => "Shift".to_string(),
        Key::Alt | Key::AltGr => "Alt".to_string(),
        Key::MetaLeft | Key::MetaRight => "Super".to_string(),
        Key::Return => "Enter".to_string(),
        Key::Escape => "Esc".to_string(),
        other => {
            let debug = format!("{other:?}");
            // "KeyA" -> "A", "Num4" -> "4"; everything else reads fine as-is
            if let Some(letter) = debug.strip_prefix("Key") {
                if letter.chars().count() == 1 {
                    return letter.to_string();
                }
            }
            if let Some(digit) = debug.strip_prefix("Num") {
                if digit.chars().count() == 1 && digit.chars().all(|c| c.is_ascii_digit()) {
                    return digit.to_string();
                }
            }
            debug
        }
    }
}

/// Joins a combination into a display string like "Ctrl+Shift+D".
pub fn combination_label(keys: &[KeyCode]) -> String {
    keys.iter()
        .map(|&key| display_name(key))
        .collect::<Vec<_>>()
        .join("+")
}
