//! Key chord parsing and matching.
//!
//! Parses key chord strings like "ctrl+q" or "alt+shift+t" from config
//! and matches them against crossterm KeyEvents at runtime.
//!
//! Used for the configurable quit and theme-cycle bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeymapConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Resolved bindings. Unparsable chords fall back to the defaults.
#[derive(Debug, Clone)]
pub struct Keymap {
    pub quit: KeyChord,
    pub cycle_theme: KeyChord,
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        Self {
            quit: resolve(&config.quit, 'q'),
            cycle_theme: resolve(&config.cycle_theme, 't'),
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: ctrl_chord('q'),
            cycle_theme: ctrl_chord('t'),
        }
    }
}

fn resolve(input: &str, fallback: char) -> KeyChord {
    parse_key_chord(input).unwrap_or_else(|| {
        tracing::warn!(chord = input, "unrecognized key chord, using default");
        ctrl_chord(fallback)
    })
}

fn ctrl_chord(ch: char) -> KeyChord {
    KeyChord {
        key: KeyCode::Char(ch),
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    }
}

pub fn parse_key_chord(input: &str) -> Option<KeyChord> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    let parts: Vec<&str> = trimmed
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }

    let mut chord = KeyChord {
        key: KeyCode::Null,
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    for part in parts {
        match part {
            "ctrl" | "control" => chord.ctrl = true,
            "alt" | "option" => chord.alt = true,
            "shift" => chord.shift = true,
            "meta" | "cmd" | "super" => chord.meta = true,
            key => {
                if chord.key != KeyCode::Null {
                    return None;
                }
                chord.key = parse_key(key)?;
            }
        }
    }

    if chord.key == KeyCode::Null {
        return None;
    }

    Some(chord)
}

fn parse_key(key: &str) -> Option<KeyCode> {
    match key {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "space" | "spacebar" => Some(KeyCode::Char(' ')),
        "f1" => Some(KeyCode::F(1)),
        "f2" => Some(KeyCode::F(2)),
        "f10" => Some(KeyCode::F(10)),
        _ => {
            let mut chars = key.chars();
            let first = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(first))
            } else {
                None
            }
        }
    }
}

pub fn matches_chord(event: KeyEvent, chord: &KeyChord) -> bool {
    let code = match event.code {
        KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
        other => other,
    };
    if code != chord.key {
        return false;
    }

    let modifiers = event.modifiers;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let meta = modifiers.contains(KeyModifiers::SUPER) || modifiers.contains(KeyModifiers::META);

    ctrl == chord.ctrl && alt == chord.alt && shift == chord.shift && meta == chord.meta
}

#[cfg(test)]
mod tests {
    use super::{matches_chord, parse_key_chord, Keymap};
    use crate::config::KeymapConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn parse_key_chord_reads_modifiers() {
        let chord = parse_key_chord("Ctrl+Alt+x").expect("chord");
        assert_eq!(chord.key, KeyCode::Char('x'));
        assert!(chord.ctrl && chord.alt && !chord.shift);
        assert_eq!(parse_key_chord("ctrl+space").map(|c| c.key), Some(KeyCode::Char(' ')));
    }

    #[test]
    fn parse_key_chord_rejects_garbage() {
        assert!(parse_key_chord("").is_none());
        assert!(parse_key_chord("ctrl+").is_none());
        assert!(parse_key_chord("ctrl+a+b").is_none());
        assert!(parse_key_chord("hyper+zz").is_none());
    }

    #[test]
    fn matches_chord_compares_modifiers() {
        let chord = parse_key_chord("ctrl+q").expect("chord");
        assert!(matches_chord(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            &chord
        ));
        assert!(!matches_chord(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            &chord
        ));
        assert!(!matches_chord(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL | KeyModifiers::ALT),
            &chord
        ));
    }

    #[test]
    fn keymap_falls_back_on_bad_chords() {
        let keymap = Keymap::from_config(&KeymapConfig {
            quit: "nonsense+key".to_string(),
            cycle_theme: "alt+t".to_string(),
        });
        assert_eq!(keymap.quit, Keymap::default().quit);
        assert!(keymap.cycle_theme.alt);
        assert!(!keymap.cycle_theme.ctrl);
    }
}
