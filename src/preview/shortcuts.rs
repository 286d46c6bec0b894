use crate::foundation::error::KelsaError;

/// Actions reachable from the preview page's keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreviewAction {
    Export,
    Edit,
    ZoomIn,
    ZoomOut,
}

/// A key press with its modifier state. `key` is the produced character, as reported by the
/// platform (so shift+`=` arrives as `+`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn plain(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn meta(key: char) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }

    fn has_modifier(self) -> bool {
        self.ctrl || self.meta
    }
}

impl std::str::FromStr for KeyChord {
    type Err = KelsaError;

    /// Parse `ctrl+s`, `cmd+=`, `ctrl++` or a bare key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KelsaError::validation(format!("invalid key chord '{s}'"));

        let (mods, key) = if s == "+" {
            ("", s)
        } else if let Some(mods) = s.strip_suffix("++") {
            (mods, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        let mut key_chars = key.chars();
        let (Some(key), None) = (key_chars.next(), key_chars.next()) else {
            return Err(invalid());
        };

        let mut chord = Self::plain(key);
        for m in mods.split('+').filter(|m| !m.is_empty()) {
            match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "meta" | "cmd" | "super" => chord.meta = true,
                _ => return Err(invalid()),
            }
        }
        Ok(chord)
    }
}

/// How the page reacts to a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyDisposition {
    pub action: Option<PreviewAction>,
    /// The platform's default handling of this chord must be suppressed.
    pub prevent_default: bool,
}

/// Map a key press to a preview action. Only ctrl/meta chords are mapped.
pub fn action_for(chord: KeyChord) -> Option<PreviewAction> {
    if !chord.has_modifier() {
        return None;
    }
    match chord.key {
        's' => Some(PreviewAction::Export),
        'e' => Some(PreviewAction::Edit),
        '=' | '+' => Some(PreviewAction::ZoomIn),
        '-' => Some(PreviewAction::ZoomOut),
        _ => None,
    }
}

pub fn dispatch(chord: KeyChord) -> KeyDisposition {
    let action = action_for(chord);
    KeyDisposition {
        action,
        prevent_default: action.is_some(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/shortcuts.rs"]
mod tests;
