//! Global keyboard shortcut dispatch.
//!
//! A [`ShortcutDispatcher`] sits in front of every other key handler (the
//! host routes key events through it first) and turns chord definitions into
//! action invocations. Matching is strict about modifiers: the set of held
//! modifiers must equal the chord's required set, so `ctrl+k` does not fire
//! while `ctrl+shift+k` is held, and a plain `k` chord does not fire during
//! `ctrl+k`.
//!
//! Chords without `meta` or `ctrl` are suppressed while focus sits in a
//! text-entry element so that plain keys never hijack typing.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Callback bound to a chord.
pub type ShortcutAction = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("Chord is empty")]
    EmptyChord,

    #[error("Chord '{0}' has no primary key")]
    MissingKey(String),

    #[error("Chord '{0}' has more than one primary key")]
    MultipleKeys(String),
}

/// One of the four modifiers a chord may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Meta,
    Ctrl,
    Shift,
    Alt,
}

impl Modifier {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "meta" => Some(Self::Meta),
            "ctrl" => Some(Self::Ctrl),
            "shift" => Some(Self::Shift),
            "alt" => Some(Self::Alt),
            _ => None,
        }
    }
}

/// Set of held (or required) modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSet {
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ModifierSet {
    pub const NONE: Self = Self {
        meta: false,
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub fn insert(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Meta => self.meta = true,
            Modifier::Ctrl => self.ctrl = true,
            Modifier::Shift => self.shift = true,
            Modifier::Alt => self.alt = true,
        }
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Meta => self.meta,
            Modifier::Ctrl => self.ctrl,
            Modifier::Shift => self.shift,
            Modifier::Alt => self.alt,
        }
    }

    pub fn count(&self) -> usize {
        [self.meta, self.ctrl, self.shift, self.alt]
            .iter()
            .filter(|held| **held)
            .count()
    }

    /// Every required modifier is held and nothing else is
    pub fn matches_exactly(&self, held: &ModifierSet) -> bool {
        let required_held = (!self.meta || held.meta)
            && (!self.ctrl || held.ctrl)
            && (!self.shift || held.shift)
            && (!self.alt || held.alt);
        required_held && held.count() == self.count()
    }

    pub fn has_command_modifier(&self) -> bool {
        self.meta || self.ctrl
    }
}

impl From<KeyModifiers> for ModifierSet {
    fn from(modifiers: KeyModifiers) -> Self {
        Self {
            meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
            ctrl: modifiers.contains(KeyModifiers::CONTROL),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            alt: modifiers.contains(KeyModifiers::ALT),
        }
    }
}

/// Where keyboard focus currently is, as far as shortcut gating cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    None,
    TextInput,
    TextArea,
    ContentEditable,
    Other,
}

impl FocusTarget {
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea | Self::ContentEditable)
    }
}

/// A key event reduced to what chord matching needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Lowercased key name, `None` for keys no chord can name
    pub key: Option<String>,
    pub modifiers: ModifierSet,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: ModifierSet) -> Self {
        Self {
            key: Some(key.into().to_lowercase()),
            modifiers,
        }
    }
}

impl From<&KeyEvent> for KeyPress {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: key_name(event.code),
            modifiers: ModifierSet::from(event.modifiers),
        }
    }
}

/// Name used for a key code in chord definitions
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return Some(c.to_lowercase().collect()),
        KeyCode::Enter => "enter",
        KeyCode::Esc => "escape",
        KeyCode::Tab | KeyCode::BackTab => "tab",
        KeyCode::Backspace => "backspace",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Up => "arrowup",
        KeyCode::Down => "arrowdown",
        KeyCode::Left => "arrowleft",
        KeyCode::Right => "arrowright",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::F(n) => return Some(format!("f{n}")),
        _ => return None,
    };
    Some(name.to_string())
}

/// Required modifiers plus the primary key of a chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub modifiers: ModifierSet,
    /// A chord without a primary key can never match
    pub key: Option<String>,
}

impl Chord {
    /// Split a declarative key list into modifiers and the primary key.
    ///
    /// The first non-modifier entry is the primary key. No validation is
    /// done here; use [`Chord::from_str`] for checked parsing.
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut modifiers = ModifierSet::NONE;
        let mut key = None;
        for entry in keys {
            let entry = entry.as_ref();
            match Modifier::from_name(entry) {
                Some(modifier) => modifiers.insert(modifier),
                None if key.is_none() => key = Some(entry.to_lowercase()),
                None => {}
            }
        }
        Self { modifiers, key }
    }

    pub fn matches(&self, press: &KeyPress) -> bool {
        match (&self.key, &press.key) {
            (Some(required), Some(pressed)) => {
                self.modifiers.matches_exactly(&press.modifiers) && required == pressed
            }
            _ => false,
        }
    }
}

impl FromStr for Chord {
    type Err = ShortcutError;

    /// Parse `"ctrl+shift+k"` style strings. A trailing `++` names the plus key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ShortcutError::EmptyChord);
        }

        let (head, plus_key) = match trimmed.strip_suffix("++") {
            Some(head) => (head, true),
            None if trimmed == "+" => ("", true),
            None => (trimmed, false),
        };

        let mut parts: Vec<&str> = head.split('+').map(str::trim).filter(|p| !p.is_empty()).collect();
        if plus_key {
            parts.push("+");
        }

        let keys: Vec<&&str> = parts.iter().filter(|p| Modifier::from_name(p).is_none()).collect();
        match keys.len() {
            0 => Err(ShortcutError::MissingKey(trimmed.to_string())),
            1 => Ok(Self::from_keys(&parts)),
            _ => Err(ShortcutError::MultipleKeys(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.modifiers.meta {
            parts.push("meta");
        }
        if self.modifiers.ctrl {
            parts.push("ctrl");
        }
        if self.modifiers.shift {
            parts.push("shift");
        }
        if self.modifiers.alt {
            parts.push("alt");
        }
        parts.push(self.key.as_deref().unwrap_or("?"));
        write!(f, "{}", parts.join("+"))
    }
}

/// A chord bound to an action.
#[derive(Clone)]
pub struct Shortcut {
    pub chord: Chord,
    pub action: ShortcutAction,
}

impl Shortcut {
    /// Declarative form: `Shortcut::new(&["ctrl", "k"], ...)`
    pub fn new<S, F>(keys: &[S], action: F) -> Self
    where
        S: AsRef<str>,
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            chord: Chord::from_keys(keys),
            action: Arc::new(action),
        }
    }

    pub fn parse<F>(chord: &str, action: F) -> Result<Self, ShortcutError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Ok(Self {
            chord: chord.parse()?,
            action: Arc::new(action),
        })
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut").field("chord", &self.chord).finish_non_exhaustive()
    }
}

/// What the caller should do with the event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// At least one chord fired; default handling and further routing must stop
    Stopped,
    Continue,
}

/// Matches key events against the currently bound chords.
#[derive(Debug, Default)]
pub struct ShortcutDispatcher {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the effective chord set
    pub fn bind_shortcuts(&mut self, shortcuts: Vec<Shortcut>) {
        self.shortcuts = shortcuts;
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// Dispatch a terminal key event. Only key presses are considered.
    pub fn dispatch(&self, event: &KeyEvent, focus: FocusTarget) -> Propagation {
        if event.kind != KeyEventKind::Press {
            return Propagation::Continue;
        }
        self.dispatch_press(&KeyPress::from(event), focus)
    }

    /// Fire every matching chord in declaration order
    pub fn dispatch_press(&self, press: &KeyPress, focus: FocusTarget) -> Propagation {
        let mut fired = 0;
        for shortcut in &self.shortcuts {
            if !shortcut.chord.matches(press) {
                continue;
            }
            if focus.is_text_entry() && !shortcut.chord.modifiers.has_command_modifier() {
                debug!("Shortcut {} suppressed inside text entry", shortcut.chord);
                continue;
            }
            debug!("Shortcut {} fired", shortcut.chord);
            (shortcut.action)();
            fired += 1;
        }

        if fired > 0 {
            Propagation::Stopped
        } else {
            Propagation::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chords() {
        let chord: Chord = "Ctrl+Shift+K".parse().unwrap();
        assert!(chord.modifiers.ctrl && chord.modifiers.shift);
        assert_eq!(chord.key.as_deref(), Some("k"));

        let plus: Chord = "ctrl++".parse().unwrap();
        assert_eq!(plus.key.as_deref(), Some("+"));

        let slash: Chord = "meta+/".parse().unwrap();
        assert_eq!(slash.to_string(), "meta+/");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Chord>(), Err(ShortcutError::EmptyChord));
        assert!(matches!("ctrl+shift".parse::<Chord>(), Err(ShortcutError::MissingKey(_))));
        assert!(matches!("ctrl+a+b".parse::<Chord>(), Err(ShortcutError::MultipleKeys(_))));
    }

    #[test]
    fn test_chord_without_key_never_matches() {
        let chord = Chord::from_keys(&["ctrl"]);
        let press = KeyPress::new("k", ModifierSet { ctrl: true, ..ModifierSet::NONE });
        assert!(!chord.matches(&press));
    }

    #[test]
    fn test_super_and_meta_both_count_as_meta() {
        assert!(ModifierSet::from(KeyModifiers::SUPER).meta);
        assert!(ModifierSet::from(KeyModifiers::META).meta);
        assert_eq!(ModifierSet::from(KeyModifiers::SUPER | KeyModifiers::META).count(), 1);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::Char('K')).as_deref(), Some("k"));
        assert_eq!(key_name(KeyCode::Esc).as_deref(), Some("escape"));
        assert_eq!(key_name(KeyCode::F(5)).as_deref(), Some("f5"));
        assert_eq!(key_name(KeyCode::Null), None);
    }
}
