//! Keyboard shortcuts.
//!
//! Keys map straight to [`Intent`]s. There is no per-mode table: a key that
//! doesn't apply in the current state produces an intent the notebook
//! rejects, which is the same outcome as clicking a hidden button.

use crate::config::Config;
use crate::intent::Intent;
use std::collections::HashMap;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.meta
    }

    /// Parses modifiers from a string like "ctrl+shift".
    pub fn parse(s: &str) -> Self {
        let mut mods = Modifiers::NONE;
        for part in s.to_lowercase().split('+') {
            match part.trim() {
                "ctrl" | "control" => mods.ctrl = true,
                "alt" | "option" => mods.alt = true,
                "shift" => mods.shift = true,
                "meta" | "cmd" | "win" => mods.meta = true,
                _ => {}
            }
        }
        mods
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
}

impl Key {
    /// Parses a key from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "pageup" | "pgup" => Some(Key::PageUp),
            "pagedown" | "pgdn" => Some(Key::PageDown),
            "home" => Some(Key::Home),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Home => write!(f, "Home"),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parses a binding string like "ctrl+s" or "left".
    pub fn parse(s: &str) -> Option<Self> {
        let (mods, key) = match s.rsplit_once('+') {
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };
        Some(Self {
            key: Key::parse(key)?,
            modifiers: Modifiers::parse(mods),
        })
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyPress, Intent>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Creates a keymap with defaults overridden by the config's bindings.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, intent_str) in &config.keyboard.bindings {
            let Some(key) = KeyPress::parse(key_str) else {
                tracing::warn!("Ignoring binding for unknown key '{}'", key_str);
                continue;
            };
            let Some(intent) = Intent::from_name(intent_str) else {
                tracing::warn!("Ignoring binding '{}' to unknown intent '{}'", key_str, intent_str);
                continue;
            };
            keymap.bind(key, intent);
        }

        keymap
    }

    fn add_default_bindings(&mut self) {
        let none = Modifiers::NONE;
        let ctrl = Modifiers::CTRL;

        self.bind(KeyPress::new(Key::Left, none), Intent::FlipPrev);
        self.bind(KeyPress::new(Key::PageUp, none), Intent::FlipPrev);
        self.bind(KeyPress::new(Key::Right, none), Intent::FlipNext);
        self.bind(KeyPress::new(Key::PageDown, none), Intent::FlipNext);
        self.bind(KeyPress::new(Key::Escape, none), Intent::Cancel);
        self.bind(KeyPress::new(Key::Char('s'), ctrl), Intent::Save { title: None });
        self.bind(KeyPress::new(Key::Char('n'), ctrl), Intent::StartOrOpen);
        self.bind(KeyPress::new(Key::Char('w'), ctrl), Intent::Close);
    }

    /// Adds or replaces a binding.
    pub fn bind(&mut self, key: KeyPress, intent: Intent) {
        self.bindings.insert(key, intent);
    }

    /// Returns the intent bound to a key press.
    pub fn lookup(&self, key: &KeyPress) -> Option<Intent> {
        self.bindings.get(key).cloned()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
