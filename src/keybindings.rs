//! Customizable keybindings for BBAT.
//!
//! Keys are identified abstractly; the front-end maps its own key codes to
//! [`Key`] values. Each bound key resolves to one [`EditorAction`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A key identifier as delivered by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A printable character, stored lowercase
    Char(char),
    Delete,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Escape,
}

impl FromStr for Key {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let key = match lower.as_str() {
            "delete" | "del" => Key::Delete,
            "backspace" => Key::Backspace,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "escape" | "esc" => Key::Escape,
            "space" => Key::Char(' '),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(ConfigError::InvalidKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Delete => f.write_str("delete"),
            Key::Backspace => f.write_str("backspace"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Escape => f.write_str("escape"),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// Direction of an arrow-key nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit offset in image coordinates (y grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// What a key press asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Save,
    Undo,
    Delete,
    CopyPrevious,
    Next,
    Previous,
    Quit,
    Nudge(Direction),
}

impl EditorAction {
    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            EditorAction::Save => "Save",
            EditorAction::Undo => "Undo",
            EditorAction::Delete => "Delete box",
            EditorAction::CopyPrevious => "Copy from previous image",
            EditorAction::Next => "Next image",
            EditorAction::Previous => "Previous image",
            EditorAction::Quit => "Quit",
            EditorAction::Nudge(Direction::Left) => "Nudge left",
            EditorAction::Nudge(Direction::Right) => "Nudge right",
            EditorAction::Nudge(Direction::Up) => "Nudge up",
            EditorAction::Nudge(Direction::Down) => "Nudge down",
        }
    }
}

/// Keybinding configuration for the editor.
///
/// Delete has two keys (Delete and Backspace) by default; every other action
/// has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub save: Key,
    pub undo: Key,
    pub delete: Vec<Key>,
    pub copy_previous: Key,
    pub next: Key,
    pub previous: Key,
    pub quit: Key,
    pub nudge_left: Key,
    pub nudge_right: Key,
    pub nudge_up: Key,
    pub nudge_down: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            save: Key::Char('s'),
            undo: Key::Char('z'),
            delete: vec![Key::Delete, Key::Backspace],
            copy_previous: Key::Char('c'),
            next: Key::Char('d'),
            previous: Key::Char('a'),
            quit: Key::Char('q'),
            nudge_left: Key::Left,
            nudge_right: Key::Right,
            nudge_up: Key::Up,
            nudge_down: Key::Down,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every binding as `(key, action)` pairs.
    fn entries(&self) -> Vec<(Key, EditorAction)> {
        let mut entries = vec![
            (self.save, EditorAction::Save),
            (self.undo, EditorAction::Undo),
            (self.copy_previous, EditorAction::CopyPrevious),
            (self.next, EditorAction::Next),
            (self.previous, EditorAction::Previous),
            (self.quit, EditorAction::Quit),
            (self.nudge_left, EditorAction::Nudge(Direction::Left)),
            (self.nudge_right, EditorAction::Nudge(Direction::Right)),
            (self.nudge_up, EditorAction::Nudge(Direction::Up)),
            (self.nudge_down, EditorAction::Nudge(Direction::Down)),
        ];
        entries.extend(self.delete.iter().map(|&k| (k, EditorAction::Delete)));
        entries
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<EditorAction> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, action)| action)
    }

    /// Check if a key is used by an action other than `exclude`.
    /// Returns the name of the conflicting action, if any.
    pub fn key_conflict(&self, key: Key, exclude: Option<EditorAction>) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|&(k, action)| k == key && Some(action) != exclude)
            .map(|(_, action)| action.name())
    }

    /// Fail if any key is bound to two different actions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = self.entries();
        for (i, (key, action)) in entries.iter().enumerate() {
            if let Some((_, other)) = entries[i + 1..]
                .iter()
                .find(|(k, a)| k == key && a != action)
            {
                return Err(ConfigError::KeyConflict {
                    key: key.to_string(),
                    first: action.name(),
                    second: other.name(),
                });
            }
        }
        Ok(())
    }

    /// One line per action, for usage output.
    pub fn help_lines(&self) -> Vec<String> {
        let delete_keys: Vec<String> = self.delete.iter().map(Key::to_string).collect();
        vec![
            format!("  [{}] save  [{}] undo  [{}] quit", self.save, self.undo, self.quit),
            format!("  [{}] next image  [{}] previous image", self.next, self.previous),
            format!("  [{}] copy boxes from previous image", self.copy_previous),
            format!("  [{}] delete selected box", delete_keys.join("/")),
            format!(
                "  [{}/{}/{}/{}] nudge selected box by 1px",
                self.nudge_left, self.nudge_right, self.nudge_up, self.nudge_down
            ),
        ]
    }
}
