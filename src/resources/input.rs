//! Per-frame keyboard input resource.
//!
//! The core never reads hardware. A host (or the scripted timeline in
//! [`crate::resources::inputscript`]) writes which keys are held into
//! [`InputState`]; controllers only ask the [`KeySource`] question "is key K
//! currently down".
use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

/// Logical key identifier.
///
/// Letters and digits are stored upper-cased in [`KeyCode::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Shift,
    Ctrl,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => f.write_str("Up"),
            KeyCode::Down => f.write_str("Down"),
            KeyCode::Left => f.write_str("Left"),
            KeyCode::Right => f.write_str("Right"),
            KeyCode::Space => f.write_str("Space"),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Shift => f.write_str("Shift"),
            KeyCode::Ctrl => f.write_str("Ctrl"),
        }
    }
}

impl FromStr for KeyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() || c.is_ascii_punctuation() {
                return Ok(KeyCode::Char(c.to_ascii_uppercase()));
            }
        }
        match s.to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Ok(KeyCode::Up),
            "down" | "arrowdown" => Ok(KeyCode::Down),
            "left" | "arrowleft" => Ok(KeyCode::Left),
            "right" | "arrowright" => Ok(KeyCode::Right),
            "space" => Ok(KeyCode::Space),
            "enter" | "return" => Ok(KeyCode::Enter),
            "shift" => Ok(KeyCode::Shift),
            "ctrl" | "control" => Ok(KeyCode::Ctrl),
            _ => Err(format!("unknown key name '{s}'")),
        }
    }
}

/// Anything that can answer whether a key is currently held.
pub trait KeySource {
    fn is_key_down(&self, key: KeyCode) -> bool;
}

/// Resource holding the set of keys held this frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub held: FxHashSet<KeyCode>,
}

impl InputState {
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn set(&mut self, key: KeyCode, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl KeySource for InputState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}
