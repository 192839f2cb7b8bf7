//! Keyboard input
//!
//! The host feeds key-down/key-up events in as they arrive; the simulation
//! only ever asks whether one of the three logical keys is currently held.

use std::collections::HashSet;

/// Keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Left,
    Right,
    Fire,
}

impl LogicalKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(LogicalKey::Left),
            "ArrowRight" | "Right" => Some(LogicalKey::Right),
            " " | "Spacebar" => Some(LogicalKey::Fire),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(LogicalKey::Left),
            39 => Some(LogicalKey::Right),
            32 => Some(LogicalKey::Fire),
            _ => None,
        }
    }

    /// Map a key event, falling back to the key code for old browsers
    pub fn from_event(key: &str, key_code: u32) -> Option<Self> {
        Self::from_dom_key(key).or_else(|| Self::from_key_code(key_code))
    }
}

/// Anything that can report held keys
pub trait InputSource {
    fn is_held(&self, key: LogicalKey) -> bool;
}

/// Held-key state driven by key events
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<LogicalKey>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true if the key is one the game uses.
    pub fn key_down(&mut self, key: &str, key_code: u32) -> bool {
        match LogicalKey::from_event(key, key_code) {
            Some(logical) => {
                self.held.insert(logical);
                true
            }
            None => false,
        }
    }

    /// Record a key-up. Returns true if the key is one the game uses.
    pub fn key_up(&mut self, key: &str, key_code: u32) -> bool {
        match LogicalKey::from_event(key, key_code) {
            Some(logical) => {
                self.held.remove(&logical);
                true
            }
            None => false,
        }
    }

    pub fn set_held(&mut self, key: LogicalKey, held: bool) {
        if held {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Forget every held key; key-ups are lost while the page is unfocused
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputSource for Keyboard {
    fn is_held(&self, key: LogicalKey) -> bool {
        self.held.contains(&key)
    }
}
