//! Keyboard state fed by the host's input callback
//!
//! Alongside the pressed table, a parallel "processed" table debounces
//! single-press actions (menu navigation, confirm) across frames: a press is
//! consumed once and only re-arms after the key is released.

use serde::{Deserialize, Serialize};

/// Game actions and their default bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A
    Left,
    /// D
    Right,
    /// Space
    Launch,
    /// Enter
    Confirm,
    /// W
    LevelUp,
    /// S
    LevelDown,
}

impl Key {
    pub const COUNT: usize = 6;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed and processed tables for every `Key`
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: [bool; Key::COUNT],
    processed: [bool; Key::COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.down[key.index()] = true;
    }

    /// Release a key and re-arm its single-press action
    pub fn release(&mut self, key: Key) {
        self.down[key.index()] = false;
        self.processed[key.index()] = false;
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    #[inline]
    pub fn is_processed(&self, key: Key) -> bool {
        self.processed[key.index()]
    }

    /// Consume a fresh press: true once per press, until the key is released
    pub fn take_press(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.down[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_consumed_once() {
        let mut keys = KeyState::new();
        keys.press(Key::Confirm);
        assert!(keys.take_press(Key::Confirm));
        assert!(!keys.take_press(Key::Confirm));
        assert!(keys.is_down(Key::Confirm));
        assert!(keys.is_processed(Key::Confirm));
    }

    #[test]
    fn test_release_rearms() {
        let mut keys = KeyState::new();
        keys.press(Key::LevelUp);
        assert!(keys.take_press(Key::LevelUp));
        keys.release(Key::LevelUp);
        assert!(!keys.take_press(Key::LevelUp));
        keys.press(Key::LevelUp);
        assert!(keys.take_press(Key::LevelUp));
    }

    #[test]
    fn test_keys_independent() {
        let mut keys = KeyState::new();
        keys.press(Key::LevelUp);
        keys.take_press(Key::LevelUp);
        keys.press(Key::LevelDown);
        assert!(keys.take_press(Key::LevelDown));
    }
}
