//! Sampled host input state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use imbridge_core::MouseButton;

use crate::host_key::HostKey;

/// Mouse state at the moment of sampling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MouseState {
    /// Cursor position in window pixels.
    pub x: f32,
    pub y: f32,
    /// Vertical wheel movement since the previous sample, in lines.
    pub wheel: f32,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl MouseState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Right => self.right = down,
            MouseButton::Middle => self.middle = down,
        }
    }
}

/// The set of host keys held down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardState {
    down: HashSet<HostKey>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: HostKey) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: HostKey) {
        self.down.remove(&key);
    }

    pub fn set(&mut self, key: HostKey, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_down(&self, key: HostKey) -> bool {
        self.down.contains(&key)
    }

    /// Checks if either of two keys is held.
    pub fn either_down(&self, a: HostKey, b: HostKey) -> bool {
        self.is_down(a) || self.is_down(b)
    }

    /// Keys held down, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = HostKey> + '_ {
        self.down.iter().copied()
    }

    /// Releases every key.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }
}

impl FromIterator<HostKey> for KeyboardState {
    fn from_iter<T: IntoIterator<Item = HostKey>>(iter: T) -> Self {
        Self {
            down: iter.into_iter().collect(),
        }
    }
}

/// One sample of the host input system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }
}
