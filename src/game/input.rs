//! Logical key events consumed by the game controller

use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKey {
    NavigateLeft,
    NavigateRight,
    /// Starts a game, stops player 1
    Action1,
    /// Joins a multiplayer start, stops player 2
    Action2,
    /// Re-derives the preview car from the selection index
    Resync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: GameKey,
    pub pressed: bool,
    /// Auto-repeat from a held key
    pub repeat: bool,
    /// When the UI received the key, used for stop times
    pub at: Instant,
}

impl KeyEvent {
    pub fn press(key: GameKey, at: Instant) -> Self {
        Self {
            key,
            pressed: true,
            repeat: false,
            at,
        }
    }

    pub fn repeat(key: GameKey, at: Instant) -> Self {
        Self {
            key,
            pressed: true,
            repeat: true,
            at,
        }
    }

    pub fn release(key: GameKey, at: Instant) -> Self {
        Self {
            key,
            pressed: false,
            repeat: false,
            at,
        }
    }
}
