//! Maps physical egui keys to logical game keys

use crate::config::KeysConfig;
use crate::game::{GameKey, KeyEvent};
use crate::ui::common::MenuState;
use eframe::egui::{self, Key};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<Key, GameKey>,
}

impl KeyBindings {
    pub fn from_config(config: &KeysConfig) -> Self {
        let defaults = KeysConfig::default();
        let entries = [
            (&config.navigate_left, &defaults.navigate_left, GameKey::NavigateLeft),
            (&config.navigate_right, &defaults.navigate_right, GameKey::NavigateRight),
            (&config.action_one, &defaults.action_one, GameKey::Action1),
            (&config.action_two, &defaults.action_two, GameKey::Action2),
            (&config.resync, &defaults.resync, GameKey::Resync),
        ];

        let mut bindings = HashMap::new();
        for (name, fallback, game_key) in entries {
            let key = Key::from_name(name).or_else(|| {
                warn!(
                    "Unknown key name '{}' for {:?}, using '{}'",
                    name, game_key, fallback
                );
                Key::from_name(fallback)
            });
            match key {
                Some(key) => {
                    if let Some(previous) = bindings.insert(key, game_key) {
                        warn!("{:?} bound twice, {:?} replaces {:?}", key, game_key, previous);
                    }
                }
                None => warn!("No key bound for {:?}", game_key),
            }
        }
        debug!("Key bindings: {:?}", bindings);

        Self { bindings }
    }

    pub fn resolve(&self, key: Key) -> Option<GameKey> {
        self.bindings.get(&key).copied()
    }

    /// Converts an egui key event into a game key event, if it is bound
    pub fn translate(&self, event: &egui::Event, at: Instant) -> Option<KeyEvent> {
        match event {
            egui::Event::Key {
                key,
                pressed,
                repeat,
                ..
            } => self.resolve(*key).map(|game_key| KeyEvent {
                key: game_key,
                pressed: *pressed,
                repeat: *repeat,
                at,
            }),
            _ => None,
        }
    }

    /// Game key events to send to the driver for one frame.
    ///
    /// Releases go out on every screen so a key let go on the vote screen
    /// cannot stay held in the controller.
    pub fn forwarded(
        &self,
        screen: MenuState,
        events: &[egui::Event],
        at: Instant,
    ) -> Vec<KeyEvent> {
        events
            .iter()
            .filter_map(|event| self.translate(event, at))
            .filter(|event| screen == MenuState::Game || !event.pressed)
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&KeysConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_all_game_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(Key::ArrowLeft), Some(GameKey::NavigateLeft));
        assert_eq!(bindings.resolve(Key::ArrowRight), Some(GameKey::NavigateRight));
        assert_eq!(bindings.resolve(Key::A), Some(GameKey::Action1));
        assert_eq!(bindings.resolve(Key::B), Some(GameKey::Action2));
        assert_eq!(bindings.resolve(Key::R), Some(GameKey::Resync));
        assert_eq!(bindings.resolve(Key::C), None);
    }

    #[test]
    fn unknown_names_fall_back_to_defaults() {
        let config = KeysConfig {
            action_one: "NotAKey".to_string(),
            action_two: "Space".to_string(),
            ..KeysConfig::default()
        };
        let bindings = KeyBindings::from_config(&config);
        assert_eq!(bindings.resolve(Key::A), Some(GameKey::Action1));
        assert_eq!(bindings.resolve(Key::Space), Some(GameKey::Action2));
        assert_eq!(bindings.resolve(Key::B), None);
    }

    fn key_event(key: Key, pressed: bool, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn translates_key_events_with_repeat_flag() {
        let bindings = KeyBindings::default();
        let at = Instant::now();
        assert_eq!(
            bindings.translate(&key_event(Key::A, true, true), at),
            Some(KeyEvent::repeat(GameKey::Action1, at))
        );
        assert_eq!(bindings.translate(&egui::Event::Copy, at), None);
    }

    #[test]
    fn game_screen_forwards_presses_and_releases() {
        let bindings = KeyBindings::default();
        let at = Instant::now();
        let events = [
            key_event(Key::A, true, false),
            key_event(Key::Tab, true, false),
            key_event(Key::B, false, false),
        ];
        assert_eq!(
            bindings.forwarded(MenuState::Game, &events, at),
            vec![
                KeyEvent::press(GameKey::Action1, at),
                KeyEvent::release(GameKey::Action2, at),
            ]
        );
    }

    #[test]
    fn vote_screen_still_forwards_releases() {
        let bindings = KeyBindings::default();
        let at = Instant::now();
        let events = [
            key_event(Key::ArrowLeft, true, false),
            key_event(Key::B, false, false),
            key_event(Key::A, true, false),
            key_event(Key::A, false, false),
        ];
        assert_eq!(
            bindings.forwarded(MenuState::Vote, &events, at),
            vec![
                KeyEvent::release(GameKey::Action2, at),
                KeyEvent::release(GameKey::Action1, at),
            ]
        );
    }
}
