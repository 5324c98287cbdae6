//! Key-combo arbitration deciding between single and multiplayer starts
//!
//! ```text
//! key1 ──► key2 already down? ──yes──► Multiplayer
//!                │no
//!                ▼
//!          window armed ──key2──► Multiplayer
//!                │timeout
//!                ▼
//!             Single
//! ```
//!
//! key2 on its own never starts a game; it only completes a pending start.

use crate::game::timer::{TimerFire, TimerKind, TimerSlot};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboDecision {
    /// Window armed, waiting for key2 or timeout
    Pending,
    StartSingle,
    StartMultiplayer,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct KeyCombo {
    key1_down: bool,
    key2_down: bool,
    window: TimerSlot,
}

impl Default for KeyCombo {
    fn default() -> Self {
        Self {
            key1_down: false,
            key2_down: false,
            window: TimerSlot::new(TimerKind::Arbitration),
        }
    }
}

impl KeyCombo {
    pub fn press_key1(&mut self, now: Instant, window: Duration, owner: u64) -> ComboDecision {
        self.key1_down = true;

        if self.key2_down {
            info!("Both keys pressed - starting multiplayer");
            self.window.cancel();
            return ComboDecision::StartMultiplayer;
        }

        debug!("Key 1 pressed - waiting {:?} for key 2", window);
        self.window.arm_once(now, window, owner);
        ComboDecision::Pending
    }

    pub fn press_key2(&mut self, now: Instant) -> ComboDecision {
        self.key2_down = true;

        if self.key1_down || self.window.is_armed() {
            info!("Key 2 joined - starting multiplayer");
            self.window.cancel();
            return ComboDecision::StartMultiplayer;
        }

        debug!("Key 2 pressed without key 1, ignoring");
        ComboDecision::Ignored
    }

    /// Key-up only clears the pressed flag; an armed window keeps running
    pub fn release_key1(&mut self) {
        self.key1_down = false;
    }

    pub fn release_key2(&mut self) {
        self.key2_down = false;
    }

    /// Consumes the window timer if it is due
    pub fn take_due(&mut self, now: Instant) -> Option<TimerFire> {
        self.window.take_due(now)
    }

    pub fn window_deadline(&self) -> Option<Instant> {
        self.window.deadline()
    }

    /// Decision when the window expires
    pub fn resolve(&self) -> ComboDecision {
        if self.key2_down {
            ComboDecision::StartMultiplayer
        } else {
            info!("Arbitration window elapsed without key 2 - starting single player");
            ComboDecision::StartSingle
        }
    }

    pub fn is_window_open(&self) -> bool {
        self.window.is_armed()
    }

    pub fn cancel(&mut self) {
        self.window.cancel();
    }

    pub fn clear_flags(&mut self) {
        self.key1_down = false;
        self.key2_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(1000);

    #[test]
    fn key2_held_before_key1_starts_multiplayer_immediately() {
        let t0 = Instant::now();
        let mut combo = KeyCombo::default();
        assert_eq!(combo.press_key2(t0), ComboDecision::Ignored);
        assert_eq!(
            combo.press_key1(t0 + Duration::from_millis(20), WINDOW, 1),
            ComboDecision::StartMultiplayer
        );
        assert!(!combo.is_window_open());
    }

    #[test]
    fn key2_inside_window_completes_multiplayer_even_after_key1_release() {
        let t0 = Instant::now();
        let mut combo = KeyCombo::default();
        assert_eq!(combo.press_key1(t0, WINDOW, 1), ComboDecision::Pending);
        combo.release_key1();
        assert!(combo.is_window_open());
        assert_eq!(
            combo.press_key2(t0 + Duration::from_millis(900)),
            ComboDecision::StartMultiplayer
        );
        assert!(!combo.is_window_open());
    }

    #[test]
    fn expired_window_without_key2_is_single() {
        let t0 = Instant::now();
        let mut combo = KeyCombo::default();
        combo.press_key1(t0, WINDOW, 1);
        assert!(combo.take_due(t0 + Duration::from_millis(999)).is_none());
        assert!(combo.take_due(t0 + WINDOW).is_some());
        assert_eq!(combo.resolve(), ComboDecision::StartSingle);
    }

    #[test]
    fn repeated_key1_rearms_window() {
        let t0 = Instant::now();
        let mut combo = KeyCombo::default();
        combo.press_key1(t0, WINDOW, 1);
        combo.press_key1(t0 + Duration::from_millis(500), WINDOW, 1);
        assert_eq!(
            combo.window_deadline(),
            Some(t0 + Duration::from_millis(1500))
        );
    }
}
