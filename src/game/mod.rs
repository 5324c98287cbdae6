//! Reaction game core
//!
//! Implements the "stop the clock" game as a single-threaded state machine
//! that is driven by three event sources:
//!
//! 1. [`input`] - logical key presses and releases
//! 2. [`timer`] - deadline-based timer slots advanced by an external clock
//! 3. [`catalog`] - carousel navigation over the car catalog
//!
//! # Architecture
//!
//! ```text
//! KeyEvent ──► ReactionGameController ──► GameSnapshot
//!                 │         ▲
//!            KeyCombo   TimerSlots
//!                 │         │
//!                 └► GameSession
//! ```
//!
//! The controller never reads the wall clock itself; every entry point takes
//! the current `Instant`, which keeps the timing rules testable without sleeps.

pub mod arbitration;
pub mod catalog;
pub mod controller;
pub mod input;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use catalog::{CarModel, Direction, SelectionIndex, CATALOG};
pub use controller::{ControllerSettings, ReactionGameController};
pub use input::{GameKey, KeyEvent};
pub use session::{GameMode, Phase, Winner};
pub use snapshot::{format_seconds, GameSnapshot};
