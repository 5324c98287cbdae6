//! Async runtime around the game controller
//!
//! ```text
//! UI ──► mpsc<KeyEvent> ──► GameDriver (tokio task, tick interval) ──► watch<GameSnapshot> ──► UI
//! ```
//!
//! [`game_driver`] holds the statum lifecycle, [`game_handle`] spawns it and
//! is the only thing the UI talks to.

pub mod game_driver;
pub mod game_handle;

pub use game_driver::{DriverState, DriverStats, GameDriver};
pub use game_handle::{DriverError, GameHandle};
