//! Read-only view of the controller for the presentation layer

use crate::game::catalog::CarModel;
use crate::game::session::{GameMode, Phase, Winner};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub mode: GameMode,
    pub countdown: u8,
    /// Recorded stop times in seconds
    pub player1_time: Option<f64>,
    pub player2_time: Option<f64>,
    /// Display-only running time in seconds
    pub elapsed: f64,
    pub winner: Option<Winner>,
    pub result_message: Option<&'static str>,
    pub active_car: CarModel,
    pub preview_car: CarModel,
    pub selection: usize,
    /// "Waiting for second player" indicator
    pub arbitration_open: bool,
    pub transitioning: bool,
}

impl GameSnapshot {
    /// Player 1's distance from the target, for the single-player result line
    pub fn player1_diff(&self) -> Option<f64> {
        self.player1_time
            .map(|time| (time - self.active_car.target_time).abs())
    }
}

/// Two-decimal seconds display
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}", seconds)
}
