//! Car catalog and carousel selection index

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A car whose 0-100 km/h time is the round's target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarModel {
    pub name: &'static str,
    /// Target elapsed time in seconds
    pub target_time: f64,
}

impl CarModel {
    pub const fn new(name: &'static str, target_time: f64) -> Self {
        Self { name, target_time }
    }

    /// Target time rounded to whole milliseconds
    pub fn target_ms(&self) -> u64 {
        (self.target_time * 1000.0).round().max(0.0) as u64
    }
}

impl fmt::Display for CarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.name, self.target_time)
    }
}

pub const CATALOG: [CarModel; 10] = [
    CarModel::new("Porsche 911 GTS", 3.2),
    CarModel::new("Porsche 911 Carrera", 4.2),
    CarModel::new("Porsche 911 Turbo S", 2.7),
    CarModel::new("Porsche Taycan Turbo S", 2.8),
    CarModel::new("Porsche Cayenne Turbo GT", 3.3),
    CarModel::new("Porsche Panamera Turbo S", 3.1),
    CarModel::new("Porsche 718 Cayman GTS 4.0", 4.5),
    CarModel::new("Porsche Macan GTS", 4.3),
    CarModel::new("Porsche 911 GT3", 3.4),
    CarModel::new("Porsche 718 Boxster S", 4.4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Left,
    Right,
}

/// Carousel position, always read back inside `[0, CATALOG.len())`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionIndex(usize);

impl SelectionIndex {
    /// Accepts any raw value; out-of-range values are clamped on read
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> usize {
        if self.0 < CATALOG.len() {
            self.0
        } else {
            warn!("Correcting invalid selection index {}", self.0);
            0
        }
    }

    /// Repairs a corrupted index in place, returns true if it had to
    pub fn clamp(&mut self) -> bool {
        let valid = self.get();
        let corrected = valid != self.0;
        self.0 = valid;
        corrected
    }

    pub fn step(&mut self, direction: Direction) {
        let len = CATALOG.len();
        let current = self.get();
        self.0 = match direction {
            Direction::Left => (current + len - 1) % len,
            Direction::Right => (current + 1) % len,
        };
    }

    pub fn car(&self) -> CarModel {
        CATALOG[self.get()]
    }
}
