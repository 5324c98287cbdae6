//! Shared UI state and styling

use eframe::egui::{Color32, Frame, Stroke};

/// Screen currently shown in the central panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Stop-the-clock reaction game
    Game,
    /// EV vs Benzin vote
    Vote,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Game => MenuState::Vote,
            MenuState::Vote => MenuState::Game,
        }
    }
}

/// Color palette for the dark kiosk theme.
///
/// Associated constants so no theme object has to be threaded through the
/// render functions.
pub struct UiColors;

impl UiColors {
    /// Guards Red (RGB: 213, 0, 28)
    pub const RED: Color32 = Color32::from_rgb(213, 0, 28);

    /// Gold accent used for prompts (RGB: 195, 154, 107)
    pub const GOLD: Color32 = Color32::from_rgb(195, 154, 107);

    pub const TEXT: Color32 = Color32::from_rgb(240, 240, 240);

    pub const MUTED: Color32 = Color32::from_rgb(140, 140, 150);

    pub const PANEL_BG: Color32 = Color32::from_rgb(24, 24, 27);

    pub const BORDER: Color32 = Color32::from_rgb(63, 63, 70);

    /// Mode badge background when inactive
    pub const INACTIVE: Color32 = Color32::from_rgb(39, 39, 42);
}

/// Bordered frame used for cards and badges
pub fn create_frame(bg_color: Color32, border_color: Color32) -> Frame {
    Frame::new()
        .stroke(Stroke::new(2.0, border_color))
        .fill(bg_color)
        .inner_margin(12)
        .outer_margin(4)
        .corner_radius(8.0)
}
