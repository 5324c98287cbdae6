//! Vote screen: left arrow votes EV, right arrow votes Benzin

use crate::ui::common::{create_frame, UiColors};
use crate::vote::{PanelState, VotePanel, VoteSelection};
use eframe::egui::{self, Key, RichText, Ui};
use std::time::Instant;

/// Applies arrow key presses to the panel
pub fn handle_events(panel: &mut VotePanel, events: &[egui::Event], now: Instant) {
    for event in events {
        if let egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            ..
        } = event
        {
            let selection = match key {
                Key::ArrowLeft => VoteSelection::Ev,
                Key::ArrowRight => VoteSelection::Benzin,
                _ => continue,
            };
            panel.vote(selection, now);
        }
    }
}

pub fn render(ui: &mut Ui, panel: &VotePanel) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            RichText::new("EV or Benzin?")
                .size(48.0)
                .strong()
                .color(UiColors::TEXT),
        );
        ui.add_space(32.0);

        let highlighted = match panel.state() {
            PanelState::Thanks { selection, .. } => Some(selection),
            PanelState::Ready => None,
        };

        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() / 2.0 - 260.0).max(0.0));
            option_card(ui, "⬅  EV", highlighted == Some(VoteSelection::Ev));
            ui.add_space(40.0);
            option_card(ui, "Benzin  ➡", highlighted == Some(VoteSelection::Benzin));
        });

        ui.add_space(32.0);
        if highlighted.is_some() {
            ui.label(
                RichText::new("Thank you for voting!")
                    .size(32.0)
                    .color(UiColors::GOLD),
            );
        } else if let Some(error) = panel.last_error() {
            ui.label(
                RichText::new(format!("Vote could not be saved: {}", error))
                    .size(18.0)
                    .color(UiColors::RED),
            );
        }

        ui.add_space(16.0);
        ui.label(
            RichText::new(format!("{} votes this session", panel.submitted()))
                .size(14.0)
                .color(UiColors::MUTED),
        );
    });
}

fn option_card(ui: &mut Ui, label: &str, selected: bool) {
    let border = if selected {
        UiColors::RED
    } else {
        UiColors::BORDER
    };
    create_frame(UiColors::PANEL_BG, border).show(ui, |ui| {
        ui.set_min_width(200.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(label).size(36.0).strong().color(UiColors::TEXT));
        });
    });
}
