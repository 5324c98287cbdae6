//! Renders a [`GameSnapshot`]; no game logic lives here

use crate::game::{format_seconds, GameMode, GameSnapshot, Phase, Winner, CATALOG};
use crate::ui::common::{create_frame, UiColors};
use eframe::egui::{self, vec2, Align, Layout, RichText, Ui};

pub fn render(ui: &mut Ui, snapshot: &GameSnapshot) {
    ui.vertical_centered(|ui| {
        render_mode_badges(ui, snapshot.mode);
        ui.add_space(24.0);
        render_carousel(ui, snapshot);
        ui.add_space(32.0);
        render_phase(ui, snapshot);
        if snapshot.arbitration_open {
            render_waiting(ui);
        }
    });
}

fn render_mode_badges(ui: &mut Ui, mode: GameMode) {
    let badge = |ui: &mut Ui, label: &str, active: bool| {
        let (fill, border) = if active {
            (UiColors::RED, UiColors::RED)
        } else {
            (UiColors::INACTIVE, UiColors::BORDER)
        };
        create_frame(fill, border).show(ui, |ui| {
            ui.label(RichText::new(label).size(20.0).strong().color(UiColors::TEXT));
        });
    };

    ui.horizontal(|ui| {
        let total = 2.0 * 180.0;
        ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));
        badge(ui, "Single Player", mode == GameMode::Single);
        badge(ui, "Multiplayer", mode == GameMode::Multiplayer);
    });
}

fn render_carousel(ui: &mut Ui, snapshot: &GameSnapshot) {
    let len = CATALOG.len();
    let previous = CATALOG[(snapshot.selection + len - 1) % len];
    let next = CATALOG[(snapshot.selection + 1) % len];

    ui.allocate_ui_with_layout(
        vec2(ui.available_width(), 160.0),
        Layout::left_to_right(Align::Center),
        |ui| {
            let side_width = ui.available_width() / 4.0;
            ui.add_sized(
                vec2(side_width, 120.0),
                egui::Label::new(RichText::new(previous.name).size(16.0).color(UiColors::MUTED)),
            );
            create_frame(UiColors::PANEL_BG, UiColors::RED).show(ui, |ui| {
                ui.set_min_width(side_width * 1.6);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(snapshot.preview_car.name)
                            .size(32.0)
                            .strong()
                            .color(UiColors::TEXT),
                    );
                    ui.label(
                        RichText::new(format!("0-100 km/h: {}s", snapshot.preview_car.target_time))
                            .size(22.0)
                            .color(UiColors::GOLD),
                    );
                });
            });
            ui.add_sized(
                vec2(side_width, 120.0),
                egui::Label::new(RichText::new(next.name).size(16.0).color(UiColors::MUTED)),
            );
        },
    );
}

fn render_phase(ui: &mut Ui, snapshot: &GameSnapshot) {
    match snapshot.phase {
        Phase::Idle | Phase::AwaitingSecondPlayer => {
            prompt(ui, "Press \"A\" to start", 36.0, UiColors::GOLD);
            prompt(ui, "Press \"A\" and \"B\" together for multiplayer", 20.0, UiColors::MUTED);
        }
        Phase::Countdown => {
            prompt(ui, &snapshot.countdown.to_string(), 120.0, UiColors::RED);
        }
        Phase::Running => render_running(ui, snapshot),
        Phase::Finished => render_finished(ui, snapshot),
    }
}

fn render_running(ui: &mut Ui, snapshot: &GameSnapshot) {
    prompt(ui, &format_seconds(snapshot.elapsed), 96.0, UiColors::TEXT);
    match snapshot.mode {
        GameMode::Single => {
            prompt(ui, "Press \"A\" to stop", 22.0, UiColors::GOLD);
        }
        GameMode::Multiplayer => {
            ui.horizontal(|ui| {
                ui.add_space((ui.available_width() / 2.0 - 220.0).max(0.0));
                player_time(ui, "Player 1 (A)", snapshot.player1_time);
                ui.add_space(40.0);
                player_time(ui, "Player 2 (B)", snapshot.player2_time);
            });
        }
    }
}

fn render_finished(ui: &mut Ui, snapshot: &GameSnapshot) {
    match (snapshot.mode, snapshot.winner) {
        (GameMode::Single, _) => {
            prompt(
                ui,
                snapshot.result_message.unwrap_or_default(),
                56.0,
                UiColors::TEXT,
            );
            let time = snapshot
                .player1_time
                .map(format_seconds)
                .unwrap_or_else(|| "?".to_string());
            let diff = snapshot
                .player1_diff()
                .map(format_seconds)
                .unwrap_or_else(|| "?".to_string());
            prompt(
                ui,
                &format!(
                    "Your time: {} | Target time: {} | Diff: {}",
                    time, snapshot.active_car.target_time, diff
                ),
                20.0,
                UiColors::MUTED,
            );
            prompt(ui, "Press \"A\" to play again", 20.0, UiColors::GOLD);
            prompt(ui, "Press \"A\" and \"B\" together for multiplayer", 16.0, UiColors::MUTED);
        }
        (GameMode::Multiplayer, winner) => {
            let headline = match winner {
                Some(Winner::Tie) => "Perfect Tie!".to_string(),
                Some(winner) => format!("{} Wins!", winner),
                None => String::new(),
            };
            prompt(ui, &headline, 56.0, UiColors::TEXT);
            ui.horizontal(|ui| {
                ui.add_space((ui.available_width() / 2.0 - 220.0).max(0.0));
                player_time(ui, "Player 1", snapshot.player1_time);
                ui.add_space(40.0);
                player_time(ui, "Player 2", snapshot.player2_time);
            });
            prompt(ui, "Press \"A\" and \"B\" together to play again", 20.0, UiColors::GOLD);
            prompt(ui, "Press \"A\" for single player", 16.0, UiColors::MUTED);
        }
    }
}

fn render_waiting(ui: &mut Ui) {
    ui.add_space(16.0);
    prompt(ui, "Starting in 1s...", 24.0, UiColors::RED);
    prompt(ui, "Press \"B\" for multiplayer!", 18.0, UiColors::TEXT);
}

fn player_time(ui: &mut Ui, label: &str, time: Option<f64>) {
    create_frame(UiColors::PANEL_BG, UiColors::BORDER).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(label).size(18.0).color(UiColors::MUTED));
            let value = time.map(format_seconds).unwrap_or_else(|| "--.--".to_string());
            ui.label(RichText::new(value).size(40.0).strong().color(UiColors::TEXT));
        });
    });
}

fn prompt(ui: &mut Ui, text: &str, size: f32, color: egui::Color32) {
    ui.label(RichText::new(text).size(size).color(color));
}
