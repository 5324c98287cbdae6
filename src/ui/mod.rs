//! # Launch Clock User Interface
//!
//! Immediate-mode egui front end. Each frame it reads the latest
//! [`GameSnapshot`] from the driver's watch channel and forwards bound key
//! events over an mpsc channel; it never mutates game state itself.
//!
//! Layout:
//! - **Top Panel**: screen switch between the game and the vote
//! - **Central Panel**: the active screen
//!
//! `Tab` toggles the screen so a kiosk can be operated keyboard-only.

pub mod common;
pub mod game_view;
pub mod key_bindings;
pub mod vote_view;

use crate::game::{GameSnapshot, KeyEvent};
use crate::vote::VotePanel;
use eframe::egui::{self, Button, Key, Vec2};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use self::common::MenuState;
use self::key_bindings::KeyBindings;

pub struct LaunchClockUI {
    menu_state: MenuState,
    key_sender: mpsc::Sender<KeyEvent>,
    snapshot_receiver: watch::Receiver<GameSnapshot>,
    bindings: KeyBindings,
    vote_panel: VotePanel,
    repaint_interval: Duration,
}

impl LaunchClockUI {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        key_sender: mpsc::Sender<KeyEvent>,
        snapshot_receiver: watch::Receiver<GameSnapshot>,
        bindings: KeyBindings,
        vote_panel: VotePanel,
        repaint_interval: Duration,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        info!("UI created");
        Self {
            menu_state: MenuState::Game,
            key_sender,
            snapshot_receiver,
            bindings,
            vote_panel,
            repaint_interval,
        }
    }

    fn forward_game_keys(&self, events: &[egui::Event], now: Instant) {
        for event in self.bindings.forwarded(self.menu_state, events, now) {
            if let Err(e) = self.key_sender.try_send(event) {
                warn!("Game driver not accepting keys: {}", e);
            }
        }
    }

    fn switch_requested(events: &[egui::Event]) -> bool {
        events.iter().any(|event| {
            matches!(
                event,
                egui::Event::Key {
                    key: Key::Tab,
                    pressed: true,
                    repeat: false,
                    ..
                }
            )
        })
    }
}

impl eframe::App for LaunchClockUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(self.repaint_interval);

        let now = Instant::now();
        let events = ctx.input(|input| input.events.clone());
        self.forward_game_keys(&events, now);
        if self.menu_state == MenuState::Vote {
            vote_view::handle_events(&mut self.vote_panel, &events, now);
        }
        if Self::switch_requested(&events) {
            self.menu_state = self.menu_state.toggled();
            debug!("Switched to {:?}", self.menu_state);
        }
        self.vote_panel.tick(now);

        egui::TopBottomPanel::top("top_panel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let width = (ui.available_width() - 20.0) / 2.0;
                    let game_button = Button::new("Stop the Clock")
                        .selected(self.menu_state == MenuState::Game)
                        .min_size(Vec2 { x: width, y: 24.0 });
                    let vote_button = Button::new("Vote")
                        .selected(self.menu_state == MenuState::Vote)
                        .min_size(Vec2 { x: width, y: 24.0 });

                    if ui.add(game_button).clicked() {
                        self.menu_state = MenuState::Game;
                    }
                    if ui.add(vote_button).clicked() {
                        self.menu_state = MenuState::Vote;
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.menu_state {
            MenuState::Game => {
                let snapshot = self.snapshot_receiver.borrow().clone();
                game_view::render(ui, &snapshot);
            }
            MenuState::Vote => vote_view::render(ui, &self.vote_panel),
        });
    }
}
