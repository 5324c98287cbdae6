//! Game driver with statum state machine for the task lifecycle
//!
//! ```text
//! Configured ──► Running ──► Stopped
//!                  (cancel | input closed)
//! ```

use crate::game::{GameSnapshot, KeyEvent, ReactionGameController};
use chrono::Local;
use statum::{machine, state};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[state]
#[derive(Debug, Clone)]
pub enum DriverState {
    Configured, // Controller and channels wired up
    Running,    // Processing keys and ticks
    Stopped,    // Loop exited
}

#[derive(Debug, Clone, Default)]
pub struct DriverStats {
    pub key_events: u64,
    pub ticks: u64,
    pub snapshots_published: u64,
}

#[machine]
pub struct GameDriver<S: DriverState> {
    controller: ReactionGameController,
    key_receiver: mpsc::Receiver<KeyEvent>,
    snapshot_sender: watch::Sender<GameSnapshot>,
    tick_interval: Duration,
    stats: DriverStats,
}

impl<S: DriverState> GameDriver<S> {
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_sender.subscribe()
    }

    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }
}

impl GameDriver<Configured> {
    pub fn create(
        controller: ReactionGameController,
        key_receiver: mpsc::Receiver<KeyEvent>,
        tick_interval: Duration,
    ) -> Self {
        let (snapshot_sender, _) = watch::channel(controller.snapshot());
        debug!("Created watch channel for game snapshots");

        Self::new(
            controller,
            key_receiver,
            snapshot_sender,
            tick_interval.max(Duration::from_millis(1)),
            DriverStats::default(),
        )
    }

    pub fn start(self) -> GameDriver<Running> {
        info!(
            "Starting game driver with {}ms tick",
            self.tick_interval.as_millis()
        );
        self.transition()
    }
}

impl GameDriver<Running> {
    /// Applies a key at the instant the UI received it, not when it was dequeued
    pub fn handle_key(&mut self, event: KeyEvent) {
        debug!("Key event {:?}", event);
        self.stats.key_events += 1;
        let before = self.controller.phase();
        self.controller.handle_key(event);
        let after = self.controller.phase();
        if before != after {
            info!("Round {}: {:?} -> {:?}", self.controller.session().id, before, after);
        }
        self.publish();
    }

    pub fn tick(&mut self) {
        self.stats.ticks += 1;
        self.controller.advance(Instant::now());
        self.publish();
    }

    fn publish(&mut self) {
        let snapshot = self.controller.snapshot();
        let changed = self.snapshot_sender.send_if_modified(|current| {
            if *current != snapshot {
                *current = snapshot;
                true
            } else {
                false
            }
        });
        if changed {
            self.stats.snapshots_published += 1;
        }
    }

    /// Main loop, runs until cancelled or the key channel closes
    pub async fn run_until_cancelled(mut self, token: CancellationToken) -> GameDriver<Stopped> {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last_stats_time = Local::now();
        let stats_interval = chrono::Duration::seconds(30);

        info!("Entering game driver loop");
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("Game driver cancelled");
                    break;
                }
                event = self.key_receiver.recv() => match event {
                    Some(event) => self.handle_key(event),
                    None => {
                        info!("Key channel closed, stopping game driver");
                        break;
                    }
                },
                _ = ticker.tick() => self.tick(),
            }

            let now = Local::now();
            if now - last_stats_time > stats_interval {
                info!(
                    "Driver stats: {} keys, {} ticks, {} snapshots",
                    self.stats.key_events, self.stats.ticks, self.stats.snapshots_published
                );
                last_stats_time = now;
            }
        }

        self.transition()
    }
}
