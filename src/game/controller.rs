//! Reaction game controller
//!
//! Owns the carousel, the key-combo arbitration and the current
//! [`GameSession`]. All mutation happens inside [`ReactionGameController::handle_key`],
//! [`ReactionGameController::navigate`] and [`ReactionGameController::advance`];
//! each call runs to completion and takes its instant explicitly (key events
//! carry the time the UI saw them), so the whole machine can be driven by a
//! fake clock.
//!
//! # Phases
//!
//! ```text
//! Idle ──key1──► AwaitingSecondPlayer ──(key2 | timeout)──► Countdown ──3 ticks──► Running
//!  ▲                                                                                 │
//!  └──────────────── auto-reset (10s, no winner) ◄───────────────────────────────────┤
//!                                                                                    ▼
//!                              next arbitration ◄──────────────────────────────── Finished
//! ```

use crate::game::arbitration::{ComboDecision, KeyCombo};
use crate::game::catalog::{CarModel, Direction, SelectionIndex};
use crate::game::input::{GameKey, KeyEvent};
use crate::game::session::{GameMode, GameSession, Phase, Player};
use crate::game::snapshot::GameSnapshot;
use crate::game::timer::{TimerFire, TimerKind, TimerSlot};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Timing parameters of the game
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerSettings {
    pub arbitration_window: Duration,
    pub countdown_ticks: u8,
    pub countdown_tick: Duration,
    pub auto_reset: Duration,
    pub transition: Duration,
    pub display_poll: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            arbitration_window: Duration::from_millis(1000),
            countdown_ticks: 3,
            countdown_tick: Duration::from_millis(1000),
            auto_reset: Duration::from_millis(10_000),
            transition: Duration::from_millis(600),
            display_poll: Duration::from_millis(10),
        }
    }
}

pub struct ReactionGameController {
    settings: ControllerSettings,
    selection: SelectionIndex,
    preview: CarModel,
    transitioning: bool,
    session: GameSession,
    combo: KeyCombo,
    transition_timer: TimerSlot,
    countdown_timer: TimerSlot,
    auto_reset_timer: TimerSlot,
    display_timer: TimerSlot,
    next_session_id: u64,
}

impl ReactionGameController {
    pub fn new(settings: ControllerSettings, initial: SelectionIndex) -> Self {
        let mut selection = initial;
        if selection.clamp() {
            warn!("Initial car index out of range, using first car");
        }
        let preview = selection.car();
        info!("Game controller ready with car {}", preview);

        Self {
            settings,
            selection,
            preview,
            transitioning: false,
            session: GameSession::idle(0, preview),
            combo: KeyCombo::default(),
            transition_timer: TimerSlot::new(TimerKind::Transition),
            countdown_timer: TimerSlot::new(TimerKind::Countdown),
            auto_reset_timer: TimerSlot::new(TimerKind::AutoReset),
            display_timer: TimerSlot::new(TimerKind::DisplayPoll),
            next_session_id: 1,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// Entry point for every keyboard event, evaluated at the event's own timestamp
    pub fn handle_key(&mut self, event: KeyEvent) {
        let now = event.at;
        self.advance(now);

        if !event.pressed {
            match event.key {
                GameKey::Action1 => self.combo.release_key1(),
                GameKey::Action2 => self.combo.release_key2(),
                _ => {}
            }
            return;
        }

        if event.repeat {
            return;
        }

        match event.key {
            GameKey::NavigateLeft => self.navigate(Direction::Left, now),
            GameKey::NavigateRight => self.navigate(Direction::Right, now),
            GameKey::Resync => self.resync(),
            GameKey::Action1 => self.on_action1(now),
            GameKey::Action2 => self.on_action2(now),
        }
    }

    /// Moves the carousel one step; locked mid-game and during a transition
    pub fn navigate(&mut self, direction: Direction, now: Instant) {
        if self.session.phase.is_mid_game() || self.transitioning {
            debug!("Navigation {:?} blocked", direction);
            return;
        }

        self.selection.step(direction);
        self.preview = self.selection.car();
        if matches!(self.session.phase, Phase::Idle | Phase::AwaitingSecondPlayer) {
            self.session.active_car = self.preview;
        }
        self.transitioning = true;
        self.transition_timer.arm_once(now, self.settings.transition, self.session.id);
        info!("Car changed to: {}", self.preview);
    }

    fn resync(&mut self) {
        if self.session.phase.is_mid_game() {
            return;
        }
        self.selection.clamp();
        self.preview = self.selection.car();
        if matches!(self.session.phase, Phase::Idle | Phase::AwaitingSecondPlayer) {
            self.session.active_car = self.preview;
        }
        info!("Force refreshing car data to: {}", self.preview);
    }

    fn on_action1(&mut self, now: Instant) {
        match self.session.phase {
            Phase::Idle | Phase::AwaitingSecondPlayer | Phase::Finished => {
                let window = self.settings.arbitration_window;
                let decision = self.combo.press_key1(now, window, self.session.id);
                if decision == ComboDecision::Pending && self.session.phase == Phase::Idle {
                    self.session.phase = Phase::AwaitingSecondPlayer;
                }
                self.apply_decision(decision, now);
            }
            Phase::Countdown => {}
            Phase::Running => self.stop(Player::One, now),
        }
    }

    fn on_action2(&mut self, now: Instant) {
        match self.session.phase {
            Phase::Idle | Phase::AwaitingSecondPlayer | Phase::Finished => {
                let decision = self.combo.press_key2(now);
                self.apply_decision(decision, now);
            }
            Phase::Countdown => {}
            Phase::Running => {
                if self.session.mode == GameMode::Multiplayer {
                    self.stop(Player::Two, now);
                }
            }
        }
    }

    fn apply_decision(&mut self, decision: ComboDecision, at: Instant) {
        match decision {
            ComboDecision::StartSingle => self.start_game(GameMode::Single, at),
            ComboDecision::StartMultiplayer => self.start_game(GameMode::Multiplayer, at),
            ComboDecision::Pending | ComboDecision::Ignored => {}
        }
    }

    /// Tears down any previous round and enters the countdown
    pub fn start_game(&mut self, mode: GameMode, at: Instant) {
        self.cancel_round_timers();

        let id = self.next_session_id;
        self.next_session_id += 1;
        self.session = GameSession::start(id, mode, self.preview, self.settings.countdown_ticks);
        self.combo.clear_flags();

        if self.settings.countdown_ticks == 0 {
            self.begin_running(at);
        } else {
            self.countdown_timer.arm_repeating(at, self.settings.countdown_tick, id);
        }
    }

    fn begin_running(&mut self, at: Instant) {
        let id = self.session.id;
        self.countdown_timer.cancel();
        self.session.begin_running(at);
        self.display_timer.arm_repeating(at, self.settings.display_poll, id);
        self.auto_reset_timer.arm_once(at, self.settings.auto_reset, id);
        info!("Round {} running", id);
    }

    fn stop(&mut self, player: Player, now: Instant) {
        if self.session.phase != Phase::Running {
            return;
        }
        // Pressed during the countdown but delivered after the run began
        if self.session.start_timestamp.map_or(true, |start| now < start) {
            debug!("{:?} stop predates the run, ignoring", player);
            return;
        }
        let elapsed = self.session.elapsed_at(now);
        if !self.session.record(player, elapsed) {
            return;
        }

        let concluded = match self.session.mode {
            GameMode::Single => self.session.score_single().is_some(),
            GameMode::Multiplayer => self.session.determine_winner().is_some(),
        };
        if concluded {
            self.session.display_elapsed = elapsed;
            self.auto_reset_timer.cancel();
            self.display_timer.cancel();
        }
    }

    /// Returns to idle, discarding the current round
    pub fn reset(&mut self) {
        self.cancel_round_timers();
        self.combo.clear_flags();
        self.session = GameSession::idle(self.session.id, self.preview);
        info!("Game reset to idle");
    }

    fn cancel_round_timers(&mut self) {
        self.combo.cancel();
        self.auto_reset_timer.cancel();
        self.countdown_timer.cancel();
        self.display_timer.cancel();
    }

    /// Fires every timer due at `now`, earliest first, each at its own deadline
    pub fn advance(&mut self, now: Instant) {
        while let Some(fire) = self.take_next_due(now) {
            self.dispatch(fire);
        }
    }

    fn take_next_due(&mut self, now: Instant) -> Option<TimerFire> {
        let candidates = [
            (TimerKind::Transition, self.transition_timer.due(now)),
            (
                TimerKind::Arbitration,
                self.combo.window_deadline().filter(|deadline| *deadline <= now),
            ),
            (TimerKind::Countdown, self.countdown_timer.due(now)),
            (TimerKind::AutoReset, self.auto_reset_timer.due(now)),
            (TimerKind::DisplayPoll, self.display_timer.due(now)),
        ];

        let (kind, _) = candidates
            .iter()
            .filter_map(|(kind, due)| due.map(|at| (*kind, at)))
            .min_by_key(|(_, at)| *at)?;

        match kind {
            TimerKind::Transition => self.transition_timer.take_due(now),
            TimerKind::Arbitration => self.combo.take_due(now),
            TimerKind::Countdown => self.countdown_timer.take_due(now),
            TimerKind::AutoReset => self.auto_reset_timer.take_due(now),
            TimerKind::DisplayPoll => self.display_timer.take_due(now),
        }
    }

    fn dispatch(&mut self, fire: TimerFire) {
        match fire.kind {
            TimerKind::Transition => {
                self.transitioning = false;
            }
            TimerKind::Arbitration => {
                let decision = self.combo.resolve();
                self.apply_decision(decision, fire.at);
            }
            TimerKind::Countdown => {
                if fire.owner != self.session.id || self.session.phase != Phase::Countdown {
                    debug!("Stale countdown tick for session {}", fire.owner);
                    self.countdown_timer.cancel();
                    return;
                }
                self.session.countdown_ticks = self.session.countdown_ticks.saturating_sub(1);
                debug!("Countdown {}", self.session.countdown_ticks);
                if self.session.countdown_ticks == 0 {
                    self.begin_running(fire.at);
                }
            }
            TimerKind::AutoReset => {
                if fire.owner != self.session.id
                    || self.session.phase != Phase::Running
                    || self.session.winner.is_some()
                {
                    debug!("Stale auto-reset for session {}", fire.owner);
                    return;
                }
                info!("No result within {:?}, auto-resetting", self.settings.auto_reset);
                self.reset();
            }
            TimerKind::DisplayPoll => {
                if fire.owner != self.session.id || self.session.phase != Phase::Running {
                    self.display_timer.cancel();
                    return;
                }
                self.session.display_elapsed = self.session.elapsed_at(fire.at);
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let session = &self.session;
        GameSnapshot {
            phase: session.phase,
            mode: session.mode,
            countdown: session.countdown_ticks,
            player1_time: session.player1_time.map(|time| time.as_secs_f64()),
            player2_time: session.player2_time.map(|time| time.as_secs_f64()),
            elapsed: session.display_elapsed.as_secs_f64(),
            winner: session.winner,
            result_message: session.result_message(),
            active_car: session.active_car,
            preview_car: self.preview,
            selection: self.selection.get(),
            arbitration_open: self.combo.is_window_open(),
            transitioning: self.transitioning,
        }
    }
}
