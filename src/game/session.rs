//! Game session aggregate: phase, recorded times and scoring

use crate::game::catalog::CarModel;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GameMode {
    #[default]
    Single,
    Multiplayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingSecondPlayer,
    Countdown,
    Running,
    Finished,
}

impl Phase {
    /// Countdown or running: the carousel and start keys are locked
    pub fn is_mid_game(&self) -> bool {
        matches!(self, Phase::Countdown | Phase::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Player1,
    Player2,
    Tie,
    /// Single-player round concluded
    Finished,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Player1 => write!(f, "Player 1"),
            Winner::Player2 => write!(f, "Player 2"),
            Winner::Tie => write!(f, "Tie"),
            Winner::Finished => write!(f, "Finished"),
        }
    }
}

/// Single-player accuracy band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultBand {
    Perfect,
    Great,
    Good,
    TryAgain,
}

impl ResultBand {
    pub fn classify(diff_ms: u64) -> Self {
        match diff_ms {
            0..=100 => ResultBand::Perfect,
            101..=300 => ResultBand::Great,
            301..=500 => ResultBand::Good,
            _ => ResultBand::TryAgain,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResultBand::Perfect => "Perfect!",
            ResultBand::Great => "Great!",
            ResultBand::Good => "Good!",
            ResultBand::TryAgain => "Try Again!",
        }
    }
}

/// Absolute distance between a stop time and the car's target, in whole ms
pub fn diff_ms(elapsed: Duration, car: &CarModel) -> u64 {
    (elapsed.as_millis() as u64).abs_diff(car.target_ms())
}

/// State of one round from game start until reset
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub id: u64,
    pub mode: GameMode,
    pub phase: Phase,
    pub countdown_ticks: u8,
    pub start_timestamp: Option<Instant>,
    pub player1_time: Option<Duration>,
    pub player2_time: Option<Duration>,
    /// Display-only running time, never used for scoring
    pub display_elapsed: Duration,
    pub winner: Option<Winner>,
    pub result: Option<ResultBand>,
    pub active_car: CarModel,
}

impl GameSession {
    pub fn idle(id: u64, car: CarModel) -> Self {
        Self {
            id,
            mode: GameMode::Single,
            phase: Phase::Idle,
            countdown_ticks: 0,
            start_timestamp: None,
            player1_time: None,
            player2_time: None,
            display_elapsed: Duration::ZERO,
            winner: None,
            result: None,
            active_car: car,
        }
    }

    pub fn start(id: u64, mode: GameMode, car: CarModel, countdown_ticks: u8) -> Self {
        info!("Starting {:?} game {} with active car {}", mode, id, car);
        Self {
            mode,
            phase: Phase::Countdown,
            countdown_ticks,
            ..Self::idle(id, car)
        }
    }

    pub fn begin_running(&mut self, at: Instant) {
        self.phase = Phase::Running;
        self.countdown_ticks = 0;
        self.start_timestamp = Some(at);
        self.display_elapsed = Duration::ZERO;
    }

    /// Elapsed time since the run started, truncated to whole milliseconds
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let elapsed = self
            .start_timestamp
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default();
        Duration::from_millis(elapsed.as_millis() as u64)
    }

    /// Records a stop time; the first stop wins and later ones return false
    pub fn record(&mut self, player: Player, elapsed: Duration) -> bool {
        let slot = match player {
            Player::One => &mut self.player1_time,
            Player::Two => &mut self.player2_time,
        };
        if slot.is_some() {
            debug!("{:?} already stopped, ignoring", player);
            return false;
        }
        *slot = Some(elapsed);
        info!(
            "{:?} stopped at {:.2}s, target was {}s",
            player,
            elapsed.as_secs_f64(),
            self.active_car.target_time
        );
        true
    }

    /// Scores player 1's time in single-player mode and concludes the round
    pub fn score_single(&mut self) -> Option<ResultBand> {
        if self.mode != GameMode::Single || self.winner.is_some() {
            return None;
        }
        let time = self.player1_time?;
        let band = ResultBand::classify(diff_ms(time, &self.active_car));
        self.result = Some(band);
        self.winner = Some(Winner::Finished);
        self.phase = Phase::Finished;
        info!("Single-player result: {}", band.message());
        Some(band)
    }

    /// Picks the multiplayer winner once both times exist. Idempotent.
    pub fn determine_winner(&mut self) -> Option<Winner> {
        if self.mode != GameMode::Multiplayer || self.winner.is_some() {
            return None;
        }
        let (p1, p2) = (self.player1_time?, self.player2_time?);
        let p1_diff = diff_ms(p1, &self.active_car);
        let p2_diff = diff_ms(p2, &self.active_car);

        let winner = match p1_diff.cmp(&p2_diff) {
            std::cmp::Ordering::Less => Winner::Player1,
            std::cmp::Ordering::Greater => Winner::Player2,
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        self.winner = Some(winner);
        self.phase = Phase::Finished;
        info!(
            "Multiplayer result: {} (diffs {}ms vs {}ms)",
            winner, p1_diff, p2_diff
        );
        Some(winner)
    }

    pub fn result_message(&self) -> Option<&'static str> {
        self.result.map(|band| band.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::CATALOG;

    fn carrera() -> CarModel {
        CATALOG[1]
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn single_with(time_ms: u64) -> GameSession {
        let mut session = GameSession::start(1, GameMode::Single, carrera(), 3);
        session.begin_running(Instant::now());
        session.record(Player::One, ms(time_ms));
        session
    }

    #[test]
    fn bands_follow_distance_from_target() {
        assert_eq!(single_with(4250).score_single(), Some(ResultBand::Perfect));
        assert_eq!(single_with(4150).score_single(), Some(ResultBand::Perfect));
        assert_eq!(single_with(3950).score_single(), Some(ResultBand::Great));
        assert_eq!(single_with(4600).score_single(), Some(ResultBand::Good));
        assert_eq!(single_with(3800).score_single(), Some(ResultBand::Good));
        assert_eq!(single_with(5200).score_single(), Some(ResultBand::TryAgain));
        assert_eq!(single_with(3200).score_single(), Some(ResultBand::TryAgain));
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(ResultBand::classify(100), ResultBand::Perfect);
        assert_eq!(ResultBand::classify(300), ResultBand::Great);
        assert_eq!(ResultBand::classify(500), ResultBand::Good);
        assert_eq!(ResultBand::classify(501), ResultBand::TryAgain);
    }

    #[test]
    fn closer_player_wins() {
        let mut session = GameSession::start(1, GameMode::Multiplayer, carrera(), 3);
        session.record(Player::One, ms(4000));
        assert_eq!(session.determine_winner(), None);
        session.record(Player::Two, ms(4500));
        assert_eq!(session.determine_winner(), Some(Winner::Player1));
        assert_eq!(session.phase, Phase::Finished);
    }

    #[test]
    fn equal_distance_is_a_tie() {
        let mut session = GameSession::start(1, GameMode::Multiplayer, carrera(), 3);
        session.record(Player::One, ms(4000));
        session.record(Player::Two, ms(4400));
        assert_eq!(session.determine_winner(), Some(Winner::Tie));
    }

    #[test]
    fn winner_is_decided_once() {
        let mut session = GameSession::start(1, GameMode::Multiplayer, carrera(), 3);
        session.record(Player::One, ms(4500));
        session.record(Player::Two, ms(4200));
        assert_eq!(session.determine_winner(), Some(Winner::Player2));
        assert_eq!(session.determine_winner(), None);
        assert_eq!(session.winner, Some(Winner::Player2));
    }

    #[test]
    fn second_record_is_ignored() {
        let mut session = GameSession::start(1, GameMode::Single, carrera(), 3);
        assert!(session.record(Player::One, ms(4100)));
        assert!(!session.record(Player::One, ms(9000)));
        assert_eq!(session.player1_time, Some(ms(4100)));
    }
}
