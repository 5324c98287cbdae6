//! Single-active timer slots driven by an external clock
//!
//! A [`TimerSlot`] holds at most one armed deadline. Arming a slot replaces
//! whatever was armed before, so a superseded timer can never fire. Each
//! arm is tagged with an owner (the game session id) that the handler
//! compares against the current session before acting.

use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Clears the carousel transition flag
    Transition,
    /// Decides single vs multiplayer after key1
    Arbitration,
    /// 1s countdown ticker
    Countdown,
    /// Forces the session back to idle
    AutoReset,
    /// Refreshes the display-only elapsed time
    DisplayPoll,
}

/// A due timer, reported at its own deadline rather than at the polling instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    pub kind: TimerKind,
    pub at: Instant,
    pub owner: u64,
}

#[derive(Debug, Clone)]
pub struct TimerSlot {
    kind: TimerKind,
    deadline: Option<Instant>,
    period: Option<Duration>,
    owner: u64,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            deadline: None,
            period: None,
            owner: 0,
        }
    }

    /// Arms a one-shot timer. A delay past the clock's range leaves the slot disarmed.
    pub fn arm_once(&mut self, now: Instant, after: Duration, owner: u64) {
        if self.deadline.is_some() {
            debug!("Replacing armed {:?} timer", self.kind);
        }
        self.deadline = now.checked_add(after);
        if self.deadline.is_none() {
            warn!("{:?} delay {:?} out of range, timer not armed", self.kind, after);
        }
        self.period = None;
        self.owner = owner;
    }

    /// Arms a repeating timer; a zero period is bumped to 1ms so it cannot spin
    pub fn arm_repeating(&mut self, now: Instant, period: Duration, owner: u64) {
        let period = period.max(Duration::from_millis(1));
        if self.deadline.is_some() {
            debug!("Replacing armed {:?} interval", self.kind);
        }
        self.deadline = now.checked_add(period);
        self.period = self.deadline.map(|_| period);
        if self.deadline.is_none() {
            warn!("{:?} period {:?} out of range, timer not armed", self.kind, period);
        }
        self.owner = owner;
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            debug!("Cancelled {:?} timer", self.kind);
        }
        self.period = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Due deadline, if any, without consuming it
    pub fn due(&self, now: Instant) -> Option<Instant> {
        self.deadline.filter(|deadline| *deadline <= now)
    }

    /// Consumes one due fire. One-shots disarm, intervals move one period ahead.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerFire> {
        let at = self.due(now)?;
        self.deadline = self.period.and_then(|period| at.checked_add(period));
        Some(TimerFire {
            kind: self.kind,
            at,
            owner: self.owner,
        })
    }
}
