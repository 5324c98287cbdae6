//! Vote screen state
//!
//! After a successful submit the panel shows a thank-you for a fixed time and
//! ignores further votes until it clears. A failed submit unlocks at once.

use crate::vote::{VoteRecord, VoteSelection, VoteSink};
use chrono::Local;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Ready,
    Thanks {
        selection: VoteSelection,
        until: Instant,
    },
}

pub struct VotePanel {
    sink: Arc<dyn VoteSink>,
    state: PanelState,
    thanks_for: Duration,
    client: String,
    last_error: Option<String>,
    submitted: u32,
}

impl VotePanel {
    pub fn new(sink: Arc<dyn VoteSink>, thanks_for: Duration, client: impl Into<String>) -> Self {
        Self {
            sink,
            state: PanelState::Ready,
            thanks_for,
            client: client.into(),
            last_error: None,
            submitted: 0,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn submitted(&self) -> u32 {
        self.submitted
    }

    /// Submits a vote unless the thank-you is still showing. Returns true on success.
    pub fn vote(&mut self, selection: VoteSelection, now: Instant) -> bool {
        self.tick(now);
        if self.state != PanelState::Ready {
            return false;
        }

        let record = VoteRecord::new(selection, Local::now(), &self.client);
        match self.sink.submit_vote(&record) {
            Ok(()) => {
                info!("Vote {} submitted", record.id);
                self.submitted += 1;
                self.last_error = None;
                self.state = PanelState::Thanks {
                    selection,
                    until: now + self.thanks_for,
                };
                true
            }
            Err(e) => {
                error!("Error saving vote: {}", e);
                self.last_error = Some(e.to_string());
                self.state = PanelState::Ready;
                false
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let PanelState::Thanks { until, .. } = self.state {
            if now >= until {
                self.state = PanelState::Ready;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::VoteError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<VoteRecord>>,
        fail: bool,
    }

    impl VoteSink for RecordingSink {
        fn submit_vote(&self, record: &VoteRecord) -> Result<(), VoteError> {
            if self.fail {
                return Err(VoteError::PublishError("broker unavailable".to_string()));
            }
            self.records
                .lock()
                .expect("sink lock")
                .push(record.clone());
            Ok(())
        }
    }

    const THANKS: Duration = Duration::from_millis(2000);

    #[test]
    fn votes_are_locked_while_thanks_is_shown() {
        let sink = Arc::new(RecordingSink::default());
        let mut panel = VotePanel::new(sink.clone(), THANKS, "test");
        let t0 = Instant::now();

        assert!(panel.vote(VoteSelection::Ev, t0));
        assert!(!panel.vote(VoteSelection::Benzin, t0 + Duration::from_millis(1500)));
        assert!(panel.vote(VoteSelection::Benzin, t0 + THANKS));

        let records = sink.records.lock().expect("sink lock");
        let selections: Vec<_> = records.iter().map(|record| record.selection).collect();
        assert_eq!(selections, vec![VoteSelection::Ev, VoteSelection::Benzin]);
        assert_eq!(panel.submitted(), 2);
    }

    #[test]
    fn thanks_clears_after_timeout() {
        let mut panel = VotePanel::new(Arc::new(RecordingSink::default()), THANKS, "test");
        let t0 = Instant::now();
        panel.vote(VoteSelection::Ev, t0);
        assert!(matches!(
            panel.state(),
            PanelState::Thanks {
                selection: VoteSelection::Ev,
                ..
            }
        ));
        panel.tick(t0 + THANKS);
        assert_eq!(panel.state(), PanelState::Ready);
    }

    #[test]
    fn failed_submit_unlocks_immediately() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let mut panel = VotePanel::new(sink, THANKS, "test");
        let t0 = Instant::now();

        assert!(!panel.vote(VoteSelection::Ev, t0));
        assert_eq!(panel.state(), PanelState::Ready);
        assert!(panel.last_error().is_some());
        assert_eq!(panel.submitted(), 0);
    }
}
