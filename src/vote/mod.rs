//! # Vote Module
//!
//! Binary "EV or Benzin" vote written fire-and-forget to a remote broker.
//!
//! ```text
//! vote/
//! ├── mod.rs        - selection, record and the sink capability
//! ├── mqtt_sink.rs  - rumqttc-backed sink
//! └── panel.rs      - UI-side state: locking while the thank-you is shown
//! ```
//!
//! The panel never knows the transport; it is handed an `Arc<dyn VoteSink>`
//! at construction.

pub mod mqtt_sink;
pub mod panel;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

pub use mqtt_sink::MqttVoteSink;
pub use panel::{PanelState, VotePanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteSelection {
    Ev,
    Benzin,
}

impl fmt::Display for VoteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteSelection::Ev => write!(f, "ev"),
            VoteSelection::Benzin => write!(f, "benzin"),
        }
    }
}

/// Payload of one vote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteRecord {
    /// `<selection>_<unix millis>`
    pub id: String,
    pub selection: VoteSelection,
    /// RFC 3339
    pub timestamp: String,
    /// Local human readable date
    pub date: String,
    pub client: String,
}

impl VoteRecord {
    pub fn new(selection: VoteSelection, at: DateTime<Local>, client: &str) -> Self {
        Self {
            id: format!("{}_{}", selection, at.timestamp_millis()),
            selection,
            timestamp: at.to_rfc3339(),
            date: at.format("%d.%m.%Y, %H:%M:%S").to_string(),
            client: client.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error("Failed to encode vote: {0}")]
    EncodeError(#[from] serde_json::Error),

    #[error("Failed to publish vote: {0}")]
    PublishError(String),
}

/// Write-only vote destination
pub trait VoteSink: Send + Sync {
    fn submit_vote(&self, record: &VoteRecord) -> Result<(), VoteError>;
}

/// Sink used when no broker is configured; votes are only logged
#[derive(Debug, Default)]
pub struct LogVoteSink;

impl VoteSink for LogVoteSink {
    fn submit_vote(&self, record: &VoteRecord) -> Result<(), VoteError> {
        info!("Vote {} recorded locally ({})", record.id, record.date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_id_combines_selection_and_millis() {
        let at = Local
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("valid timestamp");
        let record = VoteRecord::new(VoteSelection::Benzin, at, "test");
        assert_eq!(record.id, "benzin_1700000000123");
        assert_eq!(record.selection, VoteSelection::Benzin);
    }

    #[test]
    fn selection_serializes_lowercase() {
        let json = serde_json::to_string(&VoteSelection::Ev).expect("serialize");
        assert_eq!(json, "\"ev\"");
    }
}
