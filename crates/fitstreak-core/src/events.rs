use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerStatus;

/// Every timer state change produces an Event.
/// The CLI prints them as JSON lines; embedders consume them from the
/// tick driver's channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Manual stop; remaining time has been reset to the full duration.
    SessionStopped {
        at: DateTime<Utc>,
    },
    /// Natural expiry. Emitted at most once per session instance.
    SessionCompleted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}
