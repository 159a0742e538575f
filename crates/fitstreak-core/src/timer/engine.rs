//! Session timer implementation.
//!
//! The timer is a discrete countdown state machine. It does not use
//! internal threads - the caller (normally a [`TickDriver`]) invokes
//! `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v (remaining hits 0)
//!        Completed (terminal)
//! ```
//!
//! `stop()` returns any non-terminal state to Idle with the full
//! duration restored. Completed is terminal: the completion event is
//! emitted exactly once and later ticks are no-ops.
//!
//! [`TickDriver`]: super::TickDriver

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Countdown state machine for one workout session.
///
/// Operates on whole seconds -- one `tick()` call per elapsed second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    /// Fixed for the session's lifetime.
    total_secs: u64,
    remaining_secs: u64,
    status: TimerStatus,
}

impl SessionTimer {
    /// Create a new timer in `Idle` with the full duration remaining.
    ///
    /// # Errors
    /// Returns `TimerError::InvalidDuration` if `total_secs` is zero.
    pub fn new(total_secs: u64) -> Result<Self, TimerError> {
        if total_secs == 0 {
            return Err(TimerError::InvalidDuration { secs: total_secs });
        }
        Ok(Self {
            total_secs,
            remaining_secs: total_secs,
            status: TimerStatus::Idle,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// 0.0 .. 1.0 progress through the session.
    pub fn progress(&self) -> f64 {
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the countdown.
    ///
    /// # Errors
    /// Returns `InvalidTransition` if already Running or Completed.
    pub fn start(&mut self) -> Result<Event, TimerError> {
        match self.status {
            TimerStatus::Idle => {
                self.status = TimerStatus::Running;
                Ok(Event::SessionStarted {
                    total_secs: self.total_secs,
                    at: Utc::now(),
                })
            }
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Ok(Event::SessionResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            from => Err(TimerError::InvalidTransition {
                from,
                action: "start",
            }),
        }
    }

    /// Suspend the countdown without losing progress.
    ///
    /// # Errors
    /// Returns `InvalidTransition` unless Running.
    pub fn pause(&mut self) -> Result<Event, TimerError> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                Ok(Event::SessionPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            from => Err(TimerError::InvalidTransition {
                from,
                action: "pause",
            }),
        }
    }

    /// Abandon the session: restore the full duration and return to Idle.
    ///
    /// # Errors
    /// Returns `InvalidTransition` from Completed (terminal state).
    pub fn stop(&mut self) -> Result<Event, TimerError> {
        match self.status {
            TimerStatus::Completed => Err(TimerError::InvalidTransition {
                from: TimerStatus::Completed,
                action: "stop",
            }),
            _ => {
                self.status = TimerStatus::Idle;
                self.remaining_secs = self.total_secs;
                Ok(Event::SessionStopped { at: Utc::now() })
            }
        }
    }

    /// Consume one elapsed second.
    ///
    /// Decrements remaining time while Running; on reaching zero the
    /// timer becomes Completed and the completion event is returned.
    /// Ticks in any other state (Completed included) are no-ops.
    pub fn tick(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.status = TimerStatus::Completed;
            return Some(Event::SessionCompleted {
                total_secs: self.total_secs,
                at: Utc::now(),
            });
        }
        None
    }
}
