//! Tick source ownership.
//!
//! A [`TickDriver`] owns the tokio task that delivers one tick per
//! second to a shared [`SessionTimer`]. The task is scoped to the
//! driver's lifetime: `stop()` and `Drop` both abort it, so no
//! decrement or completion event can fire after teardown. Starting a
//! fresh driver never leaves an earlier tick registration alive.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

use super::SessionTimer;
use crate::error::TimerError;
use crate::events::Event;

/// Drives a shared [`SessionTimer`] from a dedicated tokio task.
///
/// Emits a [`Event::StateSnapshot`] after every tick and the
/// completion event when the countdown expires, then the task exits.
/// The caller is expected to have `start()`ed the timer first.
pub struct TickDriver {
    timer: Arc<Mutex<SessionTimer>>,
    task: JoinHandle<()>,
}

impl TickDriver {
    /// Spawn the per-second tick task. Must be called inside a tokio
    /// runtime.
    pub fn spawn(timer: Arc<Mutex<SessionTimer>>) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task_timer = Arc::clone(&timer);
        let task = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            // The first interval tick resolves immediately; skip it so
            // the first decrement lands one full second after spawn.
            interval.tick().await;
            loop {
                interval.tick().await;
                let (event, completed) = {
                    let Ok(mut timer) = task_timer.lock() else {
                        break;
                    };
                    match timer.tick() {
                        Some(event) => (event, true),
                        None => (timer.snapshot(), false),
                    }
                };
                if tx.send(event).is_err() || completed {
                    break;
                }
            }
        });
        (Self { timer, task }, rx)
    }

    /// Pause the countdown. The tick task stays alive; paused ticks
    /// are no-ops in the timer.
    pub fn pause(&self) -> Result<Event, TimerError> {
        self.lock().pause()
    }

    /// Resume a paused countdown.
    pub fn resume(&self) -> Result<Event, TimerError> {
        self.lock().start()
    }

    /// Stop the session and synchronously cancel the tick task.
    ///
    /// No event (completion included) is delivered after this returns.
    pub fn stop(&self) -> Result<Event, TimerError> {
        let event = self.lock().stop()?;
        self.task.abort();
        Ok(event)
    }

    /// Current timer snapshot.
    pub fn snapshot(&self) -> Event {
        self.lock().snapshot()
    }

    /// Whether the tick task has exited (completion, cancel, or
    /// receiver dropped).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionTimer> {
        self.timer.lock().expect("session timer mutex poisoned")
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
