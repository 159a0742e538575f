//! Completed-session recording workflow.
//!
//! When a timer reaches zero the caller hands the completion to a
//! [`SessionRecorder`], which reads the latest prior record, derives
//! the new streak and appends a fresh record through the injected
//! store. Store failures degrade the outcome (streak 1, no record id)
//! but never fail the completion path: the timer's terminal state is
//! already a fact by the time recording starts.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::record::{Difficulty, RecordId, SessionRecord};
use super::streak::next_streak;
use crate::error::StoreError;
use crate::store::SessionStore;

/// Non-fatal degradations of a recording attempt.
#[derive(Debug, Error)]
pub enum RecordWarning {
    /// The latest-record query failed; streak defaulted to 1.
    #[error("streak unavailable, defaulting to 1: {0}")]
    StreakUnavailable(StoreError),

    /// The append failed; the record exists locally only.
    #[error("record not persisted: {0}")]
    WriteFailed(StoreError),
}

/// Result of [`SessionRecorder::record_completion`].
///
/// `record_id` is `None` exactly when a [`RecordWarning::WriteFailed`]
/// warning is present.
#[derive(Debug)]
pub struct CompletionOutcome {
    pub record: SessionRecord,
    pub record_id: Option<RecordId>,
    pub warnings: Vec<RecordWarning>,
}

impl CompletionOutcome {
    pub fn persisted(&self) -> bool {
        self.record_id.is_some()
    }
}

/// Records completed sessions with a derived streak value.
pub struct SessionRecorder<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a completed-session record for `user_id`.
    ///
    /// Reads the most recent prior record to derive the streak (read
    /// failure degrades the streak to 1 with a warning), then appends
    /// the new record (write failure is reported as a warning and the
    /// locally-built record is returned without an id). There is no
    /// automatic retry; retry policy belongs to the store.
    pub async fn record_completion(
        &self,
        user_id: &str,
        title: &str,
        difficulty: Difficulty,
        duration_min: u64,
        now: DateTime<Utc>,
    ) -> CompletionOutcome {
        let mut warnings = Vec::new();

        let prior = match self.store.query_latest(user_id).await {
            Ok(prior) => prior,
            Err(err) => {
                warnings.push(RecordWarning::StreakUnavailable(err));
                None
            }
        };

        let record = SessionRecord {
            title: title.to_string(),
            difficulty,
            duration_min,
            completed_at: now,
            streak: next_streak(prior.as_ref(), now),
        };

        let record_id = match self.store.append(user_id, &record).await {
            Ok(id) => Some(id),
            Err(err) => {
                warnings.push(RecordWarning::WriteFailed(err));
                None
            }
        };

        CompletionOutcome {
            record,
            record_id,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};

    /// Store fake whose reads and/or writes always fail.
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl SessionStore for FlakyStore {
        async fn query_latest(
            &self,
            user_id: &str,
        ) -> Result<Option<SessionRecord>, StoreError> {
            if self.fail_reads {
                return Err(StoreError::Read {
                    message: "connection refused".into(),
                });
            }
            self.inner.query_latest(user_id).await
        }

        async fn query_all(&self, user_id: &str) -> Result<Vec<SessionRecord>, StoreError> {
            self.inner.query_all(user_id).await
        }

        async fn append(
            &self,
            user_id: &str,
            record: &SessionRecord,
        ) -> Result<RecordId, StoreError> {
            if self.fail_writes {
                return Err(StoreError::Write {
                    message: "connection refused".into(),
                });
            }
            self.inner.append(user_id, record).await
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 25, 18, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn first_completion_starts_streak_at_one() {
        let recorder = SessionRecorder::new(MemoryStore::new());
        let outcome = recorder
            .record_completion("u1", "Push-Ups", Difficulty::Beginner, 10, now())
            .await;
        assert_eq!(outcome.record.streak, 1);
        assert!(outcome.persisted());
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn consecutive_day_extends_streak() {
        let store = MemoryStore::new();
        store
            .append(
                "u1",
                &SessionRecord {
                    title: "Squats".into(),
                    difficulty: Difficulty::Intermediate,
                    duration_min: 15,
                    completed_at: now() - Duration::days(1),
                    streak: 3,
                },
            )
            .await
            .unwrap();

        let recorder = SessionRecorder::new(store);
        let outcome = recorder
            .record_completion("u1", "Push-Ups", Difficulty::Beginner, 10, now())
            .await;
        assert_eq!(outcome.record.streak, 4);

        // The prior record was appended to, never overwritten.
        let all = recorder.store().query_all("u1").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn same_day_repeat_resets_streak() {
        let store = MemoryStore::new();
        store
            .append(
                "u1",
                &SessionRecord {
                    title: "Squats".into(),
                    difficulty: Difficulty::Advanced,
                    duration_min: 20,
                    completed_at: now() - Duration::hours(2),
                    streak: 6,
                },
            )
            .await
            .unwrap();

        let recorder = SessionRecorder::new(store);
        let outcome = recorder
            .record_completion("u1", "Push-Ups", Difficulty::Beginner, 10, now())
            .await;
        assert_eq!(outcome.record.streak, 1);
    }

    #[tokio::test]
    async fn read_failure_degrades_streak_with_warning() {
        let recorder = SessionRecorder::new(FlakyStore {
            inner: MemoryStore::new(),
            fail_reads: true,
            fail_writes: false,
        });
        let outcome = recorder
            .record_completion("u1", "Push-Ups", Difficulty::Beginner, 10, now())
            .await;
        assert_eq!(outcome.record.streak, 1);
        assert!(outcome.persisted());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            outcome.warnings[0],
            RecordWarning::StreakUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn write_failure_returns_local_record_with_warning() {
        let recorder = SessionRecorder::new(FlakyStore {
            inner: MemoryStore::new(),
            fail_reads: false,
            fail_writes: true,
        });
        let outcome = recorder
            .record_completion("u1", "Push-Ups", Difficulty::Beginner, 10, now())
            .await;
        assert_eq!(outcome.record.streak, 1);
        assert!(!outcome.persisted());
        assert!(matches!(
            outcome.warnings[0],
            RecordWarning::WriteFailed(_)
        ));
    }

    #[tokio::test]
    async fn records_are_isolated_per_user() {
        let recorder = SessionRecorder::new(MemoryStore::new());
        recorder
            .record_completion("u1", "Push-Ups", Difficulty::Beginner, 10, now())
            .await;
        let outcome = recorder
            .record_completion(
                "u2",
                "Squats",
                Difficulty::Advanced,
                20,
                now() + Duration::days(1),
            )
            .await;
        // u2 has no history; u1's record must not leak into the streak.
        assert_eq!(outcome.record.streak, 1);
    }
}
