//! Calendar-day streak derivation.

use chrono::{DateTime, Utc};

use super::record::SessionRecord;

/// Derive the streak value for a session completing at `now` given the
/// most recent prior record, if any.
///
/// The streak counts consecutive calendar days with at least one
/// completion, not session count:
/// - no prior record: 1
/// - prior record on the day immediately before `now`'s day: prior + 1
/// - same-day repeat or a gap of two or more days: 1
///
/// Day boundaries are evaluated in UTC exclusively. Mixing local and
/// UTC calendars across devices would make "yesterday" ambiguous, so
/// the comparison is pinned here rather than left to the caller.
pub fn next_streak(prior: Option<&SessionRecord>, now: DateTime<Utc>) -> u32 {
    let Some(prior) = prior else {
        return 1;
    };
    let prior_day = prior.completed_at.date_naive();
    let today = now.date_naive();
    match prior_day.succ_opt() {
        Some(next_day) if next_day == today => prior.streak + 1,
        _ => 1,
    }
}
