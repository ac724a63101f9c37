//! Interval arithmetic for the review scheduler.
//!
//! A simplified SM-2 variant: the interval doubles on every correct answer
//! (capped at one year) and falls back to a single day on a miss. The ease
//! factor is carried on the record but never adjusted.

use chrono::{DateTime, Duration, Utc};

/// Interval assigned to a freshly created record and after any miss.
pub const INITIAL_INTERVAL_DAYS: i32 = 1;

/// Upper bound for the doubling interval.
pub const MAX_INTERVAL_DAYS: i32 = 365;

/// Ease factor stored as an integer scaled by [`EASE_FACTOR_SCALE`] (2.5 => 250).
pub const DEFAULT_EASE_FACTOR: i32 = 250;

/// Scale applied to [`DEFAULT_EASE_FACTOR`] and `ProgressRecord::ease_factor`.
pub const EASE_FACTOR_SCALE: i32 = 100;

/// Whether a miss drops the consecutive-correct streak back to zero.
///
/// Classic SM-2 resets repetitions on failure. The review flow this service
/// replaces kept the streak as-is, and `false` preserves that behavior.
pub const RESET_REPETITIONS_ON_FAILURE: bool = false;

/// Scheduling and counter fields of a progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingState {
    pub interval: i32,
    pub repetitions: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
}

/// Compute the interval (in days) that follows `current` after a review.
///
/// Non-positive stored intervals are treated as [`INITIAL_INTERVAL_DAYS`].
///
/// # Examples
/// ```
/// use vcb_srs::schedule::next_interval;
///
/// assert_eq!(next_interval(4, true), 8);
/// assert_eq!(next_interval(300, true), 365);
/// assert_eq!(next_interval(200, false), 1);
/// ```
pub fn next_interval(current: i32, was_correct: bool) -> i32 {
    if !was_correct {
        return INITIAL_INTERVAL_DAYS;
    }

    current
        .max(INITIAL_INTERVAL_DAYS)
        .saturating_mul(2)
        .min(MAX_INTERVAL_DAYS)
}

/// The instant at which an item reviewed at `now` becomes due again.
pub fn due_at(now: DateTime<Utc>, interval_days: i32) -> DateTime<Utc> {
    now + Duration::days(i64::from(interval_days))
}

/// State of a record created by its first submission.
///
/// Timestamps are always set, even when no outcome was supplied.
pub fn initial_state(was_correct: Option<bool>, now: DateTime<Utc>) -> SchedulingState {
    let correct = was_correct == Some(true);
    let incorrect = was_correct == Some(false);

    SchedulingState {
        interval: INITIAL_INTERVAL_DAYS,
        repetitions: i32::from(correct),
        correct_count: i32::from(correct),
        incorrect_count: i32::from(incorrect),
        last_reviewed: Some(now),
        next_review: Some(due_at(now, INITIAL_INTERVAL_DAYS)),
    }
}

/// Apply one graded review to an existing state.
pub fn apply_review(
    state: &SchedulingState,
    was_correct: bool,
    now: DateTime<Utc>,
) -> SchedulingState {
    let interval = next_interval(state.interval, was_correct);

    let (correct_count, incorrect_count, repetitions) = if was_correct {
        (
            state.correct_count + 1,
            state.incorrect_count,
            state.repetitions + 1,
        )
    } else {
        let repetitions = if RESET_REPETITIONS_ON_FAILURE {
            0
        } else {
            state.repetitions
        };
        (state.correct_count, state.incorrect_count + 1, repetitions)
    };

    SchedulingState {
        interval,
        repetitions,
        correct_count,
        incorrect_count,
        last_reviewed: Some(now),
        next_review: Some(due_at(now, interval)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_next_interval() {
        assert_eq!(next_interval(1, true), 2);
        assert_eq!(next_interval(2, true), 4);
        assert_eq!(next_interval(182, true), 364);
        assert_eq!(next_interval(183, true), 365); // Capped
        assert_eq!(next_interval(365, true), 365);
        assert_eq!(next_interval(i32::MAX, true), 365); // No overflow
        assert_eq!(next_interval(0, true), 2); // Treated as 1
        assert_eq!(next_interval(-5, true), 2);

        assert_eq!(next_interval(1, false), 1);
        assert_eq!(next_interval(200, false), 1);
    }

    #[test]
    fn test_initial_state() {
        let now = at(1);

        let correct = initial_state(Some(true), now);
        assert_eq!(correct.interval, 1);
        assert_eq!(correct.repetitions, 1);
        assert_eq!(correct.correct_count, 1);
        assert_eq!(correct.incorrect_count, 0);
        assert_eq!(correct.last_reviewed, Some(now));
        assert_eq!(correct.next_review, Some(at(2)));

        let incorrect = initial_state(Some(false), now);
        assert_eq!(incorrect.repetitions, 0);
        assert_eq!(incorrect.correct_count, 0);
        assert_eq!(incorrect.incorrect_count, 1);

        // No outcome: timestamps only
        let untouched = initial_state(None, now);
        assert_eq!(untouched.correct_count, 0);
        assert_eq!(untouched.incorrect_count, 0);
        assert_eq!(untouched.next_review, Some(at(2)));
    }

    #[test]
    fn test_apply_review_miss_keeps_counters_monotonic() {
        let state = SchedulingState {
            interval: 4,
            repetitions: 2,
            correct_count: 2,
            incorrect_count: 3,
            last_reviewed: Some(at(1)),
            next_review: Some(at(5)),
        };

        let next = apply_review(&state, false, at(6));
        assert_eq!(next.interval, 1);
        assert_eq!(next.correct_count, 2);
        assert_eq!(next.incorrect_count, 4);
        assert_eq!(next.last_reviewed, Some(at(6)));
        assert_eq!(next.next_review, Some(at(7)));

        let expected_repetitions = if RESET_REPETITIONS_ON_FAILURE { 0 } else { 2 };
        assert_eq!(next.repetitions, expected_repetitions);
    }

    #[test]
    fn test_due_at_uses_whole_days() {
        assert_eq!(due_at(at(1), 3), at(4));
        assert_eq!(
            due_at(at(1), MAX_INTERVAL_DAYS) - at(1),
            Duration::days(365)
        );
    }
}
