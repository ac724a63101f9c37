use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::TrackerError,
    schedule::{DEFAULT_EASE_FACTOR, EASE_FACTOR_SCALE, SchedulingState},
};

/// The item a progress record tracks: a vocabulary entry or a verb entry, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ItemRef {
    Vocab(i32),
    Verb(i32),
}

impl ItemRef {
    /// Build an item reference from the two optional ids a caller may send.
    ///
    /// Exactly one id must be present and it must be positive.
    ///
    /// # Examples
    /// ```
    /// use vcb_srs::ItemRef;
    ///
    /// assert_eq!(ItemRef::from_ids(Some(42), None).unwrap(), ItemRef::Vocab(42));
    /// assert!(ItemRef::from_ids(Some(1), Some(2)).is_err());
    /// assert!(ItemRef::from_ids(None, None).is_err());
    /// ```
    pub fn from_ids(vocab_id: Option<i32>, verb_id: Option<i32>) -> Result<Self, TrackerError> {
        let item = match (vocab_id, verb_id) {
            (Some(id), None) => Self::Vocab(id),
            (None, Some(id)) => Self::Verb(id),
            (None, None) => {
                return Err(TrackerError::InvalidRequest(
                    "vocab_id or verb_id required".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(TrackerError::InvalidRequest(
                    "only one of vocab_id or verb_id may be set".to_string(),
                ));
            }
        };

        if item.id() <= 0 {
            return Err(TrackerError::InvalidRequest(format!(
                "{} id must be positive, got {}",
                item.kind(),
                item.id()
            )));
        }

        Ok(item)
    }

    pub const fn id(&self) -> i32 {
        match self {
            Self::Vocab(id) | Self::Verb(id) => *id,
        }
    }

    /// Short label used in logs and metrics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Vocab(_) => "vocab",
            Self::Verb(_) => "verb",
        }
    }

    pub const fn vocab_id(&self) -> Option<i32> {
        match self {
            Self::Vocab(id) => Some(*id),
            Self::Verb(_) => None,
        }
    }

    pub const fn verb_id(&self) -> Option<i32> {
        match self {
            Self::Verb(id) => Some(*id),
            Self::Vocab(_) => None,
        }
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// What the learner reported for one item.
///
/// Both fields are optional; an empty outcome only touches timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub was_correct: Option<bool>,
    pub is_known: Option<bool>,
}

impl ReviewOutcome {
    pub const fn graded(was_correct: bool) -> Self {
        Self {
            was_correct: Some(was_correct),
            is_known: None,
        }
    }

    pub const fn known(is_known: bool) -> Self {
        Self {
            was_correct: None,
            is_known: Some(is_known),
        }
    }

    /// Label for metrics: `correct`, `incorrect` or `none`.
    pub const fn label(&self) -> &'static str {
        match self.was_correct {
            Some(true) => "correct",
            Some(false) => "incorrect",
            None => "none",
        }
    }
}

/// Unvalidated review submission as it arrives from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub vocab_id: Option<i32>,
    pub verb_id: Option<i32>,
    pub was_correct: Option<bool>,
    pub is_known: Option<bool>,
}

impl ReviewRequest {
    /// Split into a validated item reference and the outcome.
    pub fn into_parts(self) -> Result<(ItemRef, ReviewOutcome), TrackerError> {
        let item = ItemRef::from_ids(self.vocab_id, self.verb_id)?;
        Ok((
            item,
            ReviewOutcome {
                was_correct: self.was_correct,
                is_known: self.is_known,
            },
        ))
    }
}

/// Per-user, per-item spaced repetition state.
///
/// Unique on `(user_id, item)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Store-assigned identifier
    pub id: i64,
    /// Owning user
    pub user_id: Uuid,
    /// Tracked vocabulary or verb entry
    pub item: ItemRef,
    /// Last graded review (absent until the first review)
    pub last_reviewed: Option<DateTime<Utc>>,
    /// When the item is due again (absent until the first review)
    pub next_review: Option<DateTime<Utc>>,
    /// Ease factor scaled by 100 (2.5 => 250); carried but not adjusted
    pub ease_factor: i32,
    /// Days until the next review
    pub interval: i32,
    /// Consecutive correct reviews
    pub repetitions: i32,
    /// Total correct reviews, never reset
    pub correct_count: i32,
    /// Total incorrect reviews, never reset
    pub incorrect_count: i32,
    /// Mastered items are left out of the review pool
    pub is_known: bool,
    /// Marked by the learner for extra practice
    pub is_flagged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub const fn scheduling(&self) -> SchedulingState {
        SchedulingState {
            interval: self.interval,
            repetitions: self.repetitions,
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
            last_reviewed: self.last_reviewed,
            next_review: self.next_review,
        }
    }

    /// Ease factor as a rational number.
    pub fn ease(&self) -> f64 {
        f64::from(self.ease_factor) / f64::from(EASE_FACTOR_SCALE)
    }

    /// Whether the item belongs in the review pool at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.is_known && self.next_review.is_some_and(|at| at <= now)
    }
}

/// Fields for a record that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgress {
    pub user_id: Uuid,
    pub item: ItemRef,
    pub scheduling: SchedulingState,
    pub ease_factor: i32,
    pub is_known: bool,
    pub created_at: DateTime<Utc>,
}

impl NewProgress {
    pub const fn new(
        user_id: Uuid,
        item: ItemRef,
        scheduling: SchedulingState,
        is_known: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            item,
            scheduling,
            ease_factor: DEFAULT_EASE_FACTOR,
            is_known,
            created_at,
        }
    }
}

/// Mutable fields written back to an existing record in one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub scheduling: SchedulingState,
    pub is_known: bool,
    pub updated_at: DateTime<Utc>,
}
