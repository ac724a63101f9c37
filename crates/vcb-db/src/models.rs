use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vcb_srs::{ItemRef, ProgressRecord, StoreError};

/// Row of the `user_progress` table
/// Exactly one of `vocab_id` / `verb_id` is set (enforced by a CHECK constraint)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressRow {
    /// Unique identifier
    pub id: i64,
    /// Owning user (indexed, unique with the item id)
    pub user_id: Uuid,
    /// Vocabulary entry, if this row tracks one
    pub vocab_id: Option<i32>,
    /// Verb entry, if this row tracks one
    pub verb_id: Option<i32>,
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Indexed together with user_id for the review pool
    pub next_review: Option<DateTime<Utc>>,
    /// Scaled by 100
    pub ease_factor: i32,
    pub interval: i32,
    pub repetitions: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub is_known: bool,
    pub is_flagged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProgressRow> for ProgressRecord {
    type Error = StoreError;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        let item = ItemRef::from_ids(row.vocab_id, row.verb_id).map_err(|e| {
            StoreError::InvalidRecord(format!("user_progress row {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            item,
            last_reviewed: row.last_reviewed,
            next_review: row.next_review,
            ease_factor: row.ease_factor,
            interval: row.interval,
            repetitions: row.repetitions,
            correct_count: row.correct_count,
            incorrect_count: row.incorrect_count,
            is_known: row.is_known,
            is_flagged: row.is_flagged,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
