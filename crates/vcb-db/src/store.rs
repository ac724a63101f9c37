//! PostgreSQL implementation of [`ProgressStore`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use vcb_srs::{ItemRef, NewProgress, ProgressRecord, ProgressStore, ProgressUpdate, StoreError};

use crate::repositories::progress;

#[derive(Debug, Clone)]
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Unique violations become [`StoreError::Conflict`] and foreign key
/// violations (unknown user or item) become [`StoreError::NotFound`].
fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            let target = match db_err.constraint() {
                Some(c) if c.contains("user_id") => "User",
                Some(c) if c.contains("vocab_id") => "Vocabulary item",
                Some(c) if c.contains("verb_id") => "Verb",
                _ => "Referenced row",
            };
            return StoreError::NotFound(format!("{target} not found"));
        }
    }
    StoreError::Backend(Box::new(err))
}

impl ProgressStore for PgProgressStore {
    async fn find(
        &self,
        user_id: Uuid,
        item: ItemRef,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        progress::find_progress(&self.pool, user_id, item)
            .await
            .map_err(store_error)?
            .map(ProgressRecord::try_from)
            .transpose()
    }

    async fn insert(&self, new: NewProgress) -> Result<ProgressRecord, StoreError> {
        let row = progress::insert_progress(&self.pool, &new)
            .await
            .map_err(store_error)?;
        row.try_into()
    }

    async fn update(&self, id: i64, changes: ProgressUpdate) -> Result<ProgressRecord, StoreError> {
        progress::update_progress(&self.pool, id, &changes)
            .await
            .map_err(store_error)?
            .ok_or(StoreError::Missing(id))?
            .try_into()
    }

    async fn due(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<ProgressRecord>, StoreError> {
        progress::list_due_progress(&self.pool, user_id, now, limit)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(ProgressRecord::try_from)
            .collect()
    }
}
