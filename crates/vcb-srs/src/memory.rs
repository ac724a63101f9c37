//! In-process [`ProgressStore`] backed by a `HashMap`.
//!
//! Used as the test double for the tracker and the HTTP layer; it honors the
//! same uniqueness rule as the database.

use std::{
    collections::HashMap,
    future::{Future, ready},
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::StoreError,
    model::{ItemRef, NewProgress, ProgressRecord, ProgressUpdate},
    store::ProgressStore,
};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    records: HashMap<i64, ProgressRecord>,
}

/// Shared in-memory progress table. Clones see the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Put a record in place as-is, replacing any record with the same id.
    pub fn seed(&self, record: ProgressRecord) {
        let mut inner = self.lock();
        inner.next_id = inner.next_id.max(record.id);
        inner.records.insert(record.id, record);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn find_now(&self, user_id: Uuid, item: ItemRef) -> Option<ProgressRecord> {
        self.lock()
            .records
            .values()
            .find(|r| r.user_id == user_id && r.item == item)
            .cloned()
    }

    fn insert_now(&self, new: NewProgress) -> Result<ProgressRecord, StoreError> {
        let mut inner = self.lock();

        if inner
            .records
            .values()
            .any(|r| r.user_id == new.user_id && r.item == new.item)
        {
            return Err(StoreError::Conflict(format!(
                "user {} and {}",
                new.user_id, new.item
            )));
        }

        inner.next_id += 1;
        let record = ProgressRecord {
            id: inner.next_id,
            user_id: new.user_id,
            item: new.item,
            last_reviewed: new.scheduling.last_reviewed,
            next_review: new.scheduling.next_review,
            ease_factor: new.ease_factor,
            interval: new.scheduling.interval,
            repetitions: new.scheduling.repetitions,
            correct_count: new.scheduling.correct_count,
            incorrect_count: new.scheduling.incorrect_count,
            is_known: new.is_known,
            is_flagged: false,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        inner.records.insert(record.id, record.clone());

        Ok(record)
    }

    fn update_now(&self, id: i64, changes: ProgressUpdate) -> Result<ProgressRecord, StoreError> {
        let mut inner = self.lock();
        let record = inner.records.get_mut(&id).ok_or(StoreError::Missing(id))?;

        let s = changes.scheduling;
        record.last_reviewed = s.last_reviewed;
        record.next_review = s.next_review;
        record.interval = s.interval;
        record.repetitions = s.repetitions;
        record.correct_count = s.correct_count;
        record.incorrect_count = s.incorrect_count;
        record.is_known = changes.is_known;
        record.updated_at = changes.updated_at;

        Ok(record.clone())
    }

    fn due_now(&self, user_id: Uuid, now: DateTime<Utc>, limit: i64) -> Vec<ProgressRecord> {
        let mut due: Vec<_> = self
            .lock()
            .records
            .values()
            .filter(|r| r.user_id == user_id && r.is_due(now))
            .cloned()
            .collect();

        due.sort_by_key(|r| (r.next_review, r.id));
        due.truncate(usize::try_from(limit).unwrap_or(0));
        due
    }
}

impl ProgressStore for MemoryProgressStore {
    fn find(
        &self,
        user_id: Uuid,
        item: ItemRef,
    ) -> impl Future<Output = Result<Option<ProgressRecord>, StoreError>> + Send {
        ready(Ok(self.find_now(user_id, item)))
    }

    fn insert(
        &self,
        new: NewProgress,
    ) -> impl Future<Output = Result<ProgressRecord, StoreError>> + Send {
        ready(self.insert_now(new))
    }

    fn update(
        &self,
        id: i64,
        changes: ProgressUpdate,
    ) -> impl Future<Output = Result<ProgressRecord, StoreError>> + Send {
        ready(self.update_now(id, changes))
    }

    fn due(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ProgressRecord>, StoreError>> + Send {
        ready(Ok(self.due_now(user_id, now, limit)))
    }
}
