use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::StoreError,
    model::{ItemRef, NewProgress, ProgressRecord, ProgressUpdate},
};

/// Persistence for progress records.
///
/// Implementations enforce uniqueness on `(user_id, item)` and apply each
/// write as a single atomic statement. Concurrent writers to the same key are
/// last-write-wins.
pub trait ProgressStore: Send + Sync {
    /// Look up the record for a user and item, if any.
    fn find(
        &self,
        user_id: Uuid,
        item: ItemRef,
    ) -> impl Future<Output = Result<Option<ProgressRecord>, StoreError>> + Send;

    /// Insert a new record and return it with its assigned id.
    fn insert(
        &self,
        new: NewProgress,
    ) -> impl Future<Output = Result<ProgressRecord, StoreError>> + Send;

    /// Overwrite the mutable fields of record `id` and return the result.
    fn update(
        &self,
        id: i64,
        changes: ProgressUpdate,
    ) -> impl Future<Output = Result<ProgressRecord, StoreError>> + Send;

    /// Records due at `now` that are not marked known, oldest due first.
    fn due(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ProgressRecord>, StoreError>> + Send;
}
