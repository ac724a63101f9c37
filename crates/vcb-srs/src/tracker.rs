use std::sync::Arc;

use uuid::Uuid;

use crate::{
    clock::{Clock, SystemClock},
    error::{StoreError, TrackerError},
    model::{ItemRef, NewProgress, ProgressRecord, ProgressUpdate, ReviewOutcome, ReviewRequest},
    schedule::{apply_review, initial_state},
    store::ProgressStore,
};

/// Number of due items returned when the caller gives no limit.
pub const DEFAULT_DUE_LIMIT: i64 = 20;

/// Largest page of due items a caller may request.
pub const MAX_DUE_LIMIT: i64 = 100;

/// Result of [`ProgressTracker::record_review`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResult {
    /// The persisted record after this review
    pub record: ProgressRecord,
    /// `true` when this call created the record
    pub created: bool,
}

/// Applies review outcomes to per-user progress records.
///
/// Each call performs at most one read and one write against the store.
#[derive(Debug, Clone)]
pub struct ProgressTracker<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: ProgressStore> ProgressTracker<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn with_system_clock(store: S) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Validate a raw submission and record it.
    ///
    /// Invalid item references are rejected before the store is touched.
    pub async fn submit(
        &self,
        user_id: Uuid,
        request: ReviewRequest,
    ) -> Result<ReviewResult, TrackerError> {
        let (item, outcome) = request.into_parts()?;
        self.record_review(user_id, item, outcome).await
    }

    /// Record one review outcome for `item` and persist the new schedule.
    ///
    /// A missing record is created. On an existing record a graded outcome
    /// moves the schedule forward, while `is_known` alone only sets the flag.
    /// If a concurrent first review inserts the record between the lookup and
    /// the insert, this review is applied to that record instead.
    pub async fn record_review(
        &self,
        user_id: Uuid,
        item: ItemRef,
        outcome: ReviewOutcome,
    ) -> Result<ReviewResult, TrackerError> {
        let now = self.clock.now();

        let current = match self.store.find(user_id, item).await? {
            Some(current) => current,
            None => {
                let new = NewProgress::new(
                    user_id,
                    item,
                    initial_state(outcome.was_correct, now),
                    outcome.is_known.unwrap_or(false),
                    now,
                );
                match self.store.insert(new).await {
                    Ok(record) => {
                        tracing::info!(
                            %user_id,
                            %item,
                            outcome = outcome.label(),
                            interval = record.interval,
                            "Created progress record"
                        );

                        return Ok(ReviewResult {
                            record,
                            created: true,
                        });
                    }
                    // Lost a race with another first review: apply on top of the winner
                    Err(StoreError::Conflict(msg)) => {
                        tracing::debug!(%user_id, %item, "Progress record created concurrently");
                        self.store
                            .find(user_id, item)
                            .await?
                            .ok_or(StoreError::Conflict(msg))?
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        };

        let scheduling = match outcome.was_correct {
            Some(was_correct) => apply_review(&current.scheduling(), was_correct, now),
            None => current.scheduling(),
        };

        let changes = ProgressUpdate {
            scheduling,
            is_known: outcome.is_known.unwrap_or(current.is_known),
            updated_at: now,
        };
        let record = self.store.update(current.id, changes).await?;

        tracing::info!(
            %user_id,
            %item,
            outcome = outcome.label(),
            previous_interval = current.interval,
            interval = record.interval,
            repetitions = record.repetitions,
            "Updated progress record"
        );

        Ok(ReviewResult {
            record,
            created: false,
        })
    }

    /// Current progress for a user and item, `None` if never reviewed.
    pub async fn get_progress(
        &self,
        user_id: Uuid,
        item: ItemRef,
    ) -> Result<Option<ProgressRecord>, TrackerError> {
        let record = self.store.find(user_id, item).await?;
        tracing::debug!(%user_id, %item, found = record.is_some(), "Fetched progress");
        Ok(record)
    }

    /// Items due for review now, excluding known items, oldest due first.
    ///
    /// `limit` is clamped to `1..=MAX_DUE_LIMIT`.
    pub async fn due_reviews(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ProgressRecord>, TrackerError> {
        let limit = limit.unwrap_or(DEFAULT_DUE_LIMIT).clamp(1, MAX_DUE_LIMIT);
        let due = self.store.due(user_id, self.clock.now(), limit).await?;
        tracing::debug!(%user_id, limit, count = due.len(), "Fetched due reviews");
        Ok(due)
    }
}
