use sqlx::PgPool;
use vcb_db::PgProgressStore;
use vcb_srs::{ProgressStore, ProgressTracker};

/// Shared handler state.
///
/// Generic over the store so tests can run the router against an in-memory table.
#[derive(Clone, Debug)]
pub struct ApiState<S = PgProgressStore> {
    pub tracker: ProgressTracker<S>,
}

impl ApiState<PgProgressStore> {
    pub fn new(pool: PgPool) -> Self {
        Self::with_tracker(ProgressTracker::with_system_clock(PgProgressStore::new(
            pool,
        )))
    }
}

impl<S: ProgressStore> ApiState<S> {
    pub fn with_tracker(tracker: ProgressTracker<S>) -> Self {
        Self { tracker }
    }
}
