use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;
use validator::Validate;
use vcb_srs::{ItemRef, ProgressRecord, ProgressStore, ReviewOutcome};

use super::model::{DueQuery, ProgressLookup, ProgressQuery, ProgressSubmission, ReviewResponse};
use crate::{error::ApiError, metrics, state::ApiState};

/// Create the progress routes
pub fn routes<S>() -> Router<ApiState<S>>
where
    S: ProgressStore + Clone + 'static,
{
    Router::new()
        .route(
            "/users/{user_id}/progress",
            get(get_progress::<S>).post(submit_progress::<S>),
        )
        .route("/users/{user_id}/progress/due", get(get_due_reviews::<S>))
}

/// Record a review outcome (and/or the known flag) for one vocabulary or verb item
async fn submit_progress<S>(
    State(state): State<ApiState<S>>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ProgressSubmission>,
) -> Result<Json<ReviewResponse>, ApiError>
where
    S: ProgressStore + Clone + 'static,
{
    payload.validate()?;

    let outcome = ReviewOutcome {
        was_correct: payload.was_correct,
        is_known: payload.is_known,
    };
    let result = state.tracker.submit(user_id, payload.into()).await?;

    metrics::record_review_event(result.record.item.kind(), outcome.label(), result.created);

    Ok(Json(result.into()))
}

/// Get the user's progress for a specific vocabulary or verb item
async fn get_progress<S>(
    State(state): State<ApiState<S>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressLookup>, ApiError>
where
    S: ProgressStore + Clone + 'static,
{
    query.validate()?;

    let item = ItemRef::from_ids(query.vocab_id, query.verb_id)?;
    let progress = state.tracker.get_progress(user_id, item).await?;

    Ok(Json(ProgressLookup { progress }))
}

/// Items that are due for review and not marked known, oldest first
async fn get_due_reviews<S>(
    State(state): State<ApiState<S>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<ProgressRecord>>, ApiError>
where
    S: ProgressStore + Clone + 'static,
{
    let due = state.tracker.due_reviews(user_id, query.limit).await?;
    Ok(Json(due))
}
