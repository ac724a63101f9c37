use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use vcb_srs::ProgressStore;

use crate::{progress, state::ApiState};

pub fn router<S>() -> Router<ApiState<S>>
where
    S: ProgressStore + Clone + 'static,
{
    Router::new()
        .route("/health", get(health))
        .merge(progress::routes::<S>())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
