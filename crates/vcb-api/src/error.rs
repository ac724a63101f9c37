use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use vcb_srs::{StoreError, TrackerError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidRequest(msg) => Self::InvalidRequest(msg),
            TrackerError::Store(StoreError::NotFound(msg)) => Self::NotFound(msg),
            TrackerError::Store(StoreError::Conflict(msg)) => Self::Conflict(msg),
            TrackerError::Store(err) => Self::Store(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, errors.to_string()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Conflict(msg) => {
                tracing::warn!("Concurrent progress write: {msg}");
                (
                    StatusCode::CONFLICT,
                    "Progress was modified concurrently, please retry".to_string(),
                )
            }
            Self::Store(err) => {
                // Details stay in the logs
                tracing::error!(error = %err, "Progress store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Progress store unavailable".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_error_mapping() {
        let err = ApiError::from(TrackerError::InvalidRequest("vocab_id or verb_id required".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(TrackerError::Store(StoreError::Conflict("dup".into())));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);

        let err = ApiError::from(TrackerError::Store(StoreError::Missing(3)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_user_or_item_is_not_found() {
        let err = ApiError::from(TrackerError::Store(StoreError::NotFound(
            "User not found".into(),
        )));
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg == "User not found"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_failure_body_is_generic() {
        use http_body_util::BodyExt;

        let backend: Box<dyn std::error::Error + Send + Sync> = "connection reset".into();
        let response = ApiError::Store(StoreError::Backend(backend)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Progress store unavailable");
    }
}
