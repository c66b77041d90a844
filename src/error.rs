use crate::mail::RelayError;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Failures a handler hands back to axum. Form problems never get here; those
/// re-render the form instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Store(StoreError),
    #[error(transparent)]
    Relay(#[from] RelayError),
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            err => AppError::Store(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(crate::views::not_found().into_string()),
            )
                .into_response(),
            err => {
                tracing::error!("Error handling request: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(crate::views::server_error().into_string()),
                )
                    .into_response()
            }
        }
    }
}
