//! API errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use boba_indexer_db::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A path parameter is not a hex address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The pagination parameters are out of range.
    #[error("invalid page: {0}")]
    InvalidPage(String),

    /// The requested resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of an API handler.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidAddress(_) | Self::InvalidPage(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(err) => {
                error!(target: "api", %err, "Store query failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let error = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "internal error".to_string(),
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
