use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use saco_catalog::{api::ErrorResponse, CatalogError};
use thiserror::Error;

use crate::storage::StorageError;

/// Everything a handler can fail with. Converted to the JSON envelope at the
/// request boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        source: StorageError,
    },
}

impl ApiError {
    pub fn upstream(message: &'static str) -> impl FnOnce(StorageError) -> ApiError {
        move |source| ApiError::Upstream { message, source }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, None))
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("{msg}");
                (StatusCode::NOT_FOUND, ErrorResponse::new(msg, None))
            }
            ApiError::Upstream { message, source } => {
                tracing::error!("{message}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(message, Some(source.to_string())),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
