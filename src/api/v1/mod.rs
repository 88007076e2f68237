//! V1 JSON API handlers.

mod items;


pub use items::*;

use axum::{Json, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::db::DbError;
use crate::inventory::AnalyticsError;

/// Error response body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Item '42' not found")]
    pub error: String,
}

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

pub(crate) fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub(crate) fn db_error(e: DbError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        DbError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => {
            error!(error = %e, "Storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, e.to_string())
}

pub(crate) fn analytics_error(e: AnalyticsError) -> (StatusCode, Json<ErrorResponse>) {
    error!(error = %e, "Inventory analytics failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
