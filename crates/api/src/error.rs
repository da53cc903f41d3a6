//! HTTP error responses.
//!
//! Layer errors are mapped onto `AppError`, which decides the status code.
//! Bodies have the shape `{"error": {"code": ..., "message": ...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use arap_core::export::ExportError;
use arap_core::invoice::InvoiceError;
use arap_core::query::QueryError;
use arap_core::reports::ReportError;
use arap_core::source::FetchError;
use arap_shared::AppError;

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `VALIDATION_ERROR`.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// The error.
    pub error: ErrorBody,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: ErrorBody {
                code: err.error_code(),
                message: err.to_string(),
            },
        }
    }
}

/// Handler error wrapping `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::UnknownLedger(_) => Self(AppError::NotFound(err.to_string())),
            other => Self(AppError::Validation(other.to_string())),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Invoice(inner) => inner.into(),
            other => Self(AppError::Validation(other.to_string())),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self(AppError::FetchFailed(err.to_string()))
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Query(e) => e.into(),
            ReportError::Fetch(e) => e.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self(AppError::Export(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}
