//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (bad filter, bad date range, unknown status).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The invoice warehouse could not be reached or rejected the query.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Export (CSV) error.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::FetchFailed(_) => 502,
            Self::Export(_) | Self::Config(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::FetchFailed(_) => "FETCH_FAILED",
            Self::Export(_) => "EXPORT_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::FetchFailed(String::new()).status_code(), 502);
        assert_eq!(AppError::Export(String::new()).status_code(), 500);
        assert_eq!(AppError::Config(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::FetchFailed(String::new()).error_code(),
            "FETCH_FAILED"
        );
        assert_eq!(AppError::Export(String::new()).error_code(), "EXPORT_ERROR");
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::FetchFailed("msg".into()).to_string(),
            "Fetch failed: msg"
        );
        assert_eq!(
            AppError::Export("msg".into()).to_string(),
            "Export error: msg"
        );
        assert_eq!(
            AppError::Config("msg".into()).to_string(),
            "Configuration error: msg"
        );
    }
}
