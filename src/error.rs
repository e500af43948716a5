use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;

use crate::lifecycle::LifecycleError;
use crate::lifecycle::port::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`LifecycleError`] for domain errors and adds HTTP-specific variants.
/// Implements [`ResponseError`] to produce `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Lifecycle(LifecycleError::Validation(errors.to_string()))
    }
}

impl AppError {
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Lifecycle(err) => match err {
                LifecycleError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                LifecycleError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                LifecycleError::Locked { .. } => (StatusCode::LOCKED, "LOCKED"),
                LifecycleError::Confirmation(_) => (StatusCode::CONFLICT, "CONFIRMATION_REQUIRED"),
                LifecycleError::Store(StoreError::Unavailable(_)) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
                }
                LifecycleError::Store(StoreError::Database(_)) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
            AppError::Database(DbErr::RecordNotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.classify().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code) = self.classify();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal error");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(json!({
            "error": message,
            "code": code,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_errors_map_to_statuses() {
        let cases = [
            (LifecycleError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (LifecycleError::NotFound { id: 1 }, StatusCode::NOT_FOUND),
            (LifecycleError::Locked { id: 1 }, StatusCode::LOCKED),
            (LifecycleError::Confirmation("x".into()), StatusCode::CONFLICT),
            (
                LifecycleError::Store(StoreError::Unavailable("down".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::Database(DbErr::Custom("disk I/O error".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
