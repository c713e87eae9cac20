//! Error conversions - From implementations for common error types
//!
//! Provides conversion from the validation engine's result into
//! [`AppError`], and the HTTP rendering of [`AppError`].

use super::app_error::AppError;
use crate::validation::ValidationError;

// ============================================================================
// Validation conversions
// ============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Rejected(violations) => {
                AppError::validation(ValidationError::REJECTED_MESSAGE, violations)
            }
            // A payload with no rule set is a wiring bug, not bad user input.
            invalid @ ValidationError::InvalidTarget { .. } => {
                AppError::internal(invalid.to_string()).with_source(invalid)
            }
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "message": self.public_message(),
        });

        if self.is_validation() {
            body["extra"] = serde_json::json!(self.violations());
        }

        (status, Json(body)).into_response()
    }
}
