//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationError;
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Public message for a password the hasher could not process
pub const PASSWORD_NOT_PROCESSED: &str = "password could not be processed";

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Request body could not be decoded
    #[error("{0}")]
    MalformedPayload(String),

    /// One or more field rules failed, or the payload has no rule set
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No live user for the phone number or id
    #[error("user is not found")]
    UserNotFound,

    /// Password did not match the stored hash
    #[error("invalid password")]
    InvalidPassword,

    /// No bearer token on a protected route
    #[error("missing token")]
    MissingToken,

    /// Bearer token rejected for any reason
    #[error("invalid token")]
    InvalidToken,

    /// Storage failure already classified by the integrity translator
    #[error(transparent)]
    Storage(#[from] AppError),

    /// Token could not be issued
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Password could not be hashed; reported to the caller as a bad request
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::MalformedPayload(_)
            | AccountError::InvalidPassword
            | AccountError::PasswordHash(_) => ErrorKind::BadRequest,
            AccountError::Validation(ValidationError::Rejected(_)) => ErrorKind::BadRequest,
            AccountError::Validation(ValidationError::InvalidTarget { .. }) => {
                ErrorKind::Internal
            }
            AccountError::UserNotFound => ErrorKind::NotFound,
            AccountError::MissingToken => ErrorKind::Unauthorized,
            AccountError::InvalidToken => ErrorKind::Forbidden,
            AccountError::Storage(err) => err.kind(),
            AccountError::Token(_) | AccountError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AccountError::Validation(err) => err.into(),
            AccountError::Storage(err) => err,
            AccountError::Token(err) => AppError::internal(err.to_string()).with_source(err),
            // Hasher detail stays in the logs
            AccountError::PasswordHash(err) => {
                AppError::new(ErrorKind::BadRequest, PASSWORD_NOT_PROCESSED).with_source(err)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Storage(err) if err.is_server_error() => {
                tracing::error!(error = ?err, "Account storage error");
            }
            AccountError::Storage(err) => {
                tracing::info!(message = %err.message(), "Account storage conflict");
            }
            AccountError::Validation(ValidationError::InvalidTarget { shape }) => {
                tracing::error!(shape = %shape, "Payload has no validation rules");
            }
            AccountError::Token(e) => {
                tracing::error!(error = %e, "Account token error");
            }
            AccountError::PasswordHash(e) => {
                tracing::error!(error = %e, "Account password hashing error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for AccountError {
    fn from(err: tokio::task::JoinError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
