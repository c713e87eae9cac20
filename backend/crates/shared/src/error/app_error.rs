//! Application Error
//!
//! [`AppError`] is what every layer eventually hands to the HTTP boundary.
//! It is either opaque (kind + message) or a validation failure carrying
//! every [`FieldViolation`] found in the payload.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;
use crate::validation::FieldViolation;

/// アプリケーション統一エラー型
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::conflict("phone number is already registered");
/// assert_eq!(err.kind(), ErrorKind::Conflict);
/// assert_eq!(err.public_message(), "phone number is already registered");
///
/// let err = AppError::internal("relation \"users\" does not exist");
/// assert_eq!(err.public_message(), "Internal Server Error");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    violations: Vec<FieldViolation>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            violations: Vec::new(),
            source: None,
        }
    }

    /// 入力検証エラー（常に 400）
    pub fn validation(
        message: impl Into<Cow<'static, str>>,
        violations: Vec<FieldViolation>,
    ) -> Self {
        Self {
            violations,
            ..Self::new(ErrorKind::BadRequest, message)
        }
    }

    /// 一意制約違反（409）
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// 内部エラー（500）。メッセージはログ専用
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// 元のエラーを保持する
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Full message, including server-side detail
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message safe to send to the caller
    pub fn public_message(&self) -> &str {
        if self.is_server_error() {
            self.kind.as_str()
        } else {
            &self.message
        }
    }

    #[inline]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    #[inline]
    pub fn is_validation(&self) -> bool {
        !self.violations.is_empty()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder
            .field("kind", &self.kind)
            .field("message", &self.message);
        if !self.violations.is_empty() {
            builder.field("violations", &self.violations);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}
