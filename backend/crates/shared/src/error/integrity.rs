//! Storage Integrity Translation
//!
//! Turns low-level storage failures into stable [`AppError`]s.
//!
//! Only error metadata is inspected: the SQLSTATE class and the constraint
//! name attached by the database. Rows and free-text detail are never parsed.
//!
//! - integrity violation + catalogued constraint -> 409 with the catalog message
//! - anything else -> 500 carrying the raw error text
//!
//! PostgreSQL error codes:
//! https://www.postgresql.org/docs/current/errcodes-appendix.html

use std::borrow::Cow;
use std::error::Error;

use super::app_error::{AppError, AppResult};

/// Class 23: integrity constraint violation
pub const INTEGRITY_VIOLATION_CODES: &[&str] = &[
    "23000", // integrity_constraint_violation
    "23001", // restrict_violation
    "23502", // not_null_violation
    "23503", // foreign_key_violation
    "23505", // unique_violation
    "23514", // check_violation
    "23P01", // exclusion_violation
];

/// Error metadata the translator needs from a storage backend
pub trait StorageFault: Error + Send + Sync + 'static {
    /// SQLSTATE-like code, if the failure came from the database engine
    fn sqlstate(&self) -> Option<Cow<'_, str>>;

    /// Name of the violated constraint, if any
    fn constraint(&self) -> Option<&str>;

    /// Whether the code belongs to the integrity-violation class
    fn is_integrity_violation(&self) -> bool {
        self.sqlstate()
            .is_some_and(|code| INTEGRITY_VIOLATION_CODES.contains(&code.as_ref()))
    }
}

#[cfg(feature = "sqlx")]
impl StorageFault for sqlx::Error {
    fn sqlstate(&self) -> Option<Cow<'_, str>> {
        match self {
            sqlx::Error::Database(db_err) => db_err.code(),
            _ => None,
        }
    }

    fn constraint(&self) -> Option<&str> {
        match self {
            sqlx::Error::Database(db_err) => db_err.constraint(),
            _ => None,
        }
    }
}

/// Fixed catalog of constraint name -> user-facing message
///
/// ## Examples
/// ```rust
/// use kernel::error::integrity::IntegrityTranslator;
///
/// const USERS: IntegrityTranslator = IntegrityTranslator::new(&[(
///     "users_unique_phone_number_key",
///     "phone number is already registered",
/// )]);
///
/// assert_eq!(
///     USERS.message_for("users_unique_phone_number_key"),
///     Some("phone number is already registered"),
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IntegrityTranslator {
    catalog: &'static [(&'static str, &'static str)],
}

impl IntegrityTranslator {
    pub const fn new(catalog: &'static [(&'static str, &'static str)]) -> Self {
        Self { catalog }
    }

    /// Catalog message for a constraint name
    pub fn message_for(&self, constraint: &str) -> Option<&'static str> {
        self.catalog
            .iter()
            .find(|(name, _)| *name == constraint)
            .map(|(_, message)| *message)
    }

    /// `None` passes through untouched.
    pub fn translate<E: StorageFault>(&self, err: Option<E>) -> Option<AppError> {
        err.map(|e| self.translate_err(e))
    }

    /// Classify a single storage failure
    pub fn translate_err<E: StorageFault>(&self, err: E) -> AppError {
        if err.is_integrity_violation() {
            if let Some(message) = err.constraint().and_then(|c| self.message_for(c)) {
                return AppError::conflict(message).with_source(err);
            }
        }

        AppError::internal(err.to_string()).with_source(err)
    }

    /// Classify the error side of a storage result
    pub fn translate_result<T, E: StorageFault>(&self, result: Result<T, E>) -> AppResult<T> {
        result.map_err(|e| self.translate_err(e))
    }
}
