//! Request Validation
//!
//! Declarative field rules checked against decoded request payloads.
//!
//! - [`rule`] - named predicates (`required`, `min`, `max`, `phone_number`, `pwd`)
//! - [`rule_set`] - per-shape mapping of field -> rules, with display names
//! - [`engine`] - the [`Validator`] built once at startup and shared by reference
//!
//! Every field is checked and every failure is reported, so a client can fix
//! all problems in one round trip.
//!
//! ## Examples
//! ```rust
//! use kernel::validation::{FieldValue, Rule, RuleSet, Validate, Validator};
//!
//! struct SignUp {
//!     phone_number: String,
//! }
//!
//! impl Validate for SignUp {
//!     fn field(&self, name: &str) -> Option<FieldValue<'_>> {
//!         match name {
//!             "phone_number" => Some(FieldValue::text(&self.phone_number)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let validator = Validator::builder()
//!     .register::<SignUp>(
//!         RuleSet::builder()
//!             .field("phone_number", [Rule::required(), Rule::phone_number()])
//!             .build(),
//!     )
//!     .build();
//!
//! assert!(validator.validate(&SignUp { phone_number: "+62345678901".into() }).is_ok());
//! assert!(validator.validate(&SignUp { phone_number: "+44345678901".into() }).is_err());
//! ```

pub mod engine;
pub mod rule;
pub mod rule_set;

use serde::Serialize;
use thiserror::Error;

pub use engine::{Validator, ValidatorBuilder};
pub use rule::{Rule, is_complex_password, is_valid_phone_number};
pub use rule_set::{RuleSet, RuleSetBuilder};

/// A single field as seen by the validator
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// Field was not supplied
    Absent,
    /// Textual value (possibly empty)
    Text(&'a str),
    /// Nested record, checked with its own rule set
    Record(&'a dyn Validate),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(value)
    }

    /// `None` maps to [`FieldValue::Absent`]
    pub fn optional_text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Text)
    }
}

/// A record the validator can walk
///
/// Implementors expose their fields by wire name. Returning `None` for a
/// field named in the rule set means the payload is not the shape the rule
/// set was written for.
pub trait Validate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// One failed rule on one field
///
/// Serialises to the wire shape `{"field": ..., "message": ...}` where
/// `message` is the rule tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    field: String,
    #[serde(rename = "message")]
    rule: &'static str,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rule: &'static str) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }

    /// Dot-delimited wire path, e.g. `address.city`
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rule(&self) -> &'static str {
        self.rule
    }
}

/// Validation outcome when the payload is not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more rules failed; carries every violation in field order
    #[error("invalid request payload values")]
    Rejected(Vec<FieldViolation>),

    /// The payload is not something the validator knows how to check
    #[error("invalid validation target: {shape}")]
    InvalidTarget { shape: &'static str },
}

impl ValidationError {
    pub const REJECTED_MESSAGE: &'static str = "invalid request payload values";

    /// Violations for a rejected payload; empty for an invalid target
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ValidationError::Rejected(violations) => violations,
            ValidationError::InvalidTarget { .. } => &[],
        }
    }
}
