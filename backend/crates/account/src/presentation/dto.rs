//! API DTOs (Data Transfer Objects)
//!
//! Request bodies are validated against the rule sets in [`request_validator`]
//! before any use case runs. Missing string fields decode as empty so they
//! report `required` instead of failing to decode.

use chrono::{DateTime, Utc};
use kernel::validation::{FieldValue, Rule, RuleSet, Validate, Validator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full name length bounds (characters)
pub const FULL_NAME_MIN_CHARS: usize = 3;
pub const FULL_NAME_MAX_CHARS: usize = 60;

/// Password length bounds (characters), checked alongside complexity
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 64;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "full_name" => Some(FieldValue::text(&self.full_name)),
            "phone_number" => Some(FieldValue::text(&self.phone_number)),
            "password" => Some(FieldValue::text(&self.password)),
            _ => None,
        }
    }
}

/// Register response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub guid: Uuid,
    pub message: &'static str,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "phone_number" => Some(FieldValue::text(&self.phone_number)),
            "password" => Some(FieldValue::text(&self.password)),
            _ => None,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expired_at: DateTime<Utc>,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile response
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub guid: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Update profile request; absent or empty fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

impl Validate for UpdateProfileRequest {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "full_name" => Some(FieldValue::optional_text(non_empty(&self.full_name))),
            "phone_number" => Some(FieldValue::optional_text(non_empty(&self.phone_number))),
            _ => None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Generic message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Rule sets
// ============================================================================

/// Validator with a rule set for every request body above
pub fn request_validator() -> Validator {
    Validator::builder()
        .register::<RegisterRequest>(
            RuleSet::builder()
                .field("full_name", full_name_rules(true))
                .field("phone_number", [Rule::required(), Rule::phone_number()])
                .field(
                    "password",
                    [
                        Rule::required(),
                        Rule::min_chars(PASSWORD_MIN_CHARS),
                        Rule::max_chars(PASSWORD_MAX_CHARS),
                        Rule::password_complexity(),
                    ],
                )
                .build(),
        )
        .register::<LoginRequest>(
            RuleSet::builder()
                .field("phone_number", [Rule::required(), Rule::phone_number()])
                .field("password", [Rule::required()])
                .build(),
        )
        .register::<UpdateProfileRequest>(
            RuleSet::builder()
                .field("full_name", full_name_rules(false))
                .field("phone_number", [Rule::phone_number()])
                .build(),
        )
        .build()
}

fn full_name_rules(required: bool) -> Vec<Rule> {
    let mut rules = Vec::with_capacity(3);
    if required {
        rules.push(Rule::required());
    }
    rules.push(Rule::min_chars(FULL_NAME_MIN_CHARS));
    rules.push(Rule::max_chars(FULL_NAME_MAX_CHARS));
    rules
}
