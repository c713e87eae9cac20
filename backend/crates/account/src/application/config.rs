//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::fmt;

/// Token lifetime when none is configured
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Account application configuration
#[derive(Clone)]
pub struct AccountConfig {
    /// PEM-encoded RSA private key used to sign tokens
    pub rsa_private_key: String,
    /// PEM-encoded RSA public key used to verify tokens
    pub rsa_public_key: String,
    /// How long an issued token stays valid
    pub token_lifetime_hours: i64,
}

impl AccountConfig {
    pub fn new(rsa_private_key: impl Into<String>, rsa_public_key: impl Into<String>) -> Self {
        Self {
            rsa_private_key: rsa_private_key.into(),
            rsa_public_key: rsa_public_key.into(),
            token_lifetime_hours: DEFAULT_TOKEN_LIFETIME_HOURS,
        }
    }

    pub fn with_token_lifetime_hours(mut self, hours: i64) -> Self {
        self.token_lifetime_hours = hours;
        self
    }
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("rsa_private_key", &"[REDACTED]")
            .field("rsa_public_key", &self.rsa_public_key)
            .field("token_lifetime_hours", &self.token_lifetime_hours)
            .finish()
    }
}
