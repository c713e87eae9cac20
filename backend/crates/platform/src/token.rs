//! Identity Tokens
//!
//! Stateless, RSA-signed JWTs carrying a subject id and display name.
//!
//! - Issued with RS256; verification accepts the RSA family only
//!   (RS256/RS384/RS512), so an HMAC token keyed with the public key is refused
//! - Expiry is checked with zero leeway
//! - Every verification failure, including an unusable public key, is the
//!   same [`TokenError::Invalid`] to callers
//! - No server-side state and no revocation

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Algorithm tokens are signed with
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Algorithms accepted on verification
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    /// Private key PEM could not be parsed
    #[error("failed to parse private key: {0}")]
    KeyParse(#[source] jsonwebtoken::errors::Error),

    /// Signing failed with a valid key
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Lifetime does not produce a representable expiry
    #[error("invalid token lifetime: {0} hours")]
    InvalidLifetime(i64),

    /// Token rejected for any reason
    #[error("invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

// ============================================================================
// Claims
// ============================================================================

/// Claims embedded in every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    #[serde(rename = "user_guid")]
    pub subject_id: String,
    #[serde(rename = "full_name")]
    pub display_name: String,
    /// Seconds since the Unix epoch
    pub iat: i64,
    /// Seconds since the Unix epoch
    pub exp: i64,
}

impl IdentityClaims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A signed token and the instant it stops being accepted
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Operations
// ============================================================================

/// Sign a token for `subject_id` valid for `lifetime_hours` from now
pub fn issue(
    subject_id: &str,
    display_name: &str,
    lifetime_hours: i64,
    private_key_pem: &str,
) -> Result<IssuedToken, TokenError> {
    // Claims carry whole seconds; keep `expires_at` identical to `exp`.
    let issued_at = Utc::now().trunc_subsecs(0);
    let expires_at = TimeDelta::try_hours(lifetime_hours)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
        .ok_or(TokenError::InvalidLifetime(lifetime_hours))?;

    let claims = IdentityClaims {
        subject_id: subject_id.to_owned(),
        display_name: display_name.to_owned(),
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = sign(&claims, private_key_pem)?;
    Ok(IssuedToken { token, expires_at })
}

/// Check signature, algorithm and expiry, and read the claims
pub fn verify(token: &str, public_key_pem: &str) -> Result<IdentityClaims, TokenError> {
    let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(TokenError::Invalid)?;

    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
    validation.leeway = 0;
    validation.validate_exp = true;

    let data = decode::<IdentityClaims>(token, &key, &validation).map_err(TokenError::Invalid)?;
    Ok(data.claims)
}

fn sign<C: Serialize>(claims: &C, private_key_pem: &str) -> Result<String, TokenError> {
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(TokenError::KeyParse)?;
    encode(&Header::new(SIGNING_ALGORITHM), claims, &key).map_err(TokenError::Signing)
}

// ============================================================================
// Tests
// ============================================================================
