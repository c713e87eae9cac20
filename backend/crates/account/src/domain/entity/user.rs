//! User Entity
//!
//! Account profile plus the stored credential.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier, also the token subject
    pub user_id: UserId,
    /// Display name
    pub full_name: String,
    /// Login identifier, unique
    pub phone_number: String,
    /// Argon2id PHC string
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Overwrite the supplied profile fields; absent or empty fields keep
    /// their value
    ///
    /// Returns `true` if anything changed.
    pub fn apply_profile(&mut self, full_name: Option<String>, phone_number: Option<String>) -> bool {
        let mut changed = false;

        if let Some(full_name) = full_name.filter(|v| !v.is_empty() && *v != self.full_name) {
            self.full_name = full_name;
            changed = true;
        }

        if let Some(phone_number) =
            phone_number.filter(|v| !v.is_empty() && *v != self.phone_number)
        {
            self.phone_number = phone_number;
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }

        changed
    }
}

/// A user about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: UserId,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: HashedPassword,
}

impl NewUser {
    pub fn new(full_name: String, phone_number: String, password_hash: HashedPassword) -> Self {
        Self {
            user_id: UserId::new(),
            full_name,
            phone_number,
            password_hash,
        }
    }
}

/// What login needs from storage
#[derive(Debug, Clone)]
pub struct LoginRecord {
    pub user_id: UserId,
    pub full_name: String,
    pub password_hash: HashedPassword,
}
