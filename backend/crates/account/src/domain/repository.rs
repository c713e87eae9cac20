//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Soft-deleted users are invisible to every read. Storage failures come back
//! already classified (`AccountError::Storage`), so a duplicate phone number
//! surfaces as a conflict without the caller inspecting driver errors.

use kernel::id::UserId;

use crate::domain::entity::user::{LoginRecord, NewUser, User};
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return the stored row
    async fn create(&self, user: &NewUser) -> AccountResult<User>;

    /// Credentials for login, by exact phone number
    async fn find_login_by_phone_number(&self, phone_number: &str)
    -> AccountResult<Option<LoginRecord>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Persist profile fields and return the stored row
    async fn update(&self, user: &User) -> AccountResult<User>;
}
