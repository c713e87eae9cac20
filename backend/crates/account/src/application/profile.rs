//! Profile Use Cases
//!
//! Read and partially update the authenticated user's own profile.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Profile output
pub struct ProfileOutput {
    pub user_id: UserId,
    pub full_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Get profile use case
pub struct GetProfileUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> GetProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AccountResult<ProfileOutput> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        Ok(ProfileOutput {
            user_id: user.user_id,
            full_name: user.full_name,
            phone_number: user.phone_number,
            created_at: user.created_at,
        })
    }
}

/// Update profile input (already validated); `None` leaves a field as is
#[derive(Default)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AccountResult<()> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if !user.apply_profile(input.full_name, input.phone_number) {
            tracing::debug!(user_id = %user_id, "Profile update with no changes");
            return Ok(());
        }

        // A phone number taken by someone else comes back as a conflict
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user_id, "User profile updated");

        Ok(())
    }
}
