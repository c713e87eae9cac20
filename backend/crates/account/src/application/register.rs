//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::error::AccountResult;

/// Register input (already validated)
pub struct RegisterInput {
    pub full_name: String,
    pub phone_number: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub user_id: UserId,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<RegisterOutput> {
        // Argon2id is CPU-bound; keep it off the async workers
        let secret = ClearTextPassword::new(input.password);
        let password_hash = tokio::task::spawn_blocking(move || secret.hash()).await??;

        let new_user = NewUser::new(input.full_name, input.phone_number, password_hash);

        // A duplicate phone number comes back as a translated conflict
        let user = self.user_repo.create(&new_user).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput {
            user_id: user.user_id,
        })
    }
}
