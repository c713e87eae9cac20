//! Login Use Case
//!
//! Checks a phone number + password pair and issues an identity token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::ClearTextPassword;
use platform::token;

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Login input (already validated)
pub struct LoginInput {
    pub phone_number: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let record = self
            .user_repo
            .find_login_by_phone_number(&input.phone_number)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let candidate = ClearTextPassword::new(input.password);
        let stored = record.password_hash.clone();
        let matched = tokio::task::spawn_blocking(move || stored.verify(&candidate)).await?;

        if !matched {
            return Err(AccountError::InvalidPassword);
        }

        let issued = token::issue(
            &record.user_id.to_string(),
            &record.full_name,
            self.config.token_lifetime_hours,
            &self.config.rsa_private_key,
        )?;

        tracing::info!(
            user_id = %record.user_id,
            expires_at = %issued.expires_at,
            "User logged in"
        );

        Ok(LoginOutput {
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}
