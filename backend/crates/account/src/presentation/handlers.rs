//! HTTP Handlers

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::validation::Validator;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AccountResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RegisterRequest,
    RegisterResponse, UpdateProfileRequest, request_validator,
};
use crate::presentation::extract::ValidatedJson;
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for account handlers
pub struct AccountAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
    pub validator: Arc<Validator>,
}

impl<R> AccountAppState<R> {
    pub fn new(repo: R, config: AccountConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            validator: Arc::new(request_validator()),
        }
    }
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AccountAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<R> FromRef<AccountAppState<R>> for Arc<Validator> {
    fn from_ref(state: &AccountAppState<R>) -> Self {
        state.validator.clone()
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AccountResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    let output = use_case
        .execute(RegisterInput {
            full_name: req.full_name,
            phone_number: req.phone_number,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            guid: output.user_id.into_uuid(),
            message: "User registered successfully",
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: UserRepository + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            phone_number: req.phone_number,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        expired_at: output.expires_at,
    }))
}

// ============================================================================
// Profile (requires bearer token)
// ============================================================================

/// GET /users
pub async fn get_profile<R>(
    State(state): State<AccountAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AccountResult<Json<ProfileResponse>>
where
    R: UserRepository + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let output = use_case.execute(&user.user_id).await?;

    Ok(Json(ProfileResponse {
        guid: output.user_id.into_uuid(),
        full_name: output.full_name,
        phone_number: output.phone_number,
        created_at: output.created_at,
    }))
}

/// PUT /users
pub async fn update_profile<R>(
    State(state): State<AccountAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> AccountResult<Json<MessageResponse>>
where
    R: UserRepository + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    use_case
        .execute(
            &user.user_id,
            UpdateProfileInput {
                full_name: req.full_name,
                phone_number: req.phone_number,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "user updated successfully",
    }))
}
