//! Bearer Token Middleware
//!
//! Guards protected routes. On success the verified identity is placed in the
//! request extensions as [`AuthenticatedUser`].
//!
//! - no `Authorization` header -> 401
//! - anything else wrong with the token -> 403 `invalid token`

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use kernel::id::UserId;
use platform::token;

use crate::domain::repository::UserRepository;
use crate::error::AccountError;
use crate::presentation::handlers::AccountAppState;

/// Identity carried by a verified token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub full_name: String,
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer_token<R>(
    State(state): State<AccountAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccountError>
where
    R: UserRepository + Sync + 'static,
{
    if !req.headers().contains_key(AUTHORIZATION) {
        return Err(AccountError::MissingToken);
    }

    // Present but not `Bearer <token>`
    let Some(Authorization(bearer)) = req.headers().typed_get::<Authorization<Bearer>>() else {
        return Err(AccountError::InvalidToken);
    };

    let claims = token::verify(bearer.token(), &state.config.rsa_public_key).map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AccountError::InvalidToken
    })?;

    let user_id: UserId = claims
        .subject_id
        .parse()
        .map_err(|_| AccountError::InvalidToken)?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        full_name: claims.display_name,
    });

    Ok(next.run(req).await)
}
