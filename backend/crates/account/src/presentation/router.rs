//! Account Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_bearer_token;

/// Create the Account router with PostgreSQL repository
pub fn account_router(repo: PgUserRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic Account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: UserRepository + Sync + 'static,
{
    let state = AccountAppState::new(repo, config);

    let protected = Router::new()
        .route(
            "/users",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
