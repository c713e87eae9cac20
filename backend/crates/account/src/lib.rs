//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, extractors, middleware, router
//!
//! ## Features
//! - Registration with full name, phone number and password
//! - Login by phone number + password, returning an RS256 identity token
//! - Profile read and partial update behind a bearer token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; hashing runs on the blocking pool
//! - Tokens are stateless and verified on every protected request
//! - Duplicate phone numbers are detected by a named unique constraint

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
