//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::user::{LoginRecord, NewUser, User};
pub use repository::UserRepository;
