//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Identity tokens (RS256 JWT)
//!
//! Nothing here logs or knows about HTTP; callers map errors to responses.

pub mod password;
pub mod token;
