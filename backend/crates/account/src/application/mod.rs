//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod profile;
pub mod register;

// Re-exports
pub use config::AccountConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{
    GetProfileUseCase, ProfileOutput, UpdateProfileInput, UpdateProfileUseCase,
};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
