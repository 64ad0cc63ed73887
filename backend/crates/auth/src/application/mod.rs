//! Application Layer
//!
//! Use cases and application services.

pub mod check_token;
pub mod config;
pub mod login;
pub mod sign_up;

// Re-exports
pub use check_token::CheckTokenUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
