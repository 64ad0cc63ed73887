//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (sign up, login, token check)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, access gate
//!
//! ## Features
//! - User sign up with username + password
//! - Login issuing a stateless HS256 bearer token (7 day lifetime)
//! - Access gate middleware resolving the caller from `Authorization: Bearer`
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or logged in clear text
//! - Unknown user and wrong password fail with the same message
//! - Malformed, expired and forged tokens fail with the same message
//! - No server-side session state and no token revocation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::middleware::{AccessGate, require_auth};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel types shared with other domains
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
pub use kernel::identity::CurrentUser;

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryUserRepository as MemoryUserStore;
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
