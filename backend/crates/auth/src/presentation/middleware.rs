//! Auth Middleware
//!
//! Access gate for protected routes. Rejects the request unless it carries
//! a valid `Authorization: Bearer <token>` header, and attaches the
//! resolved [`CurrentUser`] to the request extensions.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use kernel::identity::CurrentUser;
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::CheckTokenUseCase;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AccessGate {
    check_token: CheckTokenUseCase,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self {
            check_token: CheckTokenUseCase::new(tokens),
        }
    }

    /// Resolve the caller for a request
    pub fn authorize(&self, req: &Request<Body>) -> Result<CurrentUser, AuthError> {
        self.check_token.execute(req.headers())
    }
}

/// Middleware that requires a valid bearer token
///
/// Use with `axum::middleware::from_fn_with_state(gate, require_auth)`.
pub async fn require_auth(
    State(gate): State<AccessGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let current_user = gate.authorize(&req)?;

    tracing::debug!(
        user_id = %current_user.user_id,
        "Request authenticated"
    );

    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}
