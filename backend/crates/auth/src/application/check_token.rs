//! Check Token Use Case
//!
//! Resolves the caller from an `Authorization` header. Stateless: no
//! repository lookup and no revocation list.

use std::sync::Arc;

use axum::http::HeaderMap;
use kernel::id::UserId;
use kernel::identity::CurrentUser;
use platform::bearer::extract_bearer;
use platform::token::TokenService;

use crate::error::AuthResult;

/// Check token use case
#[derive(Clone)]
pub struct CheckTokenUseCase {
    tokens: Arc<TokenService>,
}

impl CheckTokenUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Validate the bearer token carried by `headers`
    ///
    /// Absent or non-`Bearer` header → `MalformedHeader`;
    /// any token failure → `InvalidToken`.
    pub fn execute(&self, headers: &HeaderMap) -> AuthResult<CurrentUser> {
        let token = extract_bearer(headers)?;
        self.verify(token)
    }

    /// Validate a raw token string
    pub fn verify(&self, token: &str) -> AuthResult<CurrentUser> {
        let claims = self.tokens.validate(token)?;
        Ok(CurrentUser::new(UserId::new(claims.user_id), claims.username))
    }
}
