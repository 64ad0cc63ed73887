//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::token::TokenService;
use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AccessGate, require_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, tokens: Arc<TokenService>) -> Router {
    auth_router_generic(repo, tokens)
}

/// Create a generic Auth router for any repository implementation
///
/// `/me` sits behind the access gate; `/signup` and `/login` are public.
pub fn auth_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let gate = AccessGate::new(tokens.clone());

    let state = AuthAppState {
        repo: Arc::new(repo),
        tokens,
    };

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(gate, require_auth));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
        .merge(protected)
}
