//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use kernel::identity::CurrentUser;
use platform::bearer::BEARER_SCHEME;
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::{LoginInput, LoginUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MeResponse, SignUpRequest, SignUpResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = SignUpUseCase::new(state.repo.clone());

    let input = SignUpInput {
        user_name: req.user_name,
        password: req.password,
        nickname: req.nickname,
        email: req.email,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: output.user_id,
            user_name: output.user_name,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone());

    let input = LoginInput {
        user_name: req.user_name,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        token: output.token,
        token_type: BEARER_SCHEME,
        expires_in: output.expires_in,
    }))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/v1/me
pub async fn me(current_user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: current_user.user_id,
        username: current_user.username,
    })
}
