//! Use-case and HTTP tests for the auth crate, run against the in-memory
//! user repository.

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use platform::token::TokenService;

    use crate::application::{SignUpInput, SignUpUseCase};
    use crate::config::AuthConfig;
    use crate::infra::memory::InMemoryUserRepository;

    pub fn tokens() -> Arc<TokenService> {
        Arc::new(AuthConfig::with_secret("test-secret-0123456789").token_service())
    }

    pub fn sign_up_input(user_name: &str, password: &str) -> SignUpInput {
        SignUpInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
            nickname: None,
            email: None,
        }
    }

    pub async fn repo_with_user(user_name: &str, password: &str) -> Arc<InMemoryUserRepository> {
        let repo = Arc::new(InMemoryUserRepository::new());
        SignUpUseCase::new(repo.clone())
            .execute(sign_up_input(user_name, password))
            .await
            .unwrap();
        repo
    }
}

#[cfg(test)]
mod sign_up_tests {
    use std::sync::Arc;

    use super::fixtures::*;
    use crate::application::{SignUpInput, SignUpUseCase};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_sign_up_creates_user_with_default_role() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let output = SignUpUseCase::new(repo.clone())
            .execute(sign_up_input("alice", "secret1"))
            .await
            .unwrap();

        assert_eq!(output.user_name, "alice");

        let user = repo.find_by_id(output.user_id).await.unwrap().unwrap();
        assert_eq!(user.user_role, UserRole::User);
        assert_ne!(user.password_hash.as_phc_string(), "secret1");
    }

    #[tokio::test]
    async fn test_short_username_rejected() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let err = SignUpUseCase::new(repo.clone())
            .execute(sign_up_input("bob", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let err = SignUpUseCase::new(repo.clone())
            .execute(sign_up_input("alice", "12345"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = repo_with_user("alice", "secret1").await;

        let err = SignUpUseCase::new(repo.clone())
            .execute(sign_up_input("alice", "another1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserNameTaken));
        assert_eq!(err.to_string(), "username taken");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_sign_up_exactly_one_wins() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let attempts = (0..8).map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                SignUpUseCase::new(repo)
                    .execute(sign_up_input("racer", "secret1"))
                    .await
            })
        });

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in attempts {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(AuthError::UserNameTaken) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);
        assert!(
            repo.exists_by_user_name(&UserName::new("racer").unwrap())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = SignUpUseCase::new(repo.clone());

        let with_email = |name: &str| SignUpInput {
            email: Some("same@example.com".to_string()),
            nickname: Some("  Nick  ".to_string()),
            ..sign_up_input(name, "secret1")
        };

        let first = use_case.execute(with_email("first")).await.unwrap();
        let err = use_case.execute(with_email("second")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        let user = repo.find_by_id(first.user_id).await.unwrap().unwrap();
        assert_eq!(user.nickname.as_deref(), Some("Nick"));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let err = SignUpUseCase::new(repo)
            .execute(SignUpInput {
                email: Some("not-an-email".to_string()),
                ..sign_up_input("alice", "secret1")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
    }
}

#[cfg(test)]
mod login_tests {
    use super::fixtures::*;
    use crate::application::{CheckTokenUseCase, LoginInput, LoginUseCase};
    use crate::error::AuthError;

    fn login_input(user_name: &str, password: &str) -> LoginInput {
        LoginInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_for_user() {
        let repo = repo_with_user("alice", "secret1").await;
        let tokens = tokens();

        let output = LoginUseCase::new(repo, tokens.clone())
            .execute(login_input("alice", "secret1"))
            .await
            .unwrap();

        assert_eq!(output.expires_in, 7 * 24 * 3600);
        assert!(!format!("{output:?}").contains(&output.token));

        let current = CheckTokenUseCase::new(tokens).verify(&output.token).unwrap();
        assert_eq!(current.user_id, output.user_id);
        assert_eq!(current.username, "alice");
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let repo = repo_with_user("alice", "secret1").await;
        let use_case = LoginUseCase::new(repo, tokens());

        let unknown = use_case
            .execute(login_input("nobody", "secret1"))
            .await
            .unwrap_err();
        let wrong = use_case
            .execute(login_input("alice", "wrong-password"))
            .await
            .unwrap_err();
        let invalid_name = use_case
            .execute(login_input("x", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(invalid_name.to_string(), "bad credentials");
        assert_eq!(
            unknown.to_app_error().message(),
            wrong.to_app_error().message()
        );
    }
}

#[cfg(test)]
mod gate_tests {
    use axum::http::{HeaderMap, HeaderValue, header};
    use platform::token::TokenService;

    use super::fixtures::*;
    use crate::application::CheckTokenUseCase;
    use crate::error::AuthError;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_missing_header_is_malformed() {
        let err = CheckTokenUseCase::new(tokens())
            .execute(&HeaderMap::new())
            .unwrap_err();
        assert!(matches!(err, AuthError::MalformedHeader));
    }

    #[test]
    fn test_wrong_scheme_is_malformed() {
        let check = CheckTokenUseCase::new(tokens());
        for value in ["Token abc", "Bearer", "Bearer ", "bearer abc"] {
            let err = check.execute(&headers_with(value)).unwrap_err();
            assert!(matches!(err, AuthError::MalformedHeader), "{value}");
            assert_eq!(err.to_string(), "malformed header");
        }
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = CheckTokenUseCase::new(tokens())
            .execute(&headers_with("Bearer not.a.jwt"))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_foreign_secret_and_expired_tokens_are_invalid() {
        let check = CheckTokenUseCase::new(tokens());

        let foreign = TokenService::new(b"another-secret-value", platform::token::DEFAULT_TOKEN_TTL)
            .issue(1, "alice")
            .unwrap();
        let expired = tokens()
            .issue_at(1, "alice", chrono::Utc::now() - chrono::Duration::days(8))
            .unwrap();

        for token in [foreign, expired] {
            let err = check.verify(&token).unwrap_err();
            assert_eq!(err.to_string(), "invalid token");
        }
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::fixtures::*;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::router::auth_router_generic;

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signup_login_me_flow() {
        let app = auth_router_generic(InMemoryUserRepository::new(), tokens());

        let response = app
            .clone()
            .oneshot(json_request(
                "/signup",
                json!({"username": "alice", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "/login",
                json!({"username": "alice", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::get("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let me = body_json(response).await;
        assert_eq!(me["username"], "alice");
        assert_eq!(me["userId"], 1);
    }

    #[tokio::test]
    async fn test_me_without_token_is_unauthorized() {
        let app = auth_router_generic(InMemoryUserRepository::new(), tokens());

        let response = app
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "malformed header");
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_conflict() {
        let app = auth_router_generic(InMemoryUserRepository::new(), tokens());
        let body = json!({"username": "alice", "password": "secret1"});

        let first = app
            .clone()
            .oneshot(json_request("/signup", body.clone()))
            .await
            .unwrap();
        let second = app.oneshot(json_request("/signup", body)).await.unwrap();

        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(second).await["detail"], "username taken");
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthorized() {
        let app = auth_router_generic(InMemoryUserRepository::new(), tokens());

        let response = app
            .oneshot(json_request(
                "/login",
                json!({"username": "ghost", "password": "whatever"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "bad credentials");
    }

    #[tokio::test]
    async fn test_signup_without_password_is_validation_problem() {
        let app = auth_router_generic(InMemoryUserRepository::new(), tokens());

        let response = app
            .oneshot(json_request("/signup", json!({"username": "alice"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let problem = body_json(response).await;
        assert_eq!(problem["title"], "Bad Request");
        assert!(problem["detail"].as_str().unwrap().contains("password"));
    }

    #[tokio::test]
    async fn test_login_with_malformed_body_is_validation_problem() {
        let app = auth_router_generic(InMemoryUserRepository::new(), tokens());

        let response = app
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], 400);
    }
}
