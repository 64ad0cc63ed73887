//! API DTOs (Data Transfer Objects)

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(alias = "username")]
    pub user_name: String,
    pub password: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user_id: UserId,
    pub user_name: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub user_name: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Always `"Bearer"`
    pub token_type: &'static str,
    /// Seconds until the token expires
    pub expires_in: u64,
}

// ============================================================================
// Current User
// ============================================================================

/// Current user info response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: UserId,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_accepts_both_spellings() {
        let camel: SignUpRequest =
            serde_json::from_str(r#"{"userName":"alice","password":"secret1"}"#).unwrap();
        let plain: SignUpRequest =
            serde_json::from_str(r#"{"username":"alice","password":"secret1"}"#).unwrap();

        assert_eq!(camel.user_name, "alice");
        assert_eq!(plain.user_name, "alice");
        assert!(plain.nickname.is_none());
    }

    #[test]
    fn test_login_response_shape() {
        let json = serde_json::to_value(LoginResponse {
            token: "t".into(),
            token_type: "Bearer",
            expires_in: 604800,
        })
        .unwrap();

        assert_eq!(json["tokenType"], "Bearer");
        assert_eq!(json["expiresIn"], 604800);
    }
}
