//! Authenticated Identity
//!
//! The caller resolved from a valid bearer token. The access gate inserts
//! it into the request extensions; handlers behind the gate read it back.

use serde::Serialize;

use crate::id::UserId;

/// Identity of the authenticated caller for the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: String,
}

impl CurrentUser {
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| crate::error::app_error::AppError::unauthorized("authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_serializes_camel_case() {
        let user = CurrentUser::new(UserId::new(7), "alice");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["username"], "alice");
    }
}
