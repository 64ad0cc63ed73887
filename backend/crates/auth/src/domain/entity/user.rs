//! User Entity
//!
//! Account created by sign-up. Identity is immutable and accounts are
//! never deleted.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub user_id: UserId,
    /// Unique login handle
    pub user_name: UserName,
    /// Argon2id hash, never the clear text
    pub password_hash: UserPassword,
    pub nickname: Option<String>,
    /// Unique when present
    pub email: Option<Email>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User not yet persisted (no id)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password_hash: UserPassword,
    pub nickname: Option<String>,
    pub email: Option<Email>,
    pub user_role: UserRole,
}

impl NewUser {
    /// New account with the default role
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_name,
            password_hash,
            nickname: None,
            email: None,
            user_role: UserRole::default(),
        }
    }

    pub fn with_nickname(mut self, nickname: Option<String>) -> Self {
        self.nickname = nickname;
        self
    }

    pub fn with_email(mut self, email: Option<Email>) -> Self {
        self.email = email;
        self
    }

    /// Attach the store-assigned id and timestamps
    pub fn into_user(self, user_id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            user_id,
            user_name: self.user_name,
            password_hash: self.password_hash,
            nickname: self.nickname,
            email: self.email,
            user_role: self.user_role,
            created_at,
            updated_at: created_at,
        }
    }
}
