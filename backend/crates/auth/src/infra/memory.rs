//! In-Memory Repository Implementation
//!
//! Same uniqueness rules as the PostgreSQL schema: `username` is unique
//! and `email` is unique when present. Used by tests and local runs
//! without a database.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: Vec<User>,
}

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }
        if let Some(email) = &user.email {
            if table.rows.iter().any(|u| u.email.as_ref() == Some(email)) {
                return Err(AuthError::EmailTaken);
            }
        }

        table.next_id += 1;
        let created = user
            .clone()
            .into_user(UserId::new(table.next_id), Utc::now());
        table.rows.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| &u.user_name == user_name).cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|u| &u.user_name == user_name))
    }
}
