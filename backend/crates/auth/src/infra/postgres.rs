//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                nickname,
                email,
                role
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id,
                username,
                password_hash,
                nickname,
                email,
                role,
                created_at,
                updated_at
            "#,
        )
        .bind(user.user_name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.nickname.as_deref())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.user_role.id())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                nickname,
                email,
                role,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                nickname,
                email,
                role,
                created_at,
                updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(user_name.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }
}

/// Unique violations on insert become domain conflicts
fn map_insert_error(err: sqlx::Error) -> AuthError {
    if !is_unique_violation(&err) {
        return AuthError::Database(err);
    }

    let on_email = match &err {
        sqlx::Error::Database(db_err) => db_err
            .constraint()
            .is_some_and(|constraint| constraint.contains("email")),
        _ => false,
    };

    if on_email {
        AuthError::EmailTaken
    } else {
        AuthError::UserNameTaken
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    nickname: Option<String>,
    email: Option<String>,
    role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_id(self.role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::new(self.id),
            user_name: UserName::from_db(self.username),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            nickname: self.nickname,
            email: self.email.map(Email::from_db),
            user_role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
