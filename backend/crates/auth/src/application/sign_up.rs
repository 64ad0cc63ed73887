//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Maximum nickname length (matches `users.nickname`)
pub const NICKNAME_MAX_LENGTH: usize = 50;

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub user_name: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name = UserName::new(&input.user_name)?;
        let raw_password = RawPassword::new(input.password)?;
        let nickname = normalize_nickname(input.nickname)?;
        let email = input
            .email
            .filter(|e| !e.trim().is_empty())
            .map(Email::new)
            .transpose()?;

        // Fast path; the unique constraint on insert closes the race
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password)?;

        let new_user = NewUser::new(user_name, password_hash)
            .with_nickname(nickname)
            .with_email(email);

        let user = self.user_repo.create(&new_user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            role = %user.user_role,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            user_name: user.user_name.to_string(),
        })
    }
}

fn normalize_nickname(nickname: Option<String>) -> AuthResult<Option<String>> {
    let Some(nickname) = nickname else {
        return Ok(None);
    };

    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > NICKNAME_MAX_LENGTH {
        return Err(AuthError::Validation(format!(
            "nickname must be at most {NICKNAME_MAX_LENGTH} characters"
        )));
    }

    Ok(Some(trimmed.to_string()))
}
