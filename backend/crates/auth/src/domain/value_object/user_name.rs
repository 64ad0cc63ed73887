//! User Name Value Object
//!
//! ユーザー名はログインと表示に使う公開ハンドル。
//!
//! ## 不変条件
//! - NFKC 正規化と前後の空白除去の後に検証する
//! - 長さ: 4〜50 文字
//! - 途中の空白・制御文字は禁止
//! - 大文字小文字は区別する（`Alice` と `alice` は別ユーザー）

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 4;

/// Maximum length for user name (in characters, matches `users.username`)
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("username must be at least {min} characters (got {length})")]
    TooShort { length: usize, min: usize },

    #[error("username must be at most {max} characters (got {length})")]
    TooLong { length: usize, max: usize },

    #[error("username cannot contain whitespace")]
    ContainsWhitespace,

    #[error("username contains invalid control characters")]
    InvalidCharacter,
}

/// Validated, normalized user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized = input.as_ref().nfkc().collect::<String>().trim().to_string();

        let length = normalized.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if normalized.chars().any(char::is_whitespace) {
            return Err(UserNameError::ContainsWhitespace);
        }
        if normalized.chars().any(char::is_control) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create from database value (already validated on insert)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert!(UserName::new("alice").is_ok());
        assert!(UserName::new("bob_99").is_ok());
        assert!(UserName::new("ユーザー名").is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            UserName::new("abc"),
            Err(UserNameError::TooShort { length: 3, min: 4 })
        );
        assert!(matches!(
            UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_trimmed_before_length_check() {
        assert!(UserName::new("  abc  ").is_err());
        assert_eq!(UserName::new("  alice ").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_inner_whitespace_rejected() {
        assert_eq!(
            UserName::new("al ice"),
            Err(UserNameError::ContainsWhitespace)
        );
    }

    #[test]
    fn test_case_preserved() {
        let name = UserName::new("Alice").unwrap();
        assert_eq!(name.to_string(), "Alice");
        assert_ne!(name, UserName::new("alice").unwrap());
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width letters normalize to ASCII
        assert_eq!(UserName::new("ａｌｉｃｅ").unwrap().as_str(), "alice");
    }
}
