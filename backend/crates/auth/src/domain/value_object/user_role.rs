use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    Admin = 0,
    #[default]
    User = 1,
}

/// Returned when a stored role id is outside the known set
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid user role id: {0}")]
pub struct InvalidUserRole(pub i16);

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn from_id(id: i16) -> Result<Self, InvalidUserRole> {
        match id {
            0 => Ok(UserRole::Admin),
            1 => Ok(UserRole::User),
            other => Err(InvalidUserRole(other)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
