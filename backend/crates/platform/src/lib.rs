//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) with zeroized clear text
//! - Signed, time-bounded identity tokens (HS256 JWT)
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod password;
pub mod token;
