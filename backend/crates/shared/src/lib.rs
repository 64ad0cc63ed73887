//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! identity and content domains:
//! - Common error types and result aliases
//! - Typed numeric IDs for users, categories, tags and posts
//! - The authenticated caller attached to a request by the access gate
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod identity;
