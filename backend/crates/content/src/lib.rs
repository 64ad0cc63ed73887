//! Content Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, transactional store port
//! - `application/` - Taxonomy and post services
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Consistency Rules
//! - Category and tag names are trimmed, non-empty and unique per kind
//! - A post always references an existing category and existing tags
//! - Post writes run inside one transaction; a failed write leaves nothing behind
//! - Updating a post replaces its tag set exactly
//! - A category still used by a post cannot be deleted; deleting a tag unlinks it

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use infra::{InMemoryContentStore, PgContentStore};
pub use presentation::router::{
    content_admin_router, content_admin_router_generic, content_public_router,
    content_public_router_generic,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
