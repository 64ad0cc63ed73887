//! Application Layer
//!
//! Services coordinating the content domain inside store transactions.

pub mod config;
pub mod post;
pub mod taxonomy;

// Re-exports
pub use config::ContentConfig;
pub use post::{PostInput, PostService};
pub use taxonomy::{CategoryService, TagService, TaxonomyService};
