//! Infrastructure Layer
//!
//! Store implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryContentStore;
pub use postgres::PgContentStore;
