//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ContentAppState;
pub use router::{
    content_admin_router, content_admin_router_generic, content_public_router,
    content_public_router_generic,
};
