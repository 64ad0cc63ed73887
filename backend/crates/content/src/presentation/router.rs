//! Content Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use kernel::id::markers::{Category, Tag};

use crate::application::ContentConfig;
use crate::domain::repository::ContentStore;
use crate::infra::postgres::PgContentStore;
use crate::presentation::handlers::{self, ContentAppState};

/// Public read-only routes with PostgreSQL store
pub fn content_public_router(store: PgContentStore, config: ContentConfig) -> Router {
    content_public_router_generic(store, config)
}

/// Management routes with PostgreSQL store
///
/// The caller mounts this behind the access gate. Post creation reads the
/// owner from the `CurrentUser` the gate attaches.
pub fn content_admin_router(store: PgContentStore, config: ContentConfig) -> Router {
    content_admin_router_generic(store, config)
}

/// Public read-only routes for any store implementation
pub fn content_public_router_generic<S>(store: S, config: ContentConfig) -> Router
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/posts", get(handlers::list_posts::<S>))
        .route("/posts/{id}", get(handlers::get_post::<S>))
        .with_state(app_state(store, config))
}

/// Management routes for any store implementation
pub fn content_admin_router_generic<S>(store: S, config: ContentConfig) -> Router
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/categories",
            get(handlers::list_terms::<S, Category>).post(handlers::create_term::<S, Category>),
        )
        .route(
            "/categories/{id}",
            put(handlers::rename_term::<S, Category>)
                .delete(handlers::delete_term::<S, Category>),
        )
        .route(
            "/tags",
            get(handlers::list_terms::<S, Tag>).post(handlers::create_term::<S, Tag>),
        )
        .route(
            "/tags/{id}",
            put(handlers::rename_term::<S, Tag>)
                .delete(handlers::delete_term::<S, Tag>),
        )
        .route(
            "/posts",
            get(handlers::list_posts::<S>).post(handlers::create_post::<S>),
        )
        .route(
            "/posts/{id}",
            get(handlers::get_post::<S>)
                .put(handlers::update_post::<S>)
                .delete(handlers::delete_post::<S>),
        )
        .with_state(app_state(store, config))
}

fn app_state<S>(store: S, config: ContentConfig) -> ContentAppState<S>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    ContentAppState {
        store: Arc::new(store),
        config: Arc::new(config),
    }
}
