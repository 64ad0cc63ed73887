//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{Id, PostId};
use kernel::identity::CurrentUser;

use crate::application::{ContentConfig, PostService, TaxonomyService};
use crate::domain::entities::TermKind;
use crate::domain::repository::ContentStore;
use crate::error::ContentResult;
use crate::presentation::dto::{
    PostListQuery, PostListResponse, PostRequest, PostResponse, TermRequest, TermResponse,
};

/// Shared state for content handlers
#[derive(Clone)]
pub struct ContentAppState<S>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<ContentConfig>,
}

impl<S> ContentAppState<S>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    fn posts(&self) -> PostService<S> {
        PostService::new(self.store.clone(), self.config.clone())
    }

    fn terms<K: TermKind>(&self) -> TaxonomyService<S, K> {
        TaxonomyService::new(self.store.clone())
    }
}

// ============================================================================
// Categories / Tags (requires authentication)
// ============================================================================

/// POST /api/v1/admin/{categories,tags}
pub async fn create_term<S, K>(
    State(state): State<ContentAppState<S>>,
    payload: Result<Json<TermRequest>, JsonRejection>,
) -> ContentResult<(StatusCode, Json<TermResponse>)>
where
    S: ContentStore + Clone + Send + Sync + 'static,
    K: TermKind,
{
    let Json(req) = payload?;
    let term = state.terms::<K>().create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(term.into())))
}

/// GET /api/v1/admin/{categories,tags}
pub async fn list_terms<S, K>(
    State(state): State<ContentAppState<S>>,
) -> ContentResult<Json<Vec<TermResponse>>>
where
    S: ContentStore + Clone + Send + Sync + 'static,
    K: TermKind,
{
    let terms = state.terms::<K>().list().await?;
    Ok(Json(terms.into_iter().map(TermResponse::from).collect()))
}

/// PUT /api/v1/admin/{categories,tags}/{id}
pub async fn rename_term<S, K>(
    State(state): State<ContentAppState<S>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TermRequest>, JsonRejection>,
) -> ContentResult<Json<TermResponse>>
where
    S: ContentStore + Clone + Send + Sync + 'static,
    K: TermKind,
{
    let Path(id) = id?;
    let Json(req) = payload?;
    let term = state.terms::<K>().rename(Id::new(id), &req.name).await?;
    Ok(Json(term.into()))
}

/// DELETE /api/v1/admin/{categories,tags}/{id}
pub async fn delete_term<S, K>(
    State(state): State<ContentAppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> ContentResult<StatusCode>
where
    S: ContentStore + Clone + Send + Sync + 'static,
    K: TermKind,
{
    let Path(id) = id?;
    state.terms::<K>().delete(Id::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Posts
// ============================================================================

/// POST /api/v1/admin/posts
///
/// The owner is the authenticated caller.
pub async fn create_post<S>(
    State(state): State<ContentAppState<S>>,
    current_user: CurrentUser,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> ContentResult<(StatusCode, Json<PostResponse>)>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let view = state
        .posts()
        .create(current_user.user_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// GET /api/v1/posts, GET /api/v1/admin/posts
pub async fn list_posts<S>(
    State(state): State<ContentAppState<S>>,
    query: Result<Query<PostListQuery>, QueryRejection>,
) -> ContentResult<Json<PostListResponse>>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    let Query(query) = query?;
    let page = state.posts().list(query.page, query.page_size).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/posts/{id}, GET /api/v1/admin/posts/{id}
pub async fn get_post<S>(
    State(state): State<ContentAppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> ContentResult<Json<PostResponse>>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    let Path(id) = id?;
    let view = state.posts().get(PostId::new(id)).await?;
    Ok(Json(view.into()))
}

/// PUT /api/v1/admin/posts/{id}
pub async fn update_post<S>(
    State(state): State<ContentAppState<S>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> ContentResult<Json<PostResponse>>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    let Path(id) = id?;
    let Json(req) = payload?;
    let view = state.posts().update(PostId::new(id), req.into()).await?;
    Ok(Json(view.into()))
}

/// DELETE /api/v1/admin/posts/{id}
pub async fn delete_post<S>(
    State(state): State<ContentAppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> ContentResult<StatusCode>
where
    S: ContentStore + Clone + Send + Sync + 'static,
{
    let Path(id) = id?;
    state.posts().delete(PostId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
