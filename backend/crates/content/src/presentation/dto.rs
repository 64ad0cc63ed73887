//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, PostId, TagId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::PostInput;
use crate::domain::entities::{Author, PostPage, PostView, Term};

// ============================================================================
// Categories / Tags
// ============================================================================

/// Create or rename request for a category or tag
#[derive(Debug, Clone, Deserialize)]
pub struct TermRequest {
    pub name: String,
}

/// Category or tag response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<K> From<Term<K>> for TermResponse {
    fn from(term: Term<K>) -> Self {
        Self {
            id: term.id.get(),
            name: term.name.as_str().to_string(),
            created_at: term.created_at,
            updated_at: term.updated_at,
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Create or update request for a post
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// `0` draft, `1` published
    pub status: i64,
    #[serde(alias = "category_id")]
    pub category_id: CategoryId,
    #[serde(default, alias = "tag_ids")]
    pub tag_ids: Vec<TagId>,
}

impl From<PostRequest> for PostInput {
    fn from(req: PostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            summary: req.summary,
            status: req.status,
            category_id: req.category_id,
            tag_ids: req.tag_ids,
        }
    }
}

/// Post list query (`?page=2&pageSize=20`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page: Option<i64>,
    #[serde(alias = "page_size")]
    pub page_size: Option<i64>,
}

/// Post owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: UserId,
    pub username: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            username: author.username,
        }
    }
}

/// Post with owner, category and tags
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub status: i16,
    pub author: AuthorResponse,
    pub category: TermResponse,
    pub tags: Vec<TermResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostView> for PostResponse {
    fn from(view: PostView) -> Self {
        Self {
            id: view.id,
            title: view.fields.title.as_str().to_string(),
            content: view.fields.content.as_str().to_string(),
            summary: view.fields.summary,
            status: view.fields.status.code(),
            author: view.author.into(),
            category: view.category.into(),
            tags: view.tags.into_iter().map(TermResponse::from).collect(),
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

/// One page of posts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total_count: i64,
}

impl From<PostPage> for PostListResponse {
    fn from(page: PostPage) -> Self {
        Self {
            posts: page.posts.into_iter().map(PostResponse::from).collect(),
            total_count: page.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_accepts_both_key_styles() {
        let camel: PostRequest = serde_json::from_str(
            r#"{"title":"Hi","content":"0123456789","status":1,"categoryId":3,"tagIds":[1,2]}"#,
        )
        .unwrap();
        let snake: PostRequest = serde_json::from_str(
            r#"{"title":"Hi","content":"0123456789","status":1,"category_id":3,"tag_ids":[1,2]}"#,
        )
        .unwrap();

        assert_eq!(camel.category_id, snake.category_id);
        assert_eq!(camel.tag_ids, snake.tag_ids);
        assert_eq!(camel.summary, None);
    }

    #[test]
    fn test_post_request_requires_status() {
        let result: Result<PostRequest, _> =
            serde_json::from_str(r#"{"title":"Hi","content":"0123456789","categoryId":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_post_request_tag_ids_default_empty() {
        let req: PostRequest = serde_json::from_str(
            r#"{"title":"Hi","content":"0123456789","status":0,"categoryId":3}"#,
        )
        .unwrap();
        assert!(req.tag_ids.is_empty());
    }

    #[test]
    fn test_list_query_page_size_aliases() {
        let query: PostListQuery = serde_json::from_str(r#"{"page":2,"pageSize":5}"#).unwrap();
        assert_eq!(query.page_size, Some(5));

        let query: PostListQuery = serde_json::from_str(r#"{"page_size":7}"#).unwrap();
        assert_eq!(query.page_size, Some(7));
        assert_eq!(query.page, None);
    }
}
