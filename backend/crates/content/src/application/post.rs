//! Post Service
//!
//! Every write runs its checks and writes inside one store transaction, so a
//! post never references a missing category or tag and a failed request
//! leaves no rows behind. After commit the post is reloaded with owner,
//! category and tags resolved.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CategoryId, PostId, TagId, UserId};

use crate::application::config::ContentConfig;
use crate::domain::entities::{NewPost, PostPage, PostView, TermTable};
use crate::domain::repository::{ContentStore, ContentTx};
use crate::domain::value_objects::{PageRequest, PostFields, TagSet};
use crate::error::{ContentError, ContentResult};

/// Fields accepted by post create and update
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub status: i64,
    pub category_id: CategoryId,
    pub tag_ids: Vec<TagId>,
}

impl PostInput {
    fn validate(self) -> ContentResult<(PostFields, CategoryId, TagSet)> {
        let fields = PostFields::new(self.title, self.content, self.summary, self.status)?;
        Ok((fields, self.category_id, TagSet::new(self.tag_ids)))
    }
}

/// Post service
pub struct PostService<S>
where
    S: ContentStore,
{
    store: Arc<S>,
    config: Arc<ContentConfig>,
}

impl<S> Clone for PostService<S>
where
    S: ContentStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> PostService<S>
where
    S: ContentStore,
{
    pub fn new(store: Arc<S>, config: Arc<ContentConfig>) -> Self {
        Self { store, config }
    }

    /// Create a post owned by `user_id`
    pub async fn create(&self, user_id: UserId, input: PostInput) -> ContentResult<PostView> {
        let (fields, category_id, tags) = input.validate()?;

        let mut tx = self.store.begin().await?;

        if !tx.author_exists(user_id).await? {
            return Err(ContentError::invalid_user());
        }
        ensure_references(&mut tx, category_id, &tags).await?;

        let post = tx
            .insert_post(&NewPost {
                fields,
                user_id,
                category_id,
            })
            .await?;
        tx.replace_post_tags(post.id, &tags).await?;

        tx.commit().await?;

        tracing::info!(
            post_id = %post.id,
            user_id = %user_id,
            category_id = %category_id,
            tag_count = tags.len(),
            "Post created"
        );

        self.get(post.id).await
    }

    /// Overwrite scalar fields and category, and replace the tag set
    pub async fn update(&self, id: PostId, input: PostInput) -> ContentResult<PostView> {
        let (fields, category_id, tags) = input.validate()?;

        let mut tx = self.store.begin().await?;

        let Some(mut post) = tx.find_post(id).await? else {
            return Err(ContentError::not_found("post"));
        };
        ensure_references(&mut tx, category_id, &tags).await?;

        post.apply(fields, category_id, Utc::now());
        tx.update_post(&post).await?;
        tx.replace_post_tags(id, &tags).await?;

        tx.commit().await?;

        tracing::info!(
            post_id = %id,
            category_id = %category_id,
            tag_count = tags.len(),
            "Post updated"
        );

        self.get(id).await
    }

    /// Delete a post together with its tag associations
    pub async fn delete(&self, id: PostId) -> ContentResult<()> {
        let mut tx = self.store.begin().await?;

        if tx.find_post(id).await?.is_none() {
            return Err(ContentError::not_found("post"));
        }

        let unlinked = tx.clear_post_tags(id).await?;
        tx.delete_post(id).await?;

        tx.commit().await?;

        tracing::info!(post_id = %id, unlinked_tags = unlinked, "Post deleted");

        Ok(())
    }

    /// One page of posts, newest first, plus the total post count
    pub async fn list(&self, page: Option<i64>, page_size: Option<i64>) -> ContentResult<PostPage> {
        let page = PageRequest::new(page, page_size, &self.config);

        let mut tx = self.store.begin().await?;
        let total_count = tx.count_posts().await?;
        let posts = tx.list_post_views(&page).await?;
        tx.commit().await?;

        Ok(PostPage { posts, total_count })
    }

    pub async fn get(&self, id: PostId) -> ContentResult<PostView> {
        let mut tx = self.store.begin().await?;
        let view = tx.find_post_view(id).await?;
        tx.commit().await?;

        view.ok_or_else(|| ContentError::not_found("post"))
    }
}

/// Category must exist and every distinct tag id must resolve
async fn ensure_references<T>(tx: &mut T, category_id: CategoryId, tags: &TagSet) -> ContentResult<()>
where
    T: ContentTx + Send,
{
    if tx
        .find_term(TermTable::Categories, category_id.get())
        .await?
        .is_none()
    {
        return Err(ContentError::invalid_category());
    }

    if !tags.is_empty() {
        let found = tx.count_existing_tags(tags).await?;
        if found != tags.len() as i64 {
            return Err(ContentError::invalid_tag());
        }
    }

    Ok(())
}
