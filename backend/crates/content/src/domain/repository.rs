//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every read and write goes through a transaction handle obtained from
//! `ContentStore::begin`. `commit` consumes the handle; dropping it without
//! committing rolls back everything done through it.

use kernel::id::{PostId, UserId};

use crate::domain::entities::{NewPost, Post, PostView, TermRecord, TermTable};
use crate::domain::value_objects::{PageRequest, TagSet, TermName};
use crate::error::ContentResult;

/// Entry point of the content persistence port
#[trait_variant::make(ContentStore: Send)]
pub trait LocalContentStore {
    type Tx: ContentTx + Send;

    /// Open a new transaction
    async fn begin(&self) -> ContentResult<Self::Tx>;
}

/// Operations available inside one transaction
#[trait_variant::make(ContentTx: Send)]
pub trait LocalContentTx {
    // ------------------------------------------------------------------
    // Terms
    // ------------------------------------------------------------------

    /// Insert a term. A name collision fails with `ContentError::Conflict`.
    async fn insert_term(&mut self, table: TermTable, name: &TermName)
        -> ContentResult<TermRecord>;

    async fn find_term(&mut self, table: TermTable, id: i64)
        -> ContentResult<Option<TermRecord>>;

    /// Whether another term in the table already has this name
    async fn term_name_taken(
        &mut self,
        table: TermTable,
        name: &TermName,
        exclude: Option<i64>,
    ) -> ContentResult<bool>;

    /// Rename an existing term. A name collision fails with `ContentError::Conflict`.
    async fn rename_term(
        &mut self,
        table: TermTable,
        id: i64,
        name: &TermName,
    ) -> ContentResult<TermRecord>;

    /// Delete by id and return the affected row count
    ///
    /// Tag associations of a deleted tag go with it. A category still
    /// referenced by a post fails with `ContentError::Conflict`.
    async fn delete_term(&mut self, table: TermTable, id: i64) -> ContentResult<u64>;

    /// All terms in the table, newest first
    async fn list_terms(&mut self, table: TermTable) -> ContentResult<Vec<TermRecord>>;

    /// Number of posts referencing the term
    async fn count_term_references(&mut self, table: TermTable, id: i64) -> ContentResult<i64>;

    /// Number of ids in the set that resolve to an existing tag
    async fn count_existing_tags(&mut self, tags: &TagSet) -> ContentResult<i64>;

    // ------------------------------------------------------------------
    // Authors
    // ------------------------------------------------------------------

    async fn author_exists(&mut self, user_id: UserId) -> ContentResult<bool>;

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    async fn insert_post(&mut self, post: &NewPost) -> ContentResult<Post>;

    async fn find_post(&mut self, id: PostId) -> ContentResult<Option<Post>>;

    /// Persist scalar fields and category of a loaded post
    async fn update_post(&mut self, post: &Post) -> ContentResult<Post>;

    /// Delete by id and return the affected row count
    async fn delete_post(&mut self, id: PostId) -> ContentResult<u64>;

    /// Set the post's tag associations to exactly `tags`
    ///
    /// Members missing from `tags` are unlinked, new members are linked and
    /// common members are left alone.
    async fn replace_post_tags(&mut self, id: PostId, tags: &TagSet) -> ContentResult<()>;

    /// Remove every tag association of the post and return how many were removed
    async fn clear_post_tags(&mut self, id: PostId) -> ContentResult<u64>;

    async fn count_posts(&mut self) -> ContentResult<i64>;

    async fn find_post_view(&mut self, id: PostId) -> ContentResult<Option<PostView>>;

    /// Posts ordered by `created_at DESC, id DESC`, windowed by `page`
    async fn list_post_views(&mut self, page: &PageRequest) -> ContentResult<Vec<PostView>>;

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    async fn commit(self) -> ContentResult<()>;
}
