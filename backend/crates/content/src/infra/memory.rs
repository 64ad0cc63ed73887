//! In-Memory Store Implementation
//!
//! Same constraints as the PostgreSQL schema: unique term names, category
//! deletes restricted while posts reference them, tag and post deletes
//! cascading to `post_tags`. Transactions are serializable: `begin` takes an
//! exclusive lock and works on a copy that `commit` writes back.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{PostId, UserId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::{Author, NewPost, Post, PostView, Tag, TermRecord, TermTable};
use crate::domain::repository::{ContentStore, ContentTx};
use crate::domain::value_objects::{PageRequest, TagSet, TermName};
use crate::error::{ContentError, ContentResult};

#[derive(Clone, Default)]
struct ContentTables {
    authors: BTreeMap<i64, String>,
    categories: BTreeMap<i64, TermRecord>,
    tags: BTreeMap<i64, TermRecord>,
    posts: BTreeMap<i64, Post>,
    /// `(post_id, tag_id)`
    post_tags: BTreeSet<(i64, i64)>,
    last_category_id: i64,
    last_tag_id: i64,
    last_post_id: i64,
}

impl ContentTables {
    fn terms(&self, table: TermTable) -> &BTreeMap<i64, TermRecord> {
        match table {
            TermTable::Categories => &self.categories,
            TermTable::Tags => &self.tags,
        }
    }

    fn terms_mut(&mut self, table: TermTable) -> &mut BTreeMap<i64, TermRecord> {
        match table {
            TermTable::Categories => &mut self.categories,
            TermTable::Tags => &mut self.tags,
        }
    }

    fn next_term_id(&mut self, table: TermTable) -> i64 {
        let last = match table {
            TermTable::Categories => &mut self.last_category_id,
            TermTable::Tags => &mut self.last_tag_id,
        };
        *last += 1;
        *last
    }

    fn name_taken(&self, table: TermTable, name: &TermName, exclude: Option<i64>) -> bool {
        self.terms(table)
            .values()
            .any(|t| &t.name == name && Some(t.id) != exclude)
    }

    fn references(&self, table: TermTable, id: i64) -> usize {
        match table {
            TermTable::Categories => self
                .posts
                .values()
                .filter(|p| p.category_id.get() == id)
                .count(),
            TermTable::Tags => self.post_tags.iter().filter(|(_, t)| *t == id).count(),
        }
    }

    /// Inner-join semantics: a post whose owner or category is gone is skipped
    fn view(&self, post: &Post) -> Option<PostView> {
        let username = self.authors.get(&post.user_id.get())?;
        let category = self.categories.get(&post.category_id.get())?;

        let tags: Vec<Tag> = self
            .post_tags
            .iter()
            .filter(|(p, _)| *p == post.id.get())
            .filter_map(|(_, t)| self.tags.get(t))
            .cloned()
            .map(Tag::from)
            .collect();

        Some(PostView {
            id: post.id,
            fields: post.fields.clone(),
            author: Author {
                id: post.user_id,
                username: username.clone(),
            },
            category: category.clone().into(),
            tags,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }
}

/// In-memory content store
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    tables: Arc<Mutex<ContentTables>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a user known as a post owner
    pub async fn register_author(&self, user_id: UserId, username: impl Into<String>) {
        let mut tables = self.tables.lock().await;
        tables.authors.insert(user_id.get(), username.into());
    }

    /// Number of stored posts
    pub async fn post_count(&self) -> usize {
        self.tables.lock().await.posts.len()
    }

    /// Number of stored post-tag associations
    pub async fn association_count(&self) -> usize {
        self.tables.lock().await.post_tags.len()
    }
}

impl ContentStore for InMemoryContentStore {
    type Tx = InMemoryContentTx;

    async fn begin(&self) -> ContentResult<InMemoryContentTx> {
        let guard = self.tables.clone().lock_owned().await;
        let work = guard.clone();
        Ok(InMemoryContentTx { guard, work })
    }
}

/// Transaction over the in-memory store
pub struct InMemoryContentTx {
    guard: OwnedMutexGuard<ContentTables>,
    work: ContentTables,
}

impl ContentTx for InMemoryContentTx {
    async fn insert_term(&mut self, table: TermTable, name: &TermName) -> ContentResult<TermRecord> {
        if self.work.name_taken(table, name, None) {
            return Err(ContentError::name_taken(table.label()));
        }

        let now = Utc::now();
        let record = TermRecord {
            id: self.work.next_term_id(table),
            name: name.clone(),
            created_at: now,
            updated_at: now,
        };
        self.work.terms_mut(table).insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_term(&mut self, table: TermTable, id: i64) -> ContentResult<Option<TermRecord>> {
        Ok(self.work.terms(table).get(&id).cloned())
    }

    async fn term_name_taken(
        &mut self,
        table: TermTable,
        name: &TermName,
        exclude: Option<i64>,
    ) -> ContentResult<bool> {
        Ok(self.work.name_taken(table, name, exclude))
    }

    async fn rename_term(
        &mut self,
        table: TermTable,
        id: i64,
        name: &TermName,
    ) -> ContentResult<TermRecord> {
        if self.work.name_taken(table, name, Some(id)) {
            return Err(ContentError::name_taken(table.label()));
        }

        let record = self
            .work
            .terms_mut(table)
            .get_mut(&id)
            .ok_or_else(|| ContentError::not_found(table.label()))?;
        record.name = name.clone();
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete_term(&mut self, table: TermTable, id: i64) -> ContentResult<u64> {
        if table == TermTable::Categories && self.work.references(table, id) > 0 {
            return Err(ContentError::in_use(table.label()));
        }

        if self.work.terms_mut(table).remove(&id).is_none() {
            return Ok(0);
        }
        if table == TermTable::Tags {
            self.work.post_tags.retain(|(_, t)| *t != id);
        }

        Ok(1)
    }

    async fn list_terms(&mut self, table: TermTable) -> ContentResult<Vec<TermRecord>> {
        let mut records: Vec<TermRecord> = self.work.terms(table).values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn count_term_references(&mut self, table: TermTable, id: i64) -> ContentResult<i64> {
        Ok(self.work.references(table, id) as i64)
    }

    async fn count_existing_tags(&mut self, tags: &TagSet) -> ContentResult<i64> {
        let found = tags
            .as_slice()
            .iter()
            .filter(|id| self.work.tags.contains_key(&id.get()))
            .count();
        Ok(found as i64)
    }

    async fn author_exists(&mut self, user_id: UserId) -> ContentResult<bool> {
        Ok(self.work.authors.contains_key(&user_id.get()))
    }

    async fn insert_post(&mut self, post: &NewPost) -> ContentResult<Post> {
        if !self.work.authors.contains_key(&post.user_id.get()) {
            return Err(ContentError::invalid_user());
        }
        if !self.work.categories.contains_key(&post.category_id.get()) {
            return Err(ContentError::invalid_category());
        }

        self.work.last_post_id += 1;
        let now = Utc::now();
        let created = Post {
            id: PostId::new(self.work.last_post_id),
            fields: post.fields.clone(),
            user_id: post.user_id,
            category_id: post.category_id,
            created_at: now,
            updated_at: now,
        };
        self.work.posts.insert(created.id.get(), created.clone());

        Ok(created)
    }

    async fn find_post(&mut self, id: PostId) -> ContentResult<Option<Post>> {
        Ok(self.work.posts.get(&id.get()).cloned())
    }

    async fn update_post(&mut self, post: &Post) -> ContentResult<Post> {
        if !self.work.categories.contains_key(&post.category_id.get()) {
            return Err(ContentError::invalid_category());
        }

        let stored = self
            .work
            .posts
            .get_mut(&post.id.get())
            .ok_or_else(|| ContentError::not_found("post"))?;
        stored.fields = post.fields.clone();
        stored.category_id = post.category_id;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete_post(&mut self, id: PostId) -> ContentResult<u64> {
        if self.work.posts.remove(&id.get()).is_none() {
            return Ok(0);
        }
        self.work.post_tags.retain(|(p, _)| *p != id.get());
        Ok(1)
    }

    async fn replace_post_tags(&mut self, id: PostId, tags: &TagSet) -> ContentResult<()> {
        if tags
            .as_slice()
            .iter()
            .any(|t| !self.work.tags.contains_key(&t.get()))
        {
            return Err(ContentError::invalid_tag());
        }

        let post_id = id.get();
        self.work
            .post_tags
            .retain(|(p, t)| *p != post_id || tags.as_slice().iter().any(|k| k.get() == *t));
        for tag in tags.as_slice() {
            self.work.post_tags.insert((post_id, tag.get()));
        }

        Ok(())
    }

    async fn clear_post_tags(&mut self, id: PostId) -> ContentResult<u64> {
        let before = self.work.post_tags.len();
        self.work.post_tags.retain(|(p, _)| *p != id.get());
        Ok((before - self.work.post_tags.len()) as u64)
    }

    async fn count_posts(&mut self) -> ContentResult<i64> {
        Ok(self.work.posts.len() as i64)
    }

    async fn find_post_view(&mut self, id: PostId) -> ContentResult<Option<PostView>> {
        Ok(self
            .work
            .posts
            .get(&id.get())
            .and_then(|post| self.work.view(post)))
    }

    async fn list_post_views(&mut self, page: &PageRequest) -> ContentResult<Vec<PostView>> {
        let mut posts: Vec<&Post> = self.work.posts.values().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(posts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .filter_map(|post| self.work.view(post))
            .collect())
    }

    async fn commit(self) -> ContentResult<()> {
        let InMemoryContentTx { mut guard, work } = self;
        *guard = work;
        Ok(())
    }
}
