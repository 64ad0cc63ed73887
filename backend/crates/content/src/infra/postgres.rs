//! PostgreSQL Store Implementation

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::error::conversions::{is_foreign_key_violation, is_unique_violation};
use kernel::id::{CategoryId, Id, PostId, UserId};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entities::{Author, NewPost, Post, PostView, Tag, TermRecord, TermTable};
use crate::domain::repository::{ContentStore, ContentTx};
use crate::domain::value_objects::{
    PageRequest, PostBody, PostFields, PostStatus, PostTitle, TagSet, TermName,
};
use crate::error::{ContentError, ContentResult};

/// PostgreSQL-backed content store
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContentStore for PgContentStore {
    type Tx = PgContentTx;

    async fn begin(&self) -> ContentResult<PgContentTx> {
        let tx = self.pool.begin().await?;
        Ok(PgContentTx { tx })
    }
}

/// A pooled connection inside `BEGIN`
///
/// Dropping without `commit` rolls back.
pub struct PgContentTx {
    tx: Transaction<'static, Postgres>,
}

const POST_COLUMNS: &str = r#"
    id,
    title,
    content,
    summary,
    status,
    user_id,
    category_id,
    created_at,
    updated_at
"#;

const POST_VIEW_SELECT: &str = r#"
    SELECT
        p.id,
        p.title,
        p.content,
        p.summary,
        p.status,
        p.created_at,
        p.updated_at,
        u.id AS author_id,
        u.username AS author_username,
        c.id AS category_id,
        c.name AS category_name,
        c.created_at AS category_created_at,
        c.updated_at AS category_updated_at
    FROM posts p
    JOIN users u ON u.id = p.user_id
    JOIN categories c ON c.id = p.category_id
"#;

impl ContentTx for PgContentTx {
    async fn insert_term(&mut self, table: TermTable, name: &TermName) -> ContentResult<TermRecord> {
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
            table.as_str()
        );

        let row = sqlx::query_as::<_, TermRow>(&sql)
            .bind(name.as_str())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| map_term_write_error(table, e))?;

        Ok(row.into_record())
    }

    async fn find_term(&mut self, table: TermTable, id: i64) -> ContentResult<Option<TermRecord>> {
        let sql = format!(
            "SELECT id, name, created_at, updated_at FROM {} WHERE id = $1",
            table.as_str()
        );

        let row = sqlx::query_as::<_, TermRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(row.map(TermRow::into_record))
    }

    async fn term_name_taken(
        &mut self,
        table: TermTable,
        name: &TermName,
        exclude: Option<i64>,
    ) -> ContentResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE name = $1 AND id IS DISTINCT FROM $2)",
            table.as_str()
        );

        let taken: bool = sqlx::query_scalar(&sql)
            .bind(name.as_str())
            .bind(exclude)
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(taken)
    }

    async fn rename_term(
        &mut self,
        table: TermTable,
        id: i64,
        name: &TermName,
    ) -> ContentResult<TermRecord> {
        let sql = format!(
            r#"
            UPDATE {}
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, created_at, updated_at
            "#,
            table.as_str()
        );

        let row = sqlx::query_as::<_, TermRow>(&sql)
            .bind(name.as_str())
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_term_write_error(table, e))?;

        row.map(TermRow::into_record)
            .ok_or_else(|| ContentError::not_found(table.label()))
    }

    async fn delete_term(&mut self, table: TermTable, id: i64) -> ContentResult<u64> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table.as_str());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                // posts.category_id is ON DELETE RESTRICT
                if is_foreign_key_violation(&e) {
                    ContentError::in_use(table.label())
                } else {
                    ContentError::Database(e)
                }
            })?;

        Ok(result.rows_affected())
    }

    async fn list_terms(&mut self, table: TermTable) -> ContentResult<Vec<TermRecord>> {
        let sql = format!(
            "SELECT id, name, created_at, updated_at FROM {} ORDER BY created_at DESC, id DESC",
            table.as_str()
        );

        let rows = sqlx::query_as::<_, TermRow>(&sql)
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(rows.into_iter().map(TermRow::into_record).collect())
    }

    async fn count_term_references(&mut self, table: TermTable, id: i64) -> ContentResult<i64> {
        let sql = match table {
            TermTable::Categories => "SELECT COUNT(*) FROM posts WHERE category_id = $1",
            TermTable::Tags => "SELECT COUNT(*) FROM post_tags WHERE tag_id = $1",
        };

        let count: i64 = sqlx::query_scalar(sql)
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(count)
    }

    async fn count_existing_tags(&mut self, tags: &TagSet) -> ContentResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE id = ANY($1)")
            .bind(tags.to_i64_vec())
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(count)
    }

    async fn author_exists(&mut self, user_id: UserId) -> ContentResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id.get())
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(exists)
    }

    async fn insert_post(&mut self, post: &NewPost) -> ContentResult<Post> {
        let sql = format!(
            r#"
            INSERT INTO posts (
                title,
                content,
                summary,
                status,
                user_id,
                category_id
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post.fields.title.as_str())
            .bind(post.fields.content.as_str())
            .bind(&post.fields.summary)
            .bind(post.fields.status.code())
            .bind(post.user_id.get())
            .bind(post.category_id.get())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_post_write_error)?;

        row.into_post()
    }

    async fn find_post(&mut self, id: PostId) -> ContentResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await?;

        row.map(PostRow::into_post).transpose()
    }

    async fn update_post(&mut self, post: &Post) -> ContentResult<Post> {
        let sql = format!(
            r#"
            UPDATE posts
            SET
                title = $1,
                content = $2,
                summary = $3,
                status = $4,
                category_id = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post.fields.title.as_str())
            .bind(post.fields.content.as_str())
            .bind(&post.fields.summary)
            .bind(post.fields.status.code())
            .bind(post.category_id.get())
            .bind(post.id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_post_write_error)?;

        row.ok_or_else(|| ContentError::not_found("post"))?
            .into_post()
    }

    async fn delete_post(&mut self, id: PostId) -> ContentResult<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn replace_post_tags(&mut self, id: PostId, tags: &TagSet) -> ContentResult<()> {
        let tag_ids = tags.to_i64_vec();

        sqlx::query("DELETE FROM post_tags WHERE post_id = $1 AND tag_id <> ALL($2)")
            .bind(id.get())
            .bind(&tag_ids)
            .execute(&mut *self.tx)
            .await?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO post_tags (post_id, tag_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id.get())
        .bind(&tag_ids)
        .execute(&mut *self.tx)
        .await
        .map_err(map_post_write_error)?;

        Ok(())
    }

    async fn clear_post_tags(&mut self, id: PostId) -> ContentResult<u64> {
        let result = sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_posts(&mut self) -> ContentResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(count)
    }

    async fn find_post_view(&mut self, id: PostId) -> ContentResult<Option<PostView>> {
        let sql = format!("{POST_VIEW_SELECT} WHERE p.id = $1");

        let row = sqlx::query_as::<_, PostViewRow>(&sql)
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.materialize(vec![row]).await?.pop())
    }

    async fn list_post_views(&mut self, page: &PageRequest) -> ContentResult<Vec<PostView>> {
        let sql = format!(
            "{POST_VIEW_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT $1 OFFSET $2"
        );

        let rows = sqlx::query_as::<_, PostViewRow>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;

        self.materialize(rows).await
    }

    async fn commit(self) -> ContentResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

impl PgContentTx {
    /// Attach tags to joined post rows, keeping row order
    async fn materialize(&mut self, rows: Vec<PostViewRow>) -> ContentResult<Vec<PostView>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let tag_rows = sqlx::query_as::<_, PostTagRow>(
            r#"
            SELECT
                pt.post_id,
                t.id,
                t.name,
                t.created_at,
                t.updated_at
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY pt.post_id, t.id
            "#,
        )
        .bind(&post_ids)
        .fetch_all(&mut *self.tx)
        .await?;

        let mut tags_by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            let (post_id, tag) = row.into_tag();
            tags_by_post.entry(post_id).or_default().push(tag);
        }

        rows.into_iter()
            .map(|row| {
                let tags = tags_by_post.remove(&row.id).unwrap_or_default();
                row.into_view(tags)
            })
            .collect()
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Unique violations on a term write become name conflicts
fn map_term_write_error(table: TermTable, err: sqlx::Error) -> ContentError {
    if is_unique_violation(&err) {
        ContentError::name_taken(table.label())
    } else {
        ContentError::Database(err)
    }
}

/// Foreign key violations on a post write become reference validation errors
///
/// Reached only when a referenced row disappears between the check and the
/// write in another transaction.
fn map_post_write_error(err: sqlx::Error) -> ContentError {
    if !is_foreign_key_violation(&err) {
        return ContentError::Database(err);
    }

    let constraint = match &err {
        sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or_default().to_string(),
        _ => String::new(),
    };

    if constraint.contains("category") {
        ContentError::invalid_category()
    } else if constraint.contains("tag") {
        ContentError::invalid_tag()
    } else if constraint.contains("user") {
        ContentError::invalid_user()
    } else {
        ContentError::Database(err)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TermRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TermRow {
    fn into_record(self) -> TermRecord {
        TermRecord {
            id: self.id,
            name: TermName::from_db(self.name),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    summary: String,
    status: i16,
    user_id: i64,
    category_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> ContentResult<Post> {
        Ok(Post {
            id: PostId::new(self.id),
            fields: post_fields(self.title, self.content, self.summary, self.status)?,
            user_id: UserId::new(self.user_id),
            category_id: CategoryId::new(self.category_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PostViewRow {
    id: i64,
    title: String,
    content: String,
    summary: String,
    status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: i64,
    author_username: String,
    category_id: i64,
    category_name: String,
    category_created_at: DateTime<Utc>,
    category_updated_at: DateTime<Utc>,
}

impl PostViewRow {
    fn into_view(self, tags: Vec<Tag>) -> ContentResult<PostView> {
        Ok(PostView {
            id: PostId::new(self.id),
            fields: post_fields(self.title, self.content, self.summary, self.status)?,
            author: Author {
                id: UserId::new(self.author_id),
                username: self.author_username,
            },
            category: TermRecord {
                id: self.category_id,
                name: TermName::from_db(self.category_name),
                created_at: self.category_created_at,
                updated_at: self.category_updated_at,
            }
            .into(),
            tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PostTagRow {
    post_id: i64,
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostTagRow {
    fn into_tag(self) -> (i64, Tag) {
        let tag = Tag {
            id: Id::new(self.id),
            name: TermName::from_db(self.name),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (self.post_id, tag)
    }
}

/// Stored rows are trusted except for the status code
fn post_fields(
    title: String,
    content: String,
    summary: String,
    status: i16,
) -> ContentResult<PostFields> {
    let status = PostStatus::from_code(i64::from(status))
        .map_err(|_| ContentError::Internal(format!("unknown post status {status}")))?;

    Ok(PostFields {
        title: PostTitle::from_db(title),
        content: PostBody::from_db(content),
        summary,
        status,
    })
}
