//! Domain Entities

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, Id, PostId, UserId, markers};

use crate::domain::value_objects::{PostFields, TermName};

// ============================================================================
// Terms (Category / Tag)
// ============================================================================

/// Backing table of a term kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermTable {
    Categories,
    Tags,
}

impl TermTable {
    pub fn as_str(self) -> &'static str {
        match self {
            TermTable::Categories => "categories",
            TermTable::Tags => "tags",
        }
    }

    /// Lowercase singular used in messages
    pub fn label(self) -> &'static str {
        match self {
            TermTable::Categories => "category",
            TermTable::Tags => "tag",
        }
    }
}

/// What deleting a still-referenced term does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Refuse the delete with a conflict
    Restrict,
    /// Drop the references together with the term
    Unlink,
}

/// A flat, uniquely named taxonomy kind
///
/// Categories and tags share one shape and one set of rules; only the
/// storage table and the handling of references on delete differ.
pub trait TermKind: Send + Sync + 'static {
    const TABLE: TermTable;
    const ON_DELETE: ReferencePolicy;
}

impl TermKind for markers::Category {
    const TABLE: TermTable = TermTable::Categories;
    const ON_DELETE: ReferencePolicy = ReferencePolicy::Restrict;
}

impl TermKind for markers::Tag {
    const TABLE: TermTable = TermTable::Tags;
    const ON_DELETE: ReferencePolicy = ReferencePolicy::Unlink;
}

/// A category or tag row
pub struct Term<K> {
    pub id: Id<K>,
    pub name: TermName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type Category = Term<markers::Category>;
pub type Tag = Term<markers::Tag>;

// Manual impls: derives would demand the same traits from the marker type.
impl<K> Clone for Term<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl<K> PartialEq for Term<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
    }
}

impl<K> fmt::Debug for Term<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Term")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl<K> From<TermRecord> for Term<K> {
    fn from(record: TermRecord) -> Self {
        Self {
            id: Id::new(record.id),
            name: record.name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Untyped term row as the store hands it out
#[derive(Debug, Clone, PartialEq)]
pub struct TermRecord {
    pub id: i64,
    pub name: TermName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Posts
// ============================================================================

/// A post row without its associations
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub fields: PostFields,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Overwrite scalar fields and category. The owner never changes.
    pub fn apply(&mut self, fields: PostFields, category_id: CategoryId, now: DateTime<Utc>) {
        self.fields = fields;
        self.category_id = category_id;
        self.updated_at = now;
    }
}

/// A post about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub fields: PostFields,
    pub user_id: UserId,
    pub category_id: CategoryId,
}

/// Public projection of the owning user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub username: String,
}

/// A post with owner, category and tags resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub id: PostId,
    pub fields: PostFields,
    pub author: Author,
    pub category: Category,
    /// Ordered by tag id
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the post list
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub posts: Vec<PostView>,
    /// Count of all posts, independent of the window
    pub total_count: i64,
}
