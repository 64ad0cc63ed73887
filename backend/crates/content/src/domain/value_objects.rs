//! Value Objects
//!
//! Validated inputs of the content domain. Each constructor either returns a
//! value that satisfies its invariant or a `FieldError`.

use derive_more::Display;
use kernel::id::TagId;
use thiserror::Error;

use crate::application::config::ContentConfig;

/// Max length of a category or tag name (in characters)
pub const NAME_MAX_LENGTH: usize = 100;
/// Min length of a post title (in characters)
pub const TITLE_MIN_LENGTH: usize = 2;
/// Max length of a post title (in characters)
pub const TITLE_MAX_LENGTH: usize = 255;
/// Min length of a post body (in characters)
pub const CONTENT_MIN_LENGTH: usize = 10;

/// Field validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name must be at most 100 characters")]
    NameTooLong,

    #[error("title must be between 2 and 255 characters")]
    TitleLength,

    #[error("content must be at least 10 characters")]
    ContentTooShort,

    #[error("status must be 0 (draft) or 1 (published)")]
    InvalidStatus,
}

// ============================================================================
// Term Name
// ============================================================================

/// Name of a category or tag
///
/// Trimmed, non-empty and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct TermName(String);

impl TermName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(FieldError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX_LENGTH {
            return Err(FieldError::NameTooLong);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Trust a value already stored by the database
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Post Fields
// ============================================================================

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
}

impl PostStatus {
    pub fn from_code(code: i64) -> Result<Self, FieldError> {
        match code {
            0 => Ok(PostStatus::Draft),
            1 => Ok(PostStatus::Published),
            _ => Err(FieldError::InvalidStatus),
        }
    }

    pub fn code(self) -> i16 {
        match self {
            PostStatus::Draft => 0,
            PostStatus::Published => 1,
        }
    }
}

/// Post title (2 to 255 characters)
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        let len = raw.chars().count();
        if !(TITLE_MIN_LENGTH..=TITLE_MAX_LENGTH).contains(&len) {
            return Err(FieldError::TitleLength);
        }
        Ok(Self(raw))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post body (at least 10 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    pub fn new(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        if raw.chars().count() < CONTENT_MIN_LENGTH {
            return Err(FieldError::ContentTooShort);
        }
        Ok(Self(raw))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Scalar fields written by post create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: PostTitle,
    pub content: PostBody,
    pub summary: String,
    pub status: PostStatus,
}

impl PostFields {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        summary: Option<String>,
        status: i64,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            title: PostTitle::new(title)?,
            content: PostBody::new(content)?,
            summary: summary.unwrap_or_default(),
            status: PostStatus::from_code(status)?,
        })
    }
}

// ============================================================================
// Tag Set
// ============================================================================

/// Distinct tag ids in request order
///
/// Duplicates are dropped, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<TagId>);

impl TagSet {
    pub fn new(ids: impl IntoIterator<Item = TagId>) -> Self {
        let mut distinct: Vec<TagId> = Vec::new();
        for id in ids {
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }
        Self(distinct)
    }

    pub fn as_slice(&self) -> &[TagId] {
        &self.0
    }

    /// Raw ids for array binds
    pub fn to_i64_vec(&self) -> Vec<i64> {
        self.0.iter().map(|id| id.get()).collect()
    }

    pub fn contains(&self, id: TagId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// A window over the post list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Clamp raw query values: page to at least 1, page size to
    /// `1..=max_page_size`. Missing values take the configured defaults.
    pub fn new(page: Option<i64>, page_size: Option<i64>, config: &ContentConfig) -> Self {
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        let page_size = page_size
            .unwrap_or(i64::from(config.default_page_size))
            .clamp(1, i64::from(config.max_page_size.max(1)));

        Self {
            page: page as u32,
            page_size: page_size as u32,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_name_trims() {
        let name = TermName::new("  Tech  ").unwrap();
        assert_eq!(name.as_str(), "Tech");
        assert_eq!(name.to_string(), "Tech");
    }

    #[test]
    fn test_term_name_rejects_blank() {
        assert_eq!(TermName::new(""), Err(FieldError::EmptyName));
        assert_eq!(TermName::new(" \t\n "), Err(FieldError::EmptyName));
    }

    #[test]
    fn test_term_name_length_limit() {
        assert!(TermName::new("a".repeat(100)).is_ok());
        assert_eq!(
            TermName::new("a".repeat(101)),
            Err(FieldError::NameTooLong)
        );
    }

    #[test]
    fn test_term_name_case_sensitive() {
        assert_ne!(TermName::new("Go").unwrap(), TermName::new("go").unwrap());
    }

    #[test]
    fn test_post_status_codes() {
        assert_eq!(PostStatus::from_code(0), Ok(PostStatus::Draft));
        assert_eq!(PostStatus::from_code(1), Ok(PostStatus::Published));
        assert_eq!(PostStatus::from_code(2), Err(FieldError::InvalidStatus));
        assert_eq!(PostStatus::from_code(-1), Err(FieldError::InvalidStatus));
        assert_eq!(PostStatus::Draft.code(), 0);
    }

    #[test]
    fn test_post_title_bounds() {
        assert_eq!(PostTitle::new("a"), Err(FieldError::TitleLength));
        assert!(PostTitle::new("ab").is_ok());
        assert!(PostTitle::new("a".repeat(255)).is_ok());
        assert_eq!(PostTitle::new("a".repeat(256)), Err(FieldError::TitleLength));
        // counted in characters, not bytes
        assert!(PostTitle::new("日本").is_ok());
    }

    #[test]
    fn test_post_body_minimum() {
        assert_eq!(PostBody::new("too short"), Err(FieldError::ContentTooShort));
        assert!(PostBody::new("long enough").is_ok());
    }

    #[test]
    fn test_post_fields_default_summary() {
        let fields = PostFields::new("Hello", "0123456789", None, 0).unwrap();
        assert_eq!(fields.summary, "");
        assert_eq!(fields.status, PostStatus::Draft);
    }

    #[test]
    fn test_tag_set_dedup_keeps_first_occurrence() {
        let set = TagSet::new([3, 1, 3, 2, 1].map(TagId::new));
        assert_eq!(set.to_i64_vec(), vec![3, 1, 2]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(TagId::new(2)));
        assert!(TagSet::new([]).is_empty());
    }

    #[test]
    fn test_page_request_defaults() {
        let config = ContentConfig::default();
        let page = PageRequest::new(None, None, &config);
        assert_eq!(page.page(), 1);
        assert_eq!(page.page_size(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_request_clamps() {
        let config = ContentConfig::default();

        let page = PageRequest::new(Some(0), Some(0), &config);
        assert_eq!((page.page(), page.page_size()), (1, 1));

        let page = PageRequest::new(Some(-5), Some(1_000), &config);
        assert_eq!((page.page(), page.page_size()), (1, 100));

        let page = PageRequest::new(Some(3), Some(20), &config);
        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 20);
    }
}
