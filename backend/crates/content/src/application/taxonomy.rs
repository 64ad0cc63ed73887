//! Taxonomy Service
//!
//! Create, list, rename and delete categories and tags. Both kinds follow
//! the same rules: names are trimmed and must be non-empty, and no two terms
//! of one kind share a name. The pre-check gives a friendly error; the
//! unique constraint in the store closes the race between two writers.

use std::marker::PhantomData;
use std::sync::Arc;

use kernel::id::{Id, markers};

use crate::domain::entities::{ReferencePolicy, Term, TermKind};
use crate::domain::repository::{ContentStore, ContentTx};
use crate::domain::value_objects::TermName;
use crate::error::{ContentError, ContentResult};

/// Term management for one kind
pub struct TaxonomyService<S, K>
where
    S: ContentStore,
    K: TermKind,
{
    store: Arc<S>,
    _kind: PhantomData<fn() -> K>,
}

pub type CategoryService<S> = TaxonomyService<S, markers::Category>;
pub type TagService<S> = TaxonomyService<S, markers::Tag>;

impl<S, K> Clone for TaxonomyService<S, K>
where
    S: ContentStore,
    K: TermKind,
{
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

impl<S, K> TaxonomyService<S, K>
where
    S: ContentStore,
    K: TermKind,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    pub async fn create(&self, name: &str) -> ContentResult<Term<K>> {
        let name = TermName::new(name)?;

        let mut tx = self.store.begin().await?;

        if tx.term_name_taken(K::TABLE, &name, None).await? {
            return Err(ContentError::name_taken(K::TABLE.label()));
        }

        let term = Term::<K>::from(tx.insert_term(K::TABLE, &name).await?);
        tx.commit().await?;

        tracing::info!(
            kind = K::TABLE.label(),
            id = %term.id,
            name = %term.name,
            "Term created"
        );

        Ok(term)
    }

    /// All terms of this kind, newest first
    pub async fn list(&self) -> ContentResult<Vec<Term<K>>> {
        let mut tx = self.store.begin().await?;
        let records = tx.list_terms(K::TABLE).await?;
        tx.commit().await?;

        Ok(records.into_iter().map(Term::from).collect())
    }

    pub async fn rename(&self, id: Id<K>, name: &str) -> ContentResult<Term<K>> {
        let name = TermName::new(name)?;

        let mut tx = self.store.begin().await?;

        if tx.find_term(K::TABLE, id.get()).await?.is_none() {
            return Err(ContentError::not_found(K::TABLE.label()));
        }
        if tx.term_name_taken(K::TABLE, &name, Some(id.get())).await? {
            return Err(ContentError::name_taken(K::TABLE.label()));
        }

        let term = Term::<K>::from(tx.rename_term(K::TABLE, id.get(), &name).await?);
        tx.commit().await?;

        tracing::info!(
            kind = K::TABLE.label(),
            id = %term.id,
            name = %term.name,
            "Term renamed"
        );

        Ok(term)
    }

    /// Delete by id
    ///
    /// Missing rows are detected from the affected-row count, without a
    /// separate read.
    pub async fn delete(&self, id: Id<K>) -> ContentResult<()> {
        let mut tx = self.store.begin().await?;

        if K::ON_DELETE == ReferencePolicy::Restrict
            && tx.count_term_references(K::TABLE, id.get()).await? > 0
        {
            return Err(ContentError::in_use(K::TABLE.label()));
        }

        let affected = tx.delete_term(K::TABLE, id.get()).await?;
        if affected == 0 {
            return Err(ContentError::not_found(K::TABLE.label()));
        }

        tx.commit().await?;

        tracing::info!(kind = K::TABLE.label(), id = %id, "Term deleted");

        Ok(())
    }
}
