//! Storage adapter contract
//!
//! A model never talks to a store directly. It goes through an [`Adapter`],
//! a small capability interface addressed by collection name. Adapters own
//! identifier generation and any atomicity the backing store needs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AdapterResult;
use crate::model::Record;

/// Uniform interface over a key-value store
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Store `attributes` under a freshly assigned `id` and return the stored record.
    ///
    /// Must not drop any submitted field.
    async fn create(&self, collection: &str, attributes: Record) -> AdapterResult<Record>;

    /// Scan `collection`. `filter` is an exact-match predicate map; `None`
    /// means an unrestricted scan.
    async fn find_all(&self, collection: &str, filter: Option<&Record>)
        -> AdapterResult<Vec<Record>>;

    /// Fetch one record. A missing key is `Ok(None)`, never an error.
    async fn find_by_id(&self, collection: &str, id: &str) -> AdapterResult<Option<Record>>;

    /// Merge `attributes` into the existing record and return the full result,
    /// or `None` when no record has that id.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        attributes: Record,
    ) -> AdapterResult<Option<Record>>;

    /// Remove a record; `true` iff it existed
    async fn destroy(&self, collection: &str, id: &str) -> AdapterResult<bool>;

    /// Name used in log output
    fn backend_name(&self) -> &'static str {
        "custom"
    }
}

#[async_trait]
impl<A> Adapter for Arc<A>
where
    A: Adapter + ?Sized,
{
    async fn create(&self, collection: &str, attributes: Record) -> AdapterResult<Record> {
        (**self).create(collection, attributes).await
    }

    async fn find_all(
        &self,
        collection: &str,
        filter: Option<&Record>,
    ) -> AdapterResult<Vec<Record>> {
        (**self).find_all(collection, filter).await
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> AdapterResult<Option<Record>> {
        (**self).find_by_id(collection, id).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        attributes: Record,
    ) -> AdapterResult<Option<Record>> {
        (**self).update(collection, id, attributes).await
    }

    async fn destroy(&self, collection: &str, id: &str) -> AdapterResult<bool> {
        (**self).destroy(collection, id).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// `true` when every key in `filter` is present in `record` with an equal value
pub fn matches_filter(record: &Record, filter: &Record) -> bool {
    filter
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}
