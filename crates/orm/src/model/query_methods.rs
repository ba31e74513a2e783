//! Lookups and association loading

use futures::future::try_join_all;

use crate::backends::Adapter;
use crate::error::{ModelError, ModelResult};
use crate::relationships;

use super::schema::Record;
use super::Model;

impl<A: Adapter + ?Sized> Model<A> {
    /// Fetch one record with its associations resolved
    pub async fn find_by_id(&self, id: &str) -> ModelResult<Record> {
        let table = self.table_name();
        let mut record = self
            .adapter
            .find_by_id(table, id)
            .await?
            .ok_or_else(|| ModelError::not_found(table, id))?;

        self.load_associations(&mut record).await?;
        Ok(record)
    }

    /// Scan the table. Associations are not resolved.
    pub async fn find_all(&self, filter: Option<&Record>) -> ModelResult<Vec<Record>> {
        Ok(self.adapter.find_all(self.table_name(), filter).await?)
    }

    /// Exact-match query with associations resolved on every result.
    ///
    /// Records resolve concurrently; the adapter's order is preserved.
    pub async fn find_where(&self, conditions: &Record) -> ModelResult<Vec<Record>> {
        let records = self
            .adapter
            .find_all(self.table_name(), Some(conditions))
            .await?;

        try_join_all(records.into_iter().map(|mut record| async move {
            self.load_associations(&mut record).await?;
            Ok::<_, ModelError>(record)
        }))
        .await
    }

    /// Resolve every declared association into `record`, in declaration order
    pub async fn load_associations<'r>(&self, record: &'r mut Record) -> ModelResult<&'r mut Record> {
        relationships::load_associations(&self.schema, &*self.adapter, record).await?;
        Ok(record)
    }
}
