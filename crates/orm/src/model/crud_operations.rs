//! Create, update and destroy
//!
//! Every step of an operation runs strictly after the previous one. Callback
//! and validation failures happen before any adapter write, except for
//! `afterDestroy`, which runs once the record is already gone.

use crate::backends::Adapter;
use crate::error::{ModelError, ModelResult};
use crate::events::LifecycleEvent;

use super::schema::Record;
use super::Model;

impl<A: Adapter + ?Sized> Model<A> {
    /// Validate and persist a new record.
    ///
    /// `beforeCreate` → `beforeSave` → validation → timestamps → adapter
    /// create → `afterCreate` → `afterSave`.
    pub async fn create(&self, mut record: Record) -> ModelResult<Record> {
        let table = self.table_name();

        self.run_callbacks(LifecycleEvent::BeforeCreate, &mut record)
            .await?;
        self.run_callbacks(LifecycleEvent::BeforeSave, &mut record)
            .await?;
        self.ensure_valid(self.validate(&record))?;
        Self::stamp_created(&mut record);

        let mut created = self.adapter.create(table, record).await?;
        tracing::debug!(
            table,
            id = created.get("id").and_then(|v| v.as_str()).unwrap_or_default(),
            "created record"
        );

        self.run_callbacks(LifecycleEvent::AfterCreate, &mut created)
            .await?;
        self.run_callbacks(LifecycleEvent::AfterSave, &mut created)
            .await?;
        Ok(created)
    }

    /// Validate and merge `attributes` into the record `id`.
    ///
    /// Only the submitted attributes are validated, so a partial update only
    /// checks the fields it carries.
    pub async fn update(&self, id: &str, mut attributes: Record) -> ModelResult<Record> {
        let table = self.table_name();

        self.run_callbacks(LifecycleEvent::BeforeUpdate, &mut attributes)
            .await?;
        self.run_callbacks(LifecycleEvent::BeforeSave, &mut attributes)
            .await?;
        self.ensure_valid(self.validate_attributes(&attributes))?;
        Self::stamp_updated(&mut attributes);

        let mut updated = self
            .adapter
            .update(table, id, attributes)
            .await?
            .ok_or_else(|| ModelError::not_found(table, id))?;
        tracing::debug!(table, id, "updated record");

        self.run_callbacks(LifecycleEvent::AfterUpdate, &mut updated)
            .await?;
        self.run_callbacks(LifecycleEvent::AfterSave, &mut updated)
            .await?;
        Ok(updated)
    }

    /// Delete the record `id`, returning the adapter's success flag.
    ///
    /// Fails with not-found before touching the adapter when the record does
    /// not exist. `afterDestroy` receives the record as it was fetched; a halt
    /// there does not undo the deletion.
    pub async fn destroy(&self, id: &str) -> ModelResult<bool> {
        let table = self.table_name();
        let mut record = self.find_by_id(id).await?;

        self.run_callbacks(LifecycleEvent::BeforeDestroy, &mut record)
            .await?;
        let destroyed = self.adapter.destroy(table, id).await?;
        tracing::debug!(table, id, destroyed, "destroyed record");

        self.run_callbacks(LifecycleEvent::AfterDestroy, &mut record)
            .await?;
        Ok(destroyed)
    }
}
