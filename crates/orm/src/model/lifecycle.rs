//! Validation and callback checkpoints shared by the CRUD operations

use chrono::{SecondsFormat, Utc};
use modelize_validation::ValidationErrors;
use serde_json::Value;

use crate::backends::Adapter;
use crate::error::{ModelError, ModelResult};
use crate::events::LifecycleEvent;

use super::schema::Record;
use super::Model;

pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// Current time as an ISO-8601 UTC string with millisecond precision
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl<A: Adapter + ?Sized> Model<A> {
    /// Run every rule of every constrained field against `record`.
    ///
    /// Never fails; an empty result means the record is valid.
    pub fn validate(&self, record: &Record) -> ValidationErrors {
        self.schema.validations.validate(record)
    }

    /// Validate only the fields present in `attributes`, as a partial update does
    pub fn validate_attributes(&self, attributes: &Record) -> ValidationErrors {
        self.schema.validations.validate_present(attributes)
    }

    pub(crate) fn ensure_valid(&self, errors: ValidationErrors) -> ModelResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                table = %self.schema.table_name,
                failures = errors.len(),
                "record failed validation"
            );
            Err(ModelError::Validation(errors))
        }
    }

    /// Run the callbacks registered for `event` against `record`
    pub async fn run_callbacks(&self, event: LifecycleEvent, record: &mut Record) -> ModelResult<()> {
        tracing::trace!(table = %self.schema.table_name, %event, "running callbacks");
        self.schema.callbacks.trigger(event, record).await
    }

    pub(crate) fn stamp_created(record: &mut Record) {
        let now = timestamp();
        record.insert(CREATED_AT.to_string(), Value::String(now.clone()));
        record.insert(UPDATED_AT.to_string(), Value::String(now));
    }

    pub(crate) fn stamp_updated(record: &mut Record) {
        record.insert(UPDATED_AT.to_string(), Value::String(timestamp()));
    }
}
