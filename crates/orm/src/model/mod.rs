//! Model definition and runtime
//!
//! - `builder`: fluent schema accumulation and sealing
//! - `schema`: the frozen schema and the record type
//! - `lifecycle`: validation and callback checkpoints
//! - `crud_operations`: create, update, destroy
//! - `query_methods`: lookups and association loading

pub mod builder;
pub mod crud_operations;
pub mod lifecycle;
pub mod query_methods;
pub mod schema;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use modelize_validation::FieldRules;

use crate::backends::Adapter;
use crate::observers::CallbackRegistry;
use crate::relationships::Associations;

pub use builder::ModelBuilder;
pub use schema::{FieldType, IndexDescriptor, Record, Schema};

/// A sealed model bound to a storage adapter.
///
/// The schema can only be read. Cloning is cheap and clones share the schema
/// and the adapter.
pub struct Model<A: Adapter + ?Sized = dyn Adapter> {
    schema: Arc<Schema>,
    adapter: Arc<A>,
}

impl<A: Adapter + ?Sized> Model<A> {
    pub(crate) fn from_parts(schema: Arc<Schema>, adapter: Arc<A>) -> Self {
        Self { schema, adapter }
    }

    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    pub fn table_name(&self) -> &str {
        &self.schema.table_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn get_fields(&self) -> &HashMap<String, FieldType> {
        &self.schema.fields
    }

    pub fn get_indexes(&self) -> &[IndexDescriptor] {
        &self.schema.indexes
    }

    pub fn get_validations(&self) -> &FieldRules {
        &self.schema.validations
    }

    pub fn get_callbacks(&self) -> &CallbackRegistry {
        &self.schema.callbacks
    }

    pub fn get_associations(&self) -> &Associations {
        &self.schema.associations
    }
}

impl<A: Adapter + ?Sized> Clone for Model<A> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            adapter: Arc::clone(&self.adapter),
        }
    }
}

impl<A: Adapter + ?Sized> fmt::Debug for Model<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("table_name", &self.schema.table_name)
            .field("backend", &self.adapter.backend_name())
            .finish()
    }
}
