//! # modelize-orm: model definitions over key-value stores
//!
//! A [`ModelBuilder`] accumulates a schema (fields, indexes, validations,
//! lifecycle callbacks, associations) and seals it into an immutable
//! [`Model`]. The model runs callbacks and validation around every write and
//! delegates storage to an [`Adapter`].

pub mod backends;
pub mod error;
pub mod event_error;
pub mod events;
pub mod mock;
pub mod model;
pub mod observers;
pub mod relationships;

// Re-export core traits and types
pub use backends::{Adapter, MemoryAdapter, MemoryAdapterConfig, MemoryAdapterConfigBuilder};
pub use error::{AdapterError, AdapterResult, ErrorKind, ModelError, ModelResult};
pub use event_error::EventError;
pub use events::{CallbackOutcome, FnCallback, LifecycleEvent, ModelCallback};
pub use model::{FieldType, IndexDescriptor, Model, ModelBuilder, Record, Schema};
pub use observers::{CallbackRegistry, SharedCallback};
pub use relationships::{Association, AssociationKind, Associations};

pub use modelize_validation as validation;
