//! # Recording adapter for tests
//!
//! [`MockAdapter`] implements [`Adapter`] in memory and records every call it
//! receives, so tests can assert on exactly which storage operations a model
//! performed (or skipped).
//!
//! ```rust
//! use modelize_orm::mock::{AdapterCall, MockAdapter};
//! use modelize_orm::ModelBuilder;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let adapter = Arc::new(MockAdapter::new());
//! adapter.seed("posts", json!({"id": "p1", "user_id": "1"}));
//!
//! let users = ModelBuilder::new()
//!     .table_name("users")
//!     .has_many("posts", "posts")
//!     .seal(adapter.clone())
//!     .unwrap();
//!
//! let mut record = json!({"id": "1"}).as_object().cloned().unwrap();
//! users.load_associations(&mut record).await.unwrap();
//!
//! assert_eq!(
//!     adapter.calls(),
//!     vec![AdapterCall::find_all("posts", Some(json!({"user_id": "1"})))]
//! );
//! # }
//! ```
//!
//! Ids are handed out sequentially (`"1"`, `"2"`, ...) across all
//! collections. [`MockAdapter::fail_with`] makes every later call fail.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::backends::{matches_filter, Adapter};
use crate::error::{AdapterError, AdapterResult};
use crate::model::Record;

/// One call received by a [`MockAdapter`]
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterCall {
    Create {
        collection: String,
        attributes: Record,
    },
    FindAll {
        collection: String,
        filter: Option<Record>,
    },
    FindById {
        collection: String,
        id: String,
    },
    Update {
        collection: String,
        id: String,
        attributes: Record,
    },
    Destroy {
        collection: String,
        id: String,
    },
}

impl AdapterCall {
    /// Expected `find_all` call; `filter` must be a JSON object or `None`
    pub fn find_all(collection: &str, filter: Option<Value>) -> Self {
        AdapterCall::FindAll {
            collection: collection.to_string(),
            filter: filter.and_then(|value| value.as_object().cloned()),
        }
    }

    pub fn find_by_id(collection: &str, id: &str) -> Self {
        AdapterCall::FindById {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn destroy(collection: &str, id: &str) -> Self {
        AdapterCall::Destroy {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    /// Short operation name, handy for asserting call sequences
    pub fn operation(&self) -> &'static str {
        match self {
            AdapterCall::Create { .. } => "create",
            AdapterCall::FindAll { .. } => "find_all",
            AdapterCall::FindById { .. } => "find_by_id",
            AdapterCall::Update { .. } => "update",
            AdapterCall::Destroy { .. } => "destroy",
        }
    }
}

/// In-memory adapter that records its calls
#[derive(Default)]
pub struct MockAdapter {
    calls: Mutex<Vec<AdapterCall>>,
    records: Mutex<HashMap<String, Vec<Record>>>,
    next_id: Mutex<u64>,
    failure: Mutex<Option<AdapterError>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` as-is, bypassing call recording. Non-objects are ignored.
    pub fn seed(&self, collection: &str, record: Value) {
        if let Value::Object(record) = record {
            self.records
                .lock()
                .entry(collection.to_string())
                .or_default()
                .push(record);
        }
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: AdapterError) {
        *self.failure.lock() = Some(error);
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<AdapterCall> {
        self.calls.lock().clone()
    }

    /// Operation names of the calls received so far
    pub fn operations(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(AdapterCall::operation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Records currently stored in `collection`
    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.records
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn record_call(&self, call: AdapterCall) -> AdapterResult<()> {
        self.calls.lock().push(call);
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn has_id(record: &Record, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl Adapter for MockAdapter {
    async fn create(&self, collection: &str, attributes: Record) -> AdapterResult<Record> {
        self.record_call(AdapterCall::Create {
            collection: collection.to_string(),
            attributes: attributes.clone(),
        })?;

        let id = {
            let mut next_id = self.next_id.lock();
            *next_id += 1;
            next_id.to_string()
        };
        let mut record = attributes;
        record.insert("id".to_string(), Value::String(id));
        self.records
            .lock()
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn find_all(
        &self,
        collection: &str,
        filter: Option<&Record>,
    ) -> AdapterResult<Vec<Record>> {
        self.record_call(AdapterCall::FindAll {
            collection: collection.to_string(),
            filter: filter.cloned(),
        })?;

        Ok(self
            .records(collection)
            .into_iter()
            .filter(|record| filter.map_or(true, |filter| matches_filter(record, filter)))
            .collect())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> AdapterResult<Option<Record>> {
        self.record_call(AdapterCall::find_by_id(collection, id))?;
        Ok(self
            .records(collection)
            .into_iter()
            .find(|record| has_id(record, id)))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        attributes: Record,
    ) -> AdapterResult<Option<Record>> {
        self.record_call(AdapterCall::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            attributes: attributes.clone(),
        })?;

        let mut records = self.records.lock();
        let existing = records
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|record| has_id(record, id)));
        Ok(existing.map(|existing| {
            existing.extend(attributes.into_iter().filter(|(key, _)| key != "id"));
            existing.clone()
        }))
    }

    async fn destroy(&self, collection: &str, id: &str) -> AdapterResult<bool> {
        self.record_call(AdapterCall::destroy(collection, id))?;

        let mut records = self.records.lock();
        Ok(match records.get_mut(collection) {
            Some(records) => {
                let before = records.len();
                records.retain(|record| !has_id(record, id));
                records.len() < before
            }
            None => false,
        })
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
