//! In-memory storage adapter

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use super::config::MemoryAdapterConfig;
use super::core::{matches_filter, Adapter};
use crate::error::{AdapterError, AdapterResult};
use crate::model::Record;

/// Records of one collection in insertion order
type Collection = Arc<RwLock<Vec<Record>>>;

/// Adapter keeping every collection in process memory.
///
/// Scans return records in insertion order. Ids look like `pro_3f2a…` for a
/// `products` collection under the default configuration.
pub struct MemoryAdapter {
    collections: DashMap<String, Collection>,
    config: MemoryAdapterConfig,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::with_config(MemoryAdapterConfig::default())
    }

    pub fn with_config(config: MemoryAdapterConfig) -> Self {
        Self {
            collections: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &MemoryAdapterConfig {
        &self.config
    }

    /// Number of records stored in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|records| records.read().len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Drop every collection
    pub fn clear(&self) {
        self.collections.clear();
    }

    fn collection(&self, name: &str) -> Collection {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(Vec::new())))
            .clone()
    }

    fn existing(&self, name: &str) -> Option<Collection> {
        self.collections.get(name).map(|entry| entry.clone())
    }

    fn generate_id(&self, collection: &str) -> String {
        self.config
            .format_id(collection, Uuid::new_v4().simple())
    }
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

#[async_trait]
impl Adapter for MemoryAdapter {
    async fn create(&self, collection: &str, attributes: Record) -> AdapterResult<Record> {
        if collection.is_empty() {
            return Err(AdapterError::UnknownCollection(String::new()));
        }

        let id = self.generate_id(collection);
        let mut record = attributes;
        record.insert("id".to_string(), Value::String(id.clone()));

        self.collection(collection).write().push(record.clone());
        tracing::trace!(collection, %id, "memory adapter stored record");
        Ok(record)
    }

    async fn find_all(
        &self,
        collection: &str,
        filter: Option<&Record>,
    ) -> AdapterResult<Vec<Record>> {
        let records = match self.existing(collection) {
            Some(records) => records,
            None => return Ok(Vec::new()),
        };

        let records = records.read();
        let found = match filter {
            Some(filter) => records
                .iter()
                .filter(|record| matches_filter(record, filter))
                .cloned()
                .collect(),
            None => records.clone(),
        };
        Ok(found)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> AdapterResult<Option<Record>> {
        Ok(self.existing(collection).and_then(|records| {
            records
                .read()
                .iter()
                .find(|record| record_id(record) == Some(id))
                .cloned()
        }))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        attributes: Record,
    ) -> AdapterResult<Option<Record>> {
        let records = match self.existing(collection) {
            Some(records) => records,
            None => return Ok(None),
        };

        let mut records = records.write();
        let existing = match records.iter_mut().find(|record| record_id(record) == Some(id)) {
            Some(existing) => existing,
            None => return Ok(None),
        };

        for (key, value) in attributes {
            if key != "id" {
                existing.insert(key, value);
            }
        }
        Ok(Some(existing.clone()))
    }

    async fn destroy(&self, collection: &str, id: &str) -> AdapterResult<bool> {
        let records = match self.existing(collection) {
            Some(records) => records,
            None => return Ok(false),
        };

        let mut records = records.write();
        let before = records.len();
        records.retain(|record| record_id(record) != Some(id));
        Ok(records.len() < before)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::config::MemoryAdapterConfigBuilder;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_prefixed_id_and_keeps_fields() {
        let adapter = MemoryAdapter::new();
        let created = adapter
            .create("Products", record(json!({"name": "Hammer", "price": 9.5})))
            .await
            .unwrap();

        let id = created["id"].as_str().unwrap();
        assert!(id.starts_with("pro_"));
        assert_eq!(id.len(), "pro_".len() + 32);
        assert_eq!(created["name"], json!("Hammer"));
        assert_eq!(created["price"], json!(9.5));
        assert_eq!(adapter.len("Products"), 1);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let adapter = MemoryAdapter::new();
        let first = adapter.create("users", Record::new()).await.unwrap();
        let second = adapter.create("users", Record::new()).await.unwrap();
        assert_ne!(first["id"], second["id"]);
    }

    #[tokio::test]
    async fn test_configured_id_format() {
        let config = MemoryAdapterConfigBuilder::testing().build().unwrap();
        let adapter = MemoryAdapter::with_config(config);
        let created = adapter.create("users", Record::new()).await.unwrap();
        assert_eq!(created["id"].as_str().unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_find_all_filters_exactly_in_insertion_order() {
        let adapter = MemoryAdapter::new();
        for (name, category) in [("a", "tools"), ("b", "garden"), ("c", "tools")] {
            adapter
                .create("products", record(json!({"name": name, "category": category})))
                .await
                .unwrap();
        }

        let all = adapter.find_all("products", None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filter = record(json!({"category": "tools"}));
        let tools = adapter.find_all("products", Some(&filter)).await.unwrap();
        let names: Vec<_> = tools.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("c")]);

        assert!(adapter.find_all("unknown", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let adapter = MemoryAdapter::new();
        assert!(adapter.find_by_id("products", "nope").await.unwrap().is_none());

        let created = adapter.create("products", Record::new()).await.unwrap();
        let id = created["id"].as_str().unwrap();
        assert_eq!(
            adapter.find_by_id("products", id).await.unwrap(),
            Some(created.clone())
        );
    }

    #[tokio::test]
    async fn test_update_merges_attributes() {
        let adapter = MemoryAdapter::new();
        let created = adapter
            .create("products", record(json!({"name": "Saw", "stock": 1})))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let updated = adapter
            .update("products", &id, record(json!({"stock": 4, "id": "hijack"})))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated["name"], json!("Saw"));
        assert_eq!(updated["stock"], json!(4));
        assert_eq!(updated["id"], json!(id));

        assert!(adapter
            .update("products", "missing", Record::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_destroy_reports_existence() {
        let adapter = MemoryAdapter::new();
        let created = adapter.create("products", Record::new()).await.unwrap();
        let id = created["id"].as_str().unwrap();

        assert!(adapter.destroy("products", id).await.unwrap());
        assert!(!adapter.destroy("products", id).await.unwrap());
        assert!(!adapter.destroy("other", id).await.unwrap());
        assert!(adapter.is_empty("products"));
    }
}
