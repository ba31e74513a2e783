//! In-memory adapter configuration

use serde::{Deserialize, Serialize};
use service_builder::builder;

/// Configuration for [`super::MemoryAdapter`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[builder]
pub struct MemoryAdapterConfig {
    /// How many leading characters of the collection name prefix generated ids
    #[builder(default = "3", getter)]
    pub id_prefix_len: usize,

    /// Separator between the prefix and the random part of an id
    #[builder(default = "\"_\".to_string()", getter)]
    pub id_separator: String,
}

impl Default for MemoryAdapterConfig {
    fn default() -> Self {
        Self {
            id_prefix_len: 3,
            id_separator: "_".to_string(),
        }
    }
}

impl MemoryAdapterConfig {
    /// Id prefix for `collection`: its first characters, lowercased
    pub fn id_prefix(&self, collection: &str) -> String {
        collection
            .chars()
            .take(self.id_prefix_len)
            .collect::<String>()
            .to_lowercase()
    }

    /// Full id for a record of `collection` with the given unique part
    pub fn format_id(&self, collection: &str, unique: impl std::fmt::Display) -> String {
        format!("{}{}{}", self.id_prefix(collection), self.id_separator, unique)
    }
}

impl MemoryAdapterConfigBuilder {
    /// Configuration for tests: unprefixed ids
    pub fn testing() -> Self {
        MemoryAdapterConfigBuilder::new()
            .id_prefix_len(0)
            .id_separator(String::new())
    }
}
