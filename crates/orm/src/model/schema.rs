//! Sealed schema of a model

use std::collections::HashMap;
use std::fmt;

use modelize_validation::FieldRules;
use serde::{Deserialize, Serialize};

use crate::observers::CallbackRegistry;
use crate::relationships::{inference, Association, Associations};

/// A stored record: a flat JSON object
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Declared primitive type of a field. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Map,
    List,
    Binary,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Map => "map",
            FieldType::List => "list",
            FieldType::Binary => "binary",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary index descriptor, passed through untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDescriptor {
    pub name: String,
    pub hash_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
}

impl IndexDescriptor {
    pub fn new(name: impl Into<String>, hash_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash_key: hash_key.into(),
            range_key: None,
        }
    }

    pub fn range_key(mut self, range_key: impl Into<String>) -> Self {
        self.range_key = Some(range_key.into());
        self
    }
}

/// Everything a builder accumulated, frozen at seal time
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) table_name: String,
    pub(crate) singular_name: String,
    pub(crate) fields: HashMap<String, FieldType>,
    pub(crate) indexes: Vec<IndexDescriptor>,
    pub(crate) validations: FieldRules,
    pub(crate) callbacks: CallbackRegistry,
    pub(crate) associations: Associations,
}

impl Schema {
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Singular owner name used for `has_many`/`has_one` foreign keys
    pub fn singular_name(&self) -> &str {
        &self.singular_name
    }

    /// Effective foreign key of a declared association
    pub fn foreign_key(&self, association_name: &str, association: &Association) -> String {
        inference::resolve_foreign_key(association_name, association, &self.singular_name)
    }
}
