//! Association descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three supported association shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// Related records point at the owner; resolves to an array
    HasMany,
    /// The owner points at a related record; resolves to one record or null
    BelongsTo,
    /// Related records point at the owner; resolves to the first match or null
    HasOne,
}

impl AssociationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationKind::HasMany => "has_many",
            AssociationKind::BelongsTo => "belongs_to",
            AssociationKind::HasOne => "has_one",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared association.
///
/// `foreign_key` is `None` when the naming convention applies; see
/// [`super::inference`] for the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    #[serde(rename = "type")]
    pub kind: AssociationKind,
    pub target_collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
}

impl Association {
    pub fn new(kind: AssociationKind, target_collection: impl Into<String>) -> Self {
        Self {
            kind,
            target_collection: target_collection.into(),
            foreign_key: None,
        }
    }

    pub fn has_many(target_collection: impl Into<String>) -> Self {
        Self::new(AssociationKind::HasMany, target_collection)
    }

    pub fn belongs_to(target_collection: impl Into<String>) -> Self {
        Self::new(AssociationKind::BelongsTo, target_collection)
    }

    pub fn has_one(target_collection: impl Into<String>) -> Self {
        Self::new(AssociationKind::HasOne, target_collection)
    }

    /// Override the conventional foreign key
    pub fn foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }
}

/// Associations in declaration order; redeclaring a name replaces it in place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Associations {
    entries: Vec<(String, Association)>,
}

impl Associations {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, association: Association) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = association,
            None => self.entries.push((name, association)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Association> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, association)| association)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Association)> {
        self.entries
            .iter()
            .map(|(name, association)| (name.as_str(), association))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
