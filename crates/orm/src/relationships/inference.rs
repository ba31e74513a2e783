//! Foreign key naming conventions
//!
//! - `has_many` / `has_one`: the key lives on the related records and is named
//!   after the owner, `{owner_singular}_id`.
//! - `belongs_to`: the key lives on the owning record and is named after the
//!   association, `{association_name}_id`.
//!
//! The owner's singular name defaults to the table name minus its last
//! character (`users` → `user`). That is wrong for irregular plurals
//! (`people`, `categories`), so a model can override it.

use super::types::{Association, AssociationKind};

/// Naive singularization: drop the trailing character
pub fn singularize(table_name: &str) -> String {
    let mut chars = table_name.chars();
    chars.next_back();
    chars.as_str().to_string()
}

/// Foreign key the related collection uses to point at the owner
pub fn owner_foreign_key(owner_singular: &str) -> String {
    format!("{}_id", owner_singular)
}

/// Foreign key a `belongs_to` owner uses to point at its parent
pub fn belongs_to_foreign_key(association_name: &str) -> String {
    format!("{}_id", association_name)
}

/// The effective foreign key of `association`: its explicit override, or the
/// convention for its kind.
pub fn resolve_foreign_key(
    association_name: &str,
    association: &Association,
    owner_singular: &str,
) -> String {
    if let Some(ref foreign_key) = association.foreign_key {
        return foreign_key.clone();
    }

    match association.kind {
        AssociationKind::HasMany | AssociationKind::HasOne => owner_foreign_key(owner_singular),
        AssociationKind::BelongsTo => belongs_to_foreign_key(association_name),
    }
}
