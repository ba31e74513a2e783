//! Associations between models: declaration, key conventions, resolution

pub mod inference;
pub mod loader;
pub mod types;

pub use loader::load_associations;
pub use types::{Association, AssociationKind, Associations};
