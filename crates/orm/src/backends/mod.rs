//! Storage adapters
//!
//! [`Adapter`] is the contract every model delegates to. [`MemoryAdapter`] is
//! the bundled implementation; other stores plug in by implementing the trait.

pub mod config;
pub mod core;
pub mod memory;

pub use config::{MemoryAdapterConfig, MemoryAdapterConfigBuilder};
pub use core::{matches_filter, Adapter};
pub use memory::MemoryAdapter;
