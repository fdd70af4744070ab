//! # Storage Traits
//!
//! This module defines the storage abstraction trait that allows different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;

/// Trait defining the key-value persistence interface the app stores its
/// state in (journal entries, session keys).
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different backends (on-disk files,
/// in-memory maps) without modification. The implementation is chosen once,
/// at process start, by the composition root and injected into the services
/// that need it.
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`; deleting an absent key is not an
    /// error
    fn remove(&self, key: &str) -> Result<()>;
}
