//! # Storage Module
//!
//! Handles all data persistence for the journaling app.
//!
//! Persistence is a plain key-value interface: journal entries live under a
//! single key as a JSON array, session state under a handful of string keys.
//! The backing implementation is chosen once at process start — on-disk files
//! when a data directory is available, an in-memory map otherwise — and
//! injected into the services that need it. Nothing in here is ambient or
//! global.

pub mod entry_repository;
pub mod file;
pub mod memory;
pub mod traits;

pub use entry_repository::{EntryRepository, ENTRIES_KEY};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
