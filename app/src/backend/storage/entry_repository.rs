//! Repository for the persisted journal entry collection.
//!
//! Entries are stored under a single key as a JSON array of records. Reads
//! are tolerant by substitution: a missing or unparsable value loads as the
//! empty collection (with a logged warning) so the agenda view always has
//! something valid to render.

use anyhow::Result;
use log::warn;
use shared::{EntryRecord, JournalEntry};
use std::sync::Arc;

use crate::backend::domain::models::entry::EntryMapper;
use crate::backend::storage::traits::KeyValueStore;

/// Key the serialized entry collection lives under
pub const ENTRIES_KEY: &str = "entries";

#[derive(Clone)]
pub struct EntryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl EntryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted entry collection.
    ///
    /// Never fails: storage errors and malformed data both yield an empty
    /// collection, which is the documented recovery point for the agenda
    /// view.
    pub fn load_entries(&self) -> Vec<JournalEntry> {
        let raw = match self.store.get(ENTRIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read stored entries, starting empty: {e:#}");
                return Vec::new();
            }
        };

        let records: Vec<EntryRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Stored entries are not a valid JSON array, starting empty: {e}");
                return Vec::new();
            }
        };

        records.into_iter().map(EntryMapper::from_record).collect()
    }

    /// Persist the full entry collection, replacing whatever was stored
    pub fn save_entries(&self, entries: &[JournalEntry]) -> Result<()> {
        let records: Vec<EntryRecord> = entries.iter().map(EntryMapper::to_record).collect();
        let raw = serde_json::to_string(&records)?;
        self.store.set(ENTRIES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::memory::MemoryKeyValueStore;
    use shared::EntryCategory;

    fn repository_with(raw: Option<&str>) -> EntryRepository {
        let store = MemoryKeyValueStore::new();
        if let Some(raw) = raw {
            store.set(ENTRIES_KEY, raw).unwrap();
        }
        EntryRepository::new(Arc::new(store))
    }

    #[test]
    fn test_missing_value_loads_as_empty() {
        let repository = repository_with(None);
        assert!(repository.load_entries().is_empty());
    }

    #[test]
    fn test_malformed_json_loads_as_empty() {
        let repository = repository_with(Some("{not json"));
        assert!(repository.load_entries().is_empty());
    }

    #[test]
    fn test_non_array_json_loads_as_empty() {
        let repository = repository_with(Some("{\"id\":\"entry::rose::1\"}"));
        assert!(repository.load_entries().is_empty());
    }

    #[test]
    fn test_loads_persisted_wire_shape() {
        let raw = r#"[
            {"id":"entry::rose::1702516122000","type":"rose","text":"Sunny walk","createdAt":"2023-12-14T01:02:02+01:00"},
            {"id":"entry::thorn::1702516125000","type":"thorn","text":"Missed the bus","createdAt":"2023-12-14T01:02:05+01:00"}
        ]"#;
        let repository = repository_with(Some(raw));

        let entries = repository.load_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, EntryCategory::Rose);
        assert_eq!(entries[0].text, "Sunny walk");
        assert_eq!(entries[1].category, EntryCategory::Thorn);
    }

    #[test]
    fn test_unknown_category_folds_to_rose() {
        let raw = r#"[{"id":"entry::rose::1","type":"daisy","text":"??","createdAt":"2023-12-14T01:02:02+01:00"}]"#;
        let repository = repository_with(Some(raw));

        let entries = repository.load_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, EntryCategory::Rose);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let repository = repository_with(None);
        let entries = vec![JournalEntry {
            id: "entry::thorn::1702516125000".to_string(),
            category: EntryCategory::Thorn,
            text: "Missed the bus".to_string(),
            created_at: "2023-12-14T01:02:05+01:00".to_string(),
        }];

        repository.save_entries(&entries).unwrap();
        assert_eq!(repository.load_entries(), entries);
    }

    #[test]
    fn test_save_writes_wire_field_names() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repository = EntryRepository::new(store.clone());
        repository
            .save_entries(&[JournalEntry {
                id: "entry::rose::1".to_string(),
                category: EntryCategory::Rose,
                text: "Sunny walk".to_string(),
                created_at: "2023-12-14T01:02:02+01:00".to_string(),
            }])
            .unwrap();

        let raw = store.get(ENTRIES_KEY).unwrap().unwrap();
        assert!(raw.contains("\"type\":\"rose\""));
        assert!(raw.contains("\"createdAt\""));
        assert!(!raw.contains("\"category\""));
    }
}
