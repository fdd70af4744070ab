//! Boundary mapping between the persisted record shape and the domain entry.

use log::warn;
use shared::{EntryCategory, EntryRecord, JournalEntry};

pub struct EntryMapper;

impl EntryMapper {
    /// Resolve a persisted record into a domain entry.
    ///
    /// The category is a closed two-value enumeration in the domain; a
    /// record carrying anything else is logged and counted as a rose, which
    /// keeps the tally rule "anything not literally thorn is a rose"
    /// explicit instead of silent.
    pub fn from_record(record: EntryRecord) -> JournalEntry {
        let category = Self::parse_category(&record.entry_type, &record.id);
        JournalEntry {
            id: record.id,
            category,
            text: record.text,
            created_at: record.created_at,
        }
    }

    pub fn to_record(entry: &JournalEntry) -> EntryRecord {
        EntryRecord {
            id: entry.id.clone(),
            entry_type: entry.category.as_str().to_string(),
            text: entry.text.clone(),
            created_at: entry.created_at.clone(),
        }
    }

    fn parse_category(raw: &str, entry_id: &str) -> EntryCategory {
        match raw {
            "rose" => EntryCategory::Rose,
            "thorn" => EntryCategory::Thorn,
            other => {
                warn!("Entry {entry_id} has unrecognized category {other:?}, treating as rose");
                EntryCategory::Rose
            }
        }
    }
}
