//! Journal entry service: loading, ordering, and creating entries.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use log::warn;
use shared::{CreateEntryRequest, JournalEntry};
use std::cmp::Reverse;
use std::sync::Arc;

use crate::backend::storage::EntryRepository;

/// Most recent entries kept locally; older ones fall off the end
pub const MAX_RETAINED_ENTRIES: usize = 50;

/// Seam for mirroring a newly created entry to the remote API.
///
/// Mirroring is best-effort: the entry is already saved locally by the time
/// the submitter runs, and a remote failure never rolls that back. A missed
/// note hurts more than a missed upload.
pub trait EntrySubmitter: Send + Sync {
    fn submit_entry(&self, entry: &JournalEntry) -> Result<()>;
}

#[derive(Clone)]
pub struct EntryService {
    repository: EntryRepository,
    submitter: Option<Arc<dyn EntrySubmitter>>,
}

impl EntryService {
    pub fn new(repository: EntryRepository, submitter: Option<Arc<dyn EntrySubmitter>>) -> Self {
        Self {
            repository,
            submitter,
        }
    }

    /// Load the entry collection, newest first.
    ///
    /// The grid and aggregation logic don't care about order, but the entry
    /// list and any "most recent N" truncation do.
    pub fn list_entries(&self) -> Vec<JournalEntry> {
        let mut entries = self.repository.load_entries();
        entries.sort_by_key(|entry| Reverse(created_at_millis(entry)));
        entries
    }

    /// Create a new entry: trim and validate the text, stamp an id and a
    /// local-zone timestamp, prepend it to the collection, cap the retained
    /// count, persist, then mirror to the remote API if one is configured.
    pub fn create_entry(&self, request: CreateEntryRequest) -> Result<JournalEntry> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(anyhow!("Entry text must not be empty"));
        }

        let now = Local::now();
        let entry = JournalEntry {
            id: JournalEntry::generate_id(request.category, now.timestamp_millis() as u64),
            category: request.category,
            text: text.to_string(),
            created_at: now.to_rfc3339(),
        };

        let mut entries = self.repository.load_entries();
        entries.insert(0, entry.clone());
        entries.truncate(MAX_RETAINED_ENTRIES);
        self.repository.save_entries(&entries)?;

        if let Some(submitter) = &self.submitter {
            if let Err(e) = submitter.submit_entry(&entry) {
                warn!("Failed to mirror entry {} to the remote API: {e:#}", entry.id);
            }
        }

        Ok(entry)
    }
}

/// Creation timestamp in epoch millis, for ordering. Entries with an
/// unparsable timestamp sort to the end.
fn created_at_millis(entry: &JournalEntry) -> i64 {
    DateTime::parse_from_rfc3339(&entry.created_at)
        .map(|date| date.timestamp_millis())
        .unwrap_or(i64::MIN)
}
