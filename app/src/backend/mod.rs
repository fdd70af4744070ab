//! # Backend Module
//!
//! Contains all non-UI logic for the journaling app.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: business rules for entries, the calendar, and the session
//! - **Storage**: key-value persistence (on-disk files or in-memory)
//! - **IO**: the remote API client and terminal output
//!
//! The backend is UI-agnostic: the same services could back a different
//! shell without modification.

pub mod domain;
pub mod io;
pub mod storage;

use log::info;
use std::sync::Arc;

use crate::backend::domain::{CalendarService, EntryService, EntrySubmitter, SessionService};
use crate::backend::storage::{EntryRepository, KeyValueStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub entry_service: EntryService,
    pub calendar_service: CalendarService,
    pub session_service: SessionService,
}

/// Initialize the backend with all required services.
///
/// The storage implementation and the optional remote submitter are chosen
/// by the caller; their lifecycle is owned here, not by ambient globals.
pub fn initialize_backend(
    store: Arc<dyn KeyValueStore>,
    submitter: Option<Arc<dyn EntrySubmitter>>,
) -> AppState {
    info!("Setting up domain services");
    let entry_repository = EntryRepository::new(store.clone());

    AppState {
        entry_service: EntryService::new(entry_repository, submitter),
        calendar_service: CalendarService::new(),
        session_service: SessionService::new(store),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryKeyValueStore;
    use shared::{CreateEntryRequest, EntryCategory};

    #[test]
    fn test_services_share_one_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let state = initialize_backend(store, None);

        state
            .entry_service
            .create_entry(CreateEntryRequest {
                category: EntryCategory::Rose,
                text: "wired up".to_string(),
            })
            .unwrap();

        assert_eq!(state.entry_service.list_entries().len(), 1);
        assert!(!state.session_service.is_logged_in());
    }
}
