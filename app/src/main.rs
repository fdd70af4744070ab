use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use roses_thorns_app::backend::domain::{agenda, EntrySubmitter};
use roses_thorns_app::backend::io::{render_agenda, ApiClient};
use roses_thorns_app::backend::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use roses_thorns_app::backend::initialize_backend;

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting Roses and Thorns");

    // Storage is selected once, here. If the data directory can't be set up
    // the app still runs, keeping entries in memory for this session only.
    let store: Arc<dyn KeyValueStore> = match FileKeyValueStore::new_default() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Durable storage unavailable ({e:#}), keeping entries in memory for this session");
            Arc::new(MemoryKeyValueStore::new())
        }
    };

    let submitter: Option<Arc<dyn EntrySubmitter>> = match ApiClient::from_env() {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("Remote API client unavailable, entries will not be mirrored: {e}");
            None
        }
    };

    let state = initialize_backend(store, submitter);

    if let Some(username) = state.session_service.username() {
        info!("Signed in as {username}");
    }

    let focus = state.calendar_service.get_focus_date();
    let entries = state.entry_service.list_entries();
    let calendar = state
        .calendar_service
        .generate_calendar_month(focus.year, focus.month, &entries);
    let totals = agenda::totals(&entries);

    print!(
        "{}",
        render_agenda(&state.calendar_service, &calendar, &entries, &totals)
    );

    Ok(())
}
