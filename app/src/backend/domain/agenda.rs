//! Entry aggregation for the agenda view.
//!
//! Two independent computations over the loaded entry collection: per-day
//! marker colors for the viewed month, and whole-collection category tallies
//! for the rose/thorn bars. Both are pure functions re-run on every view
//! change; neither depends on the order entries arrive in.

use chrono::{DateTime, Datelike, Local};
use shared::{CategoryTotals, EntryCategory, JournalEntry, MarkerColor};
use std::collections::BTreeMap;

/// How many markers the agenda shows per day. The aggregation itself is
/// unbounded; consumers apply this cap at render time.
pub const MAX_DAY_MARKERS: usize = 3;

/// Group marker colors by day-of-month for entries created in the given
/// month.
///
/// `month` is zero-indexed (0 = January). Entries outside the viewed
/// month/year are excluded entirely, as are entries whose timestamp does not
/// parse. Marker order within a day follows the order entries appear in the
/// collection.
pub fn markers_by_day(
    entries: &[JournalEntry],
    year: i32,
    month: u32,
) -> BTreeMap<u32, Vec<MarkerColor>> {
    let mut markers: BTreeMap<u32, Vec<MarkerColor>> = BTreeMap::new();

    for entry in entries {
        if let Some((entry_year, entry_month, day)) = local_calendar_date(&entry.created_at) {
            if entry_year == year && entry_month == month {
                markers
                    .entry(day)
                    .or_default()
                    .push(entry.category.marker_color());
            }
        }
    }

    markers
}

/// Count roses and thorns across the entire collection.
///
/// Never scoped to the viewed month, so the tally stays put while the user
/// pages through the calendar.
pub fn totals(entries: &[JournalEntry]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for entry in entries {
        match entry.category {
            EntryCategory::Rose => totals.rose += 1,
            EntryCategory::Thorn => totals.thorn += 1,
        }
    }

    totals
}

/// Interpret an RFC 3339 timestamp as a calendar date in the device-local
/// zone, returning (year, zero-indexed month, day).
///
/// Day bucketing deliberately uses the local zone: a note written at 23:30
/// belongs to the day the user experienced, not to whatever day it was in
/// UTC.
fn local_calendar_date(created_at: &str) -> Option<(i32, u32, u32)> {
    let date = DateTime::parse_from_rfc3339(created_at).ok()?;
    let local = date.with_timezone(&Local);
    Some((local.year(), local.month0(), local.day()))
}
