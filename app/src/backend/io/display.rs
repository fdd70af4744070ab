//! Terminal rendering for the agenda view.
//!
//! Deliberately thin: all computation happens in the domain layer, and this
//! module only turns the results into text. Marker dots render as `*` for
//! pink (rose) and `+` for green (thorn), capped per day the same way the
//! calendar screen caps its dots.

use shared::{CalendarDayType, CalendarMonth, CategoryTotals, JournalEntry, MarkerColor};

use crate::backend::domain::agenda::MAX_DAY_MARKERS;
use crate::backend::domain::CalendarService;

const CELL_WIDTH: usize = 5;
const BAR_TRACK_CHARS: usize = 20;

/// Render the full agenda: month header, weekday row, grid with markers,
/// entry list, and the rose/thorn tally bars.
pub fn render_agenda(
    calendar_service: &CalendarService,
    calendar: &CalendarMonth,
    entries: &[JournalEntry],
    totals: &CategoryTotals,
) -> String {
    let mut out = String::new();

    let label = calendar_service
        .month_label(calendar.year, calendar.month)
        .to_uppercase();
    out.push_str(&format!("{label}\n"));

    for initial in ["M", "T", "W", "T", "F", "S", "S"] {
        out.push_str(&format!("{initial:<width$}", width = CELL_WIDTH));
    }
    out.push('\n');

    for week in calendar.days.chunks(7) {
        // Day numbers
        for cell in week {
            match cell.day_type {
                CalendarDayType::MonthDay => {
                    out.push_str(&format!("{:<width$}", cell.day, width = CELL_WIDTH))
                }
                _ => out.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        out.push('\n');

        // Marker dots underneath, capped per day
        for cell in week {
            let dots: String = cell
                .markers
                .iter()
                .take(MAX_DAY_MARKERS)
                .map(|marker| match marker {
                    MarkerColor::Pink => '*',
                    MarkerColor::Green => '+',
                })
                .collect();
            out.push_str(&format!("{dots:<width$}", width = CELL_WIDTH));
        }
        out.push('\n');
    }

    out.push('\n');
    if entries.is_empty() {
        out.push_str("No roses or thorns saved yet.\n");
    } else {
        for entry in entries {
            out.push_str(&format!(
                "{:<8} [{}] {}\n",
                calendar_service.format_entry_date(&entry.created_at),
                entry.category.label(),
                entry.text
            ));
        }
    }

    out.push('\n');
    out.push_str(&tally_line("Roses", totals.rose, totals.rose_width_percent()));
    out.push_str(&tally_line(
        "Thorns",
        totals.thorn,
        totals.thorn_width_percent(),
    ));

    out
}

fn tally_line(label: &str, count: u32, width_percent: f64) -> String {
    let filled = ((width_percent / 100.0) * BAR_TRACK_CHARS as f64).round() as usize;
    format!(
        "{label:<7} {:<track$} {count}\n",
        "#".repeat(filled.min(BAR_TRACK_CHARS)),
        track = BAR_TRACK_CHARS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::EntryCategory;

    fn entry(category: EntryCategory, day: u32) -> JournalEntry {
        let created_at = chrono::Local
            .with_ymd_and_hms(2025, 9, day, 12, 0, 0)
            .unwrap()
            .to_rfc3339();
        JournalEntry {
            id: JournalEntry::generate_id(category, day as u64),
            category,
            text: format!("note on day {day}"),
            created_at,
        }
    }

    #[test]
    fn test_render_shows_month_days_and_entries() {
        let service = CalendarService::new();
        let entries = vec![entry(EntryCategory::Rose, 15), entry(EntryCategory::Thorn, 3)];
        let calendar = service.generate_calendar_month(2025, 8, &entries);
        let totals = crate::backend::domain::agenda::totals(&entries);

        let rendered = render_agenda(&service, &calendar, &entries, &totals);

        assert!(rendered.contains("SEPTEMBER 2025"));
        assert!(rendered.contains("30"));
        assert!(rendered.contains("[Rose] note on day 15"));
        assert!(rendered.contains("[Thorn] note on day 3"));
        assert!(rendered.contains("Roses"));
        assert!(rendered.contains("Thorns"));
    }

    #[test]
    fn test_render_empty_state() {
        let service = CalendarService::new();
        let calendar = service.generate_calendar_month(2025, 8, &[]);
        let totals = CategoryTotals::default();

        let rendered = render_agenda(&service, &calendar, &[], &totals);

        assert!(rendered.contains("No roses or thorns saved yet."));
        // Both bars render the minimum stub rather than disappearing
        let stub = ((18.0 / 100.0) * BAR_TRACK_CHARS as f64).round() as usize;
        assert!(rendered.contains(&"#".repeat(stub)));
    }

    #[test]
    fn test_marker_dots_are_capped_per_day() {
        let service = CalendarService::new();
        let entries: Vec<JournalEntry> =
            (0..5).map(|_| entry(EntryCategory::Rose, 15)).collect();
        let calendar = service.generate_calendar_month(2025, 8, &entries);
        let totals = crate::backend::domain::agenda::totals(&entries);

        let rendered = render_agenda(&service, &calendar, &entries, &totals);

        assert!(rendered.contains("***"));
        assert!(!rendered.contains("****"));
    }
}
