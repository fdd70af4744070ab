//! Calendar domain logic for the journaling app.
//!
//! This module contains all business logic related to calendar operations:
//! month grid generation, date calculations, and calendar navigation. The UI
//! only handles presentation concerns; every computation lives here.
//!
//! Months are zero-indexed throughout (0 = January), matching the persisted
//! data this app has always worked with. The grid is Monday-first; that is a
//! fixed design choice, not a configuration knob.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use log::debug;
use shared::{CalendarDay, CalendarDayType, CalendarFocusDate, CalendarMonth, JournalEntry};
use std::sync::{Arc, Mutex};

use crate::backend::domain::agenda;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Short forms as shown on entry cards. "Sept", not "Sep".
const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Calendar service that handles all calendar-related business logic
#[derive(Clone)]
pub struct CalendarService {
    /// Current focus date for calendar navigation (month/year only).
    /// Kept in memory and never persisted.
    current_focus_date: Arc<Mutex<CalendarFocusDate>>,
}

impl CalendarService {
    pub fn new() -> Self {
        Self {
            current_focus_date: Arc::new(Mutex::new(CalendarFocusDate::default())),
        }
    }

    /// Build the Monday-first grid for a month: leading blanks, one cell per
    /// day, trailing blanks until the length is a multiple of seven.
    ///
    /// `month` is zero-indexed (0 = January). Pure function; identical
    /// inputs always produce an identical grid.
    pub fn build_month_grid(&self, year: i32, month: u32) -> Vec<Option<u32>> {
        let leading = self.first_weekday_offset(year, month);
        let days_in_month = self.days_in_month(year, month);

        let mut grid: Vec<Option<u32>> = Vec::with_capacity(42);
        for _ in 0..leading {
            grid.push(None);
        }
        for day in 1..=days_in_month {
            grid.push(Some(day));
        }
        while grid.len() % 7 != 0 {
            grid.push(None);
        }
        grid
    }

    /// Generate a calendar month view with entry markers attached to each day
    pub fn generate_calendar_month(
        &self,
        year: i32,
        month: u32,
        entries: &[JournalEntry],
    ) -> CalendarMonth {
        let leading = self.first_weekday_offset(year, month);
        let days_in_month = self.days_in_month(year, month);
        let mut markers_by_day = agenda::markers_by_day(entries, year, month);

        debug!(
            "Generating calendar for {}/{year}: {days_in_month} days, {leading} leading blanks",
            month + 1
        );

        let mut days = Vec::with_capacity(42);

        for _ in 0..leading {
            days.push(CalendarDay {
                day: 0,
                day_type: CalendarDayType::PaddingBefore,
                markers: Vec::new(),
            });
        }

        for day in 1..=days_in_month {
            days.push(CalendarDay {
                day,
                day_type: CalendarDayType::MonthDay,
                markers: markers_by_day.remove(&day).unwrap_or_default(),
            });
        }

        while days.len() % 7 != 0 {
            days.push(CalendarDay {
                day: 0,
                day_type: CalendarDayType::PaddingAfter,
                markers: Vec::new(),
            });
        }

        CalendarMonth {
            year,
            month,
            days,
            leading_blanks: leading,
        }
    }

    /// Number of days in the given zero-indexed month, honoring leap years
    pub fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match month {
            1 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        }
    }

    /// Proleptic Gregorian leap-year rule
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Blank cells before day 1 in a Monday-first week: 0 when the month
    /// starts on a Monday, 6 when it starts on a Sunday
    pub fn first_weekday_offset(&self, year: i32, month: u32) -> u32 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month + 1, 1) {
            date.weekday().num_days_from_monday()
        } else {
            // Inputs come from a real calendar date upstream; fall back to
            // Monday rather than panic if that ever stops holding
            0
        }
    }

    /// Human-readable name for a zero-indexed month
    pub fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES
            .get(month as usize)
            .copied()
            .unwrap_or("Invalid Month")
    }

    /// Header label for a viewed month, e.g. "August 2026"
    pub fn month_label(&self, year: i32, month: u32) -> String {
        format!("{} {}", self.month_name(month), year)
    }

    /// Short display date for an entry card, e.g. "13 Jun".
    ///
    /// Interprets the timestamp in the device-local zone, consistent with
    /// day-marker bucketing. An unparsable timestamp renders as an empty
    /// string.
    pub fn format_entry_date(&self, created_at: &str) -> String {
        match DateTime::parse_from_rfc3339(created_at) {
            Ok(date) => {
                let local = date.with_timezone(&Local);
                let short_month = SHORT_MONTH_NAMES
                    .get(local.month0() as usize)
                    .copied()
                    .unwrap_or("");
                format!("{} {}", local.day(), short_month)
            }
            Err(_) => String::new(),
        }
    }

    /// Navigate to the previous month, rolling the year back past January
    pub fn previous_month(&self, current_month: u32, current_year: i32) -> (u32, i32) {
        if current_month == 0 {
            (11, current_year - 1)
        } else {
            (current_month - 1, current_year)
        }
    }

    /// Navigate to the next month, rolling the year forward past December
    pub fn next_month(&self, current_month: u32, current_year: i32) -> (u32, i32) {
        if current_month == 11 {
            (0, current_year + 1)
        } else {
            (current_month + 1, current_year)
        }
    }

    /// Get the current focus date for calendar navigation
    pub fn get_focus_date(&self) -> CalendarFocusDate {
        self.current_focus_date.lock().unwrap().clone()
    }

    /// Set the focus date for calendar navigation
    pub fn set_focus_date(&self, year: i32, month: u32) -> Result<CalendarFocusDate> {
        if month > 11 {
            return Err(anyhow!(
                "Invalid month index: {month}. Must be between 0 and 11"
            ));
        }

        let new_focus_date = CalendarFocusDate { month, year };

        {
            let mut focus_date = self.current_focus_date.lock().unwrap();
            *focus_date = new_focus_date.clone();
        }

        Ok(new_focus_date)
    }

    /// Move the focus one month back
    pub fn navigate_previous_month(&self) -> CalendarFocusDate {
        let current = self.get_focus_date();
        let (month, year) = self.previous_month(current.month, current.year);

        // previous_month always returns a valid month index
        self.set_focus_date(year, month).unwrap()
    }

    /// Move the focus one month forward
    pub fn navigate_next_month(&self) -> CalendarFocusDate {
        let current = self.get_focus_date();
        let (month, year) = self.next_month(current.month, current.year);

        // next_month always returns a valid month index
        self.set_focus_date(year, month).unwrap()
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
