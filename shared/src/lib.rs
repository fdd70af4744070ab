use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum width (in percent) a tally bar renders at, so a zero or tiny
/// count still shows a visible stub instead of collapsing to nothing.
pub const MIN_BAR_WIDTH_PERCENT: f64 = 18.0;

/// Category of a journal entry.
///
/// Exactly two values exist: a rose is a positive reflection, a thorn a
/// negative or cautionary one. The persisted form may carry other strings
/// (see `EntryRecord`); those are resolved at the deserialization boundary,
/// never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Rose,
    Thorn,
}

impl EntryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryCategory::Rose => "rose",
            EntryCategory::Thorn => "thorn",
        }
    }

    /// Calendar dot color for this category.
    pub fn marker_color(&self) -> MarkerColor {
        match self {
            EntryCategory::Rose => MarkerColor::Pink,
            EntryCategory::Thorn => MarkerColor::Green,
        }
    }

    /// Human-readable label, as shown on entry badges.
    pub fn label(&self) -> &'static str {
        match self {
            EntryCategory::Rose => "Rose",
            EntryCategory::Thorn => "Thorn",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color of a calendar day marker dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Pink,
    Green,
}

/// Entry ID in format: "entry::<rose|thorn>::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// Whether this entry is a rose (positive) or a thorn (negative)
    pub category: EntryCategory,
    /// User-authored note, trimmed of surrounding whitespace before storage
    pub text: String,
    /// Creation timestamp with timezone (RFC 3339)
    pub created_at: String,
}

impl JournalEntry {
    /// Generate an entry ID from the category and creation timestamp
    pub fn generate_id(category: EntryCategory, epoch_millis: u64) -> String {
        format!("entry::{}::{}", category.as_str(), epoch_millis)
    }

    /// Parse an entry ID to extract its components
    pub fn parse_id(id: &str) -> Result<(EntryCategory, u64), EntryIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "entry" {
            return Err(EntryIdError::InvalidFormat);
        }

        let category = match parts[1] {
            "rose" => EntryCategory::Rose,
            "thorn" => EntryCategory::Thorn,
            _ => return Err(EntryIdError::InvalidCategory),
        };

        let epoch_millis = parts[2]
            .parse::<u64>()
            .map_err(|_| EntryIdError::InvalidTimestamp)?;

        Ok((category, epoch_millis))
    }

    /// Extract the epoch timestamp from the entry ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, EntryIdError> {
        Self::parse_id(&self.id).map(|(_, timestamp)| timestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryIdError {
    InvalidFormat,
    InvalidCategory,
    InvalidTimestamp,
}

impl fmt::Display for EntryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryIdError::InvalidFormat => write!(f, "Invalid entry ID format"),
            EntryIdError::InvalidCategory => write!(f, "Invalid category in entry ID"),
            EntryIdError::InvalidTimestamp => write!(f, "Invalid timestamp in entry ID"),
        }
    }
}

impl std::error::Error for EntryIdError {}

/// Persisted/wire shape of a journal entry.
///
/// The stored field names predate this codebase and differ from the domain
/// model: the category travels as `type` and the timestamp as `createdAt`.
/// The category is kept as a raw string here so the deserialization boundary
/// can log unrecognized values before resolving them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Request to create a new journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub category: EntryCategory,
    pub text: String,
}

/// Type of calendar cell for explicit rendering logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Empty padding cell after the last day, filling out the final week
    PaddingAfter,
}

/// A single cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Day of month in [1, days_in_month]; 0 for padding cells
    pub day: u32,
    pub day_type: CalendarDayType,
    /// One marker per entry created on this day, in collection order.
    /// Unbounded here; consumers cap how many they show.
    pub markers: Vec<MarkerColor>,
}

/// A Monday-first calendar month: leading blanks, one cell per day, trailing
/// blanks to a multiple of seven
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    /// Zero-indexed month (0 = January)
    pub month: u32,
    pub days: Vec<CalendarDay>,
    /// Blank cells before day 1; 0 when the month starts on a Monday
    pub leading_blanks: u32,
}

/// The month/year the calendar is currently looking at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarFocusDate {
    /// Zero-indexed month (0 = January)
    pub month: u32,
    pub year: i32,
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month0(),
            year: now.year(),
        }
    }
}

/// Counts of each entry category across the entire loaded collection.
/// Never scoped to the viewed month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotals {
    pub rose: u32,
    pub thorn: u32,
}

impl CategoryTotals {
    /// Normalization denominator for the tally bars: the larger count, or 1
    /// when both are zero.
    pub fn max_total(&self) -> u32 {
        self.rose.max(self.thorn).max(1)
    }

    pub fn rose_width_percent(&self) -> f64 {
        bar_width_percent(self.rose, self.max_total())
    }

    pub fn thorn_width_percent(&self) -> f64 {
        bar_width_percent(self.thorn, self.max_total())
    }
}

/// Width (in percent of the track) for a tally bar with `count` entries.
///
/// A zero count renders at the minimum stub width; a nonzero count scales
/// against `max_total` and is clamped so it never exceeds the track nor
/// drops below the stub.
pub fn bar_width_percent(count: u32, max_total: u32) -> f64 {
    if count == 0 {
        return MIN_BAR_WIDTH_PERCENT;
    }
    let scaled = (count as f64 / max_total as f64) * 100.0;
    scaled.clamp(MIN_BAR_WIDTH_PERCENT, 100.0)
}

/// Request body for signing in to the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for creating an account on the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response body from the remote auth endpoints.
///
/// The backend returns `{ message, id }` and sometimes a username; every
/// field is optional-tolerant and the id may arrive as a number or string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub username: Option<String>,
}

impl AuthResponse {
    /// The user id as a string, whatever JSON type the backend sent it as
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A signed-in identity as reported by the remote API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSession {
    pub user_id: Option<String>,
    pub username: Option<String>,
}
