//! Row normalization: from a raw table row to one candidate record's fields.
//!
//! Every transformation here is deterministic and local to the row. Rows
//! that cannot yield a candidate (blank, or too short after dropping the
//! identifier columns) return `None` and are counted by the caller; a bad
//! row is filtered, never an error.
//!
//! Date and time standardization follow the same pattern: an ordered list
//! of format attempts, short-circuiting on the first success. Dates keep
//! the original text when every format fails; times collapse to the empty
//! string, which later invalidates the record.

use crate::pipeline::headers::IDENTIFIER_COLUMNS;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Ordered date-format attempts; first success wins.
const DATE_FORMATS: [&str; 3] = ["%d-%b-%y", "%d/%m/%Y", "%Y-%m-%d"];

/// Ordered time-format attempts; first success wins.
const TIME_FORMATS: [&str; 3] = ["%I:%M%p", "%I:%M %p", "%H:%M"];

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 12-hour clock token: `H:MM` or `HH:MM` followed by AM/PM, any case,
/// optional space before the meridiem.
static RE_CLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}\s*[APMapm]{2}").unwrap());

static RE_DASH_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());

/// The normalized per-row fields, before provenance annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFields {
    pub section: String,
    pub mid_date: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub row_text: String,
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Normalize one raw table row into candidate-record fields.
///
/// Returns `None` for rows that are entirely blank or have fewer than four
/// cells after the identifier columns are dropped.
pub fn normalize_row(row: &[Option<String>]) -> Option<RowFields> {
    let blank = row
        .iter()
        .all(|cell| cell.as_deref().map_or(true, |s| s.trim().is_empty()));
    if blank {
        return None;
    }

    let trimmed = row.get(IDENTIFIER_COLUMNS..).unwrap_or(&[]);
    if trimmed.len() < 4 {
        debug!(cells = ?trimmed, "skipping short row");
        return None;
    }

    let cell = |idx: usize| -> String {
        trimmed[idx]
            .as_deref()
            .map(clean_text)
            .unwrap_or_default()
    };

    // Positional mapping: {Section, Mid Exam Date, Exam Time, Classroom}.
    // Column order is fixed by the source table layout.
    let section = cell(0);
    let mid_date = standardize_date(&cell(1));
    let (start_raw, end_raw) = extract_times(&cell(2));
    let room = cell(3);

    // Full row as it appears in the document, identifier cells included.
    let row_text = row
        .iter()
        .filter_map(|c| c.as_deref())
        .filter(|s| !s.is_empty())
        .map(clean_text)
        .collect::<Vec<_>>()
        .join(" ");

    Some(RowFields {
        section,
        mid_date,
        start_time: standardize_time(&start_raw),
        end_time: standardize_time(&end_raw),
        room,
        row_text,
    })
}

/// Reformat a date to ISO `YYYY-MM-DD`; on total parse failure the original
/// string is returned unchanged.
pub fn standardize_date(date_str: &str) -> String {
    let trimmed = date_str.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    date_str.to_string()
}

/// Pull the start and end times out of a textual range like
/// `"08:30AM-10:00AM"`.
///
/// Dash variants are normalised to an ASCII hyphen first, then every
/// 12-hour clock token is collected: two or more matches give
/// (first, last); exactly one gives (start, ""); none gives ("", "").
pub fn extract_times(time_str: &str) -> (String, String) {
    let normalized = time_str.replace(['\u{2013}', '\u{2014}', '\u{2212}'], "-");
    let normalized = RE_DASH_SPACES.replace_all(&normalized, "-");

    let matches: Vec<&str> = RE_CLOCK
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .collect();

    let tidy = |s: &str| s.replace(' ', "").to_uppercase();

    match matches.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (tidy(only), String::new()),
        [first, .., last] => (tidy(first), tidy(last)),
    }
}

/// Reformat a clock time to 24-hour `HH:MM`; unparseable input yields the
/// empty string.
pub fn standardize_time(time_str: &str) -> String {
    if time_str.is_empty() {
        return String::new();
    }
    let t = time_str.trim().to_uppercase().replace(' ', "");
    for fmt in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(&t, fmt) {
            return time.format("%H:%M").to_string();
        }
    }
    String::new()
}
