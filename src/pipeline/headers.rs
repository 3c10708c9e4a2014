//! Header normalization: canonical column names for the report.
//!
//! The first table row on the first page names the columns. Header text
//! varies between routine PDFs ("Sec", "Section No.", "Mid Exam Date &
//! Day"), so matching is case-insensitive substring, not equality. The
//! result is descriptive metadata only: row cells are mapped by position,
//! never looked up by header name.

use crate::pipeline::rows::clean_text;
use crate::source::PageContent;
use tracing::{debug, warn};

/// Identifier columns (serial number, student ID) dropped from headers and
/// data rows alike.
pub const IDENTIFIER_COLUMNS: usize = 2;

/// Fallback header set used when the first page yields no table row.
pub const DEFAULT_HEADERS: [&str; 3] = ["Section", "Mid Exam Date", "Exam Time"];

/// Canonicalise the header row of the first table on the first page.
///
/// Falls back to [`DEFAULT_HEADERS`] when no table row is available; the
/// run continues either way.
pub fn normalize_headers(first_page: Option<&PageContent>) -> Vec<String> {
    let header_row = first_page
        .and_then(|page| page.tables.first())
        .and_then(|table| table.rows.first());

    let Some(row) = header_row else {
        warn!("could not extract headers from first page, using defaults");
        return DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect();
    };

    let headers: Vec<String> = row
        .iter()
        .skip(IDENTIFIER_COLUMNS)
        .map(|cell| {
            let text = cell.as_deref().map(clean_text).unwrap_or_default();
            canonical_name(&text)
        })
        .collect();

    debug!(?headers, "normalized table headers");
    headers
}

fn canonical_name(header: &str) -> String {
    let h = header.to_lowercase();
    if h.contains("section") {
        "Section".to_string()
    } else if h.contains("mid exam date") {
        "Mid Exam Date".to_string()
    } else if h.contains("exam time") {
        "Exam Time".to_string()
    } else if h.contains("classroom") {
        "Classroom".to_string()
    } else {
        header.to_string()
    }
}
