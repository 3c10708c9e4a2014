//! Provenance annotation: best-effort line number and bounding box.
//!
//! Both lookups tie a record back to where it sits on the source page.
//! They can only ever degrade: a record without a matching line gets -1,
//! and a record without a matching word gets a synthetic box estimated from
//! its row index. Annotation never fails the run.

use crate::pipeline::rows::clean_text;
use crate::report::BoundingBox;
use crate::source::Word;

/// Horizontal span of the schedule table's data columns, in page points.
/// Determined empirically from the institution's routine PDFs.
pub const TABLE_SPAN_X0: f64 = 89.664;
pub const TABLE_SPAN_X1: f64 = 506.663;

/// 1-based index of the first page text line containing both the section
/// and the room as substrings; -1 when either value is empty or no line
/// matches.
pub fn line_number(lines: &[&str], section: &str, room: &str) -> i32 {
    if section.is_empty() || room.is_empty() {
        return -1;
    }
    lines
        .iter()
        .position(|line| line.contains(section) && line.contains(room))
        .map(|idx| idx as i32 + 1)
        .unwrap_or(-1)
}

/// Locate the record's bounding box from the first word whose cleaned text
/// equals the section value.
///
/// A matched word contributes its vertical extent; the horizontal span is
/// the fixed table-column span. No match, or a match with unusable
/// geometry, degrades to a synthetic box estimated from the row index —
/// the latter additionally carries a diagnostic note.
pub fn bounding_box(words: &[Word], section: &str, row_index: usize) -> BoundingBox {
    let matched = words
        .iter()
        .find(|w| !section.is_empty() && clean_text(&w.text) == section);

    match matched {
        Some(word) if word.top.is_finite() && word.bottom.is_finite() => BoundingBox {
            x0: TABLE_SPAN_X0,
            y0: word.top,
            x1: TABLE_SPAN_X1,
            y1: word.bottom,
            error: None,
        },
        Some(word) => {
            let mut bbox = synthetic_box(row_index);
            bbox.error = Some(format!(
                "matched word has non-finite geometry (top={}, bottom={})",
                word.top, word.bottom
            ));
            bbox
        }
        None => synthetic_box(row_index),
    }
}

/// Estimate a box from the row's position in the table.
fn synthetic_box(row_index: usize) -> BoundingBox {
    let base_y = 100.0 + row_index as f64 * 15.0;
    BoundingBox {
        x0: 90.0,
        y0: base_y,
        x1: 500.0,
        y1: base_y + 10.0,
        error: None,
    }
}
