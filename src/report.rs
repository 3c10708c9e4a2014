//! Output document types: the JSON report, its metadata block, and the
//! per-exam record.
//!
//! Serialized field names are part of the report schema consumed downstream
//! and must not change; the Rust field names stay idiomatic and the mapping
//! lives in the serde attributes.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// One normalized examination-schedule entry.
///
/// A record is constructed once per source table row and never mutated after
/// acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    #[serde(rename = "Course")]
    pub course: String,

    #[serde(rename = "Section")]
    pub section: String,

    /// ISO date (`YYYY-MM-DD`) when parseable, otherwise the original text.
    #[serde(rename = "Mid Date")]
    pub mid_date: String,

    #[serde(rename = "Room.")]
    pub room: String,

    #[serde(rename = "Dept.")]
    pub dept: String,

    /// 24-hour `HH:MM`, or empty when the source time was unparseable.
    #[serde(rename = "Start Time")]
    pub start_time: String,

    /// 24-hour `HH:MM`, or empty when the source time was unparseable.
    #[serde(rename = "End Time")]
    pub end_time: String,

    /// Full concatenated text of the row as it appears in the document.
    #[serde(rename = "RowText")]
    pub row_text: String,

    /// 1-based page the row was extracted from.
    #[serde(rename = "Page Number")]
    pub page_number: usize,

    /// 1-based index into the page's text lines, -1 when no line matched.
    #[serde(rename = "Line Number")]
    pub line_number: i32,

    #[serde(rename = "BoundingBox")]
    pub bounding_box: BoundingBox,
}

/// Approximate rectangular region of the source page a record came from.
///
/// Either derived from a matched word position, or estimated from the row
/// index. Estimation trouble is carried inline in `error`; provenance is
/// best-effort and never fails the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The complete output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub exams: Vec<ExamRecord>,
}

impl Report {
    /// Assemble a report from the accepted records, stamping the generation
    /// time.
    pub fn new(source: impl Into<String>, exams: Vec<ExamRecord>) -> Self {
        Self {
            metadata: ReportMetadata {
                source: source.into(),
                generated_at: Local::now().to_rfc3339(),
                total_entries: exams.len(),
                fields_description: FieldGlossary::default(),
            },
            exams,
        }
    }

    /// Serialize the full report as a JSON string.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Report metadata block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Source document identifier (the input path as given).
    pub source: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    /// Number of accepted records.
    pub total_entries: usize,
    /// Human-readable description of every record field.
    pub fields_description: FieldGlossary,
}

/// Fixed field glossary embedded in every report.
///
/// A struct rather than a map so the key order is stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGlossary {
    #[serde(rename = "Course")]
    course: String,
    #[serde(rename = "Section")]
    section: String,
    #[serde(rename = "Mid Date")]
    mid_date: String,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Room.")]
    room: String,
    #[serde(rename = "Dept.")]
    dept: String,
    #[serde(rename = "Page Number")]
    page_number: String,
    #[serde(rename = "Line Number")]
    line_number: String,
    #[serde(rename = "RowText")]
    row_text: String,
    #[serde(rename = "BoundingBox")]
    bounding_box: String,
}

impl Default for FieldGlossary {
    fn default() -> Self {
        Self {
            course: "Course code".into(),
            section: "Class section number".into(),
            mid_date: "Examination date (YYYY-MM-DD)".into(),
            start_time: "Exam start time (24-hour format, first in range)".into(),
            end_time: "Exam end time (24-hour format, last in range)".into(),
            room: "Examination room (Classroom)".into(),
            dept: "Department offering the course".into(),
            page_number: "Page number from which the entry was extracted".into(),
            line_number: "Line number from which the entry was extracted".into(),
            row_text: "Full concatenated text of the row as it appears in the PDF".into(),
            bounding_box: "Coordinates of the row in the PDF (x0, y0, x1, y1)".into(),
        }
    }
}
