//! # pdf2exams
//!
//! Extract tabular examination-schedule data from PDF documents and
//! normalize it into structured JSON records.
//!
//! Exam-routine PDFs publish one table per course: section, midterm date,
//! time range, and classroom, spread over several pages with the header row
//! only on the first. This crate turns those tables into one
//! machine-readable report, with every record carrying best-effort
//! provenance (page, line number, bounding box) back to the source page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    validate the path points at a readable PDF
//!  ├─ 2. Source   per-page tables / text / words via pdfium
//!  ├─ 3. Headers  canonicalise the first page's header row
//!  ├─ 4. Rows     clean cells, standardise dates and time ranges
//!  ├─ 5. Annotate line number + bounding box per record
//!  ├─ 6. Accept   drop incomplete records, dedupe by composite key
//!  └─ 7. Report   metadata + records as one JSON document
//! ```
//!
//! The whole run is a single synchronous pass: pages in order, tables
//! within a page in order, rows within a table in order. Row-level problems
//! are filtered and counted, never raised; only a document that cannot be
//! opened (or an output file that cannot be written) is fatal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2exams::{extract_to_file, ExtractionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder().course("CSE101").build()?;
//!     let stats = extract_to_file("routine.pdf", "routine.json", &config)?;
//!     eprintln!("{} records extracted", stats.accepted);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2exams` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2exams = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod source;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, DEFAULT_DEPT};
pub use error::ExtractError;
pub use extract::{
    extract, extract_from_bytes, extract_from_pages, extract_to_file, inspect, write_report,
    ExtractionOutput, ExtractionStats,
};
pub use report::{BoundingBox, ExamRecord, Report, ReportMetadata};
pub use source::{DocumentMetadata, PageContent, Table, Word};
