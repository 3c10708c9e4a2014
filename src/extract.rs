//! Top-level extraction entry points.
//!
//! [`extract`] is the primary API: open the document, run every page
//! through the normalization pipeline, and return the assembled report plus
//! run statistics. [`extract_from_pages`] is the pure transform underneath
//! it, operating on pre-extracted [`PageContent`]; integration tests drive
//! that seam without touching a PDF.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::pipeline::accept::{Acceptor, Verdict};
use crate::pipeline::{annotate, headers, input, rows};
use crate::report::{ExamRecord, Report};
use crate::source::{pdfium, DocumentMetadata, PageContent};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Counters for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the source document.
    pub pages: usize,
    /// Tables seen across all pages.
    pub tables: usize,
    /// Rows that produced a candidate record.
    pub candidate_rows: usize,
    /// Rows filtered before normalization (blank or too short).
    pub skipped_rows: usize,
    /// Candidates dropped for a missing required field.
    pub invalid_records: usize,
    /// Candidates dropped as duplicates of an emitted key.
    pub duplicate_records: usize,
    /// Records in the final report.
    pub accepted: usize,
    /// Wall-clock duration of the whole run.
    pub duration_ms: u64,
}

/// The result of an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub report: Report,
    pub stats: ExtractionStats,
}

/// Extract the examination schedule from a PDF file.
///
/// # Errors
/// Returns `Err(ExtractError)` only for fatal conditions: unreadable or
/// non-PDF input, or a document pdfium cannot open. Row-level problems are
/// filtered and counted in [`ExtractionStats`].
pub fn extract(
    input_str: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let input_str = input_str.as_ref();
    info!("starting extraction: {}", input_str);

    let pdf_path = input::resolve_input(input_str)?;
    let document = pdfium::load_document(&pdf_path, config.password.as_deref())?;
    info!("PDF contains {} pages", document.pages.len());

    Ok(extract_from_pages(input_str, &document.pages, config))
}

/// Extract and write the report JSON to `output_path`.
///
/// The file is written in full via a temp file and rename, so a failed run
/// never leaves a partial report behind.
pub fn extract_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, ExtractError> {
    let output = extract(input_str, config)?;
    let path = output_path.as_ref();
    write_report(&output.report, path, config.pretty)?;
    info!("report written to {}", path.display());
    Ok(output.stats)
}

/// Extract from PDF bytes in memory.
///
/// The bytes are written to a managed [`tempfile`] that is cleaned up
/// automatically on return; the report's `source` names that temp path.
pub fn extract_from_bytes(
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let mut tmp = tempfile::NamedTempFile::new()
        .map_err(|e| ExtractError::Internal(format!("tempfile: {e}")))?;
    tmp.write_all(bytes)
        .map_err(|e| ExtractError::Internal(format!("tempfile write: {e}")))?;
    let path = tmp.path().to_string_lossy().to_string();
    // `tmp` is dropped (and the file deleted) when this returns
    extract(&path, config)
}

/// Read document metadata without extracting the schedule.
pub fn inspect(input_str: impl AsRef<str>) -> Result<DocumentMetadata, ExtractError> {
    let pdf_path = input::resolve_input(input_str.as_ref())?;
    pdfium::inspect_document(&pdf_path, None)
}

/// Run the normalization pipeline over pre-extracted page content.
///
/// This is the single pass at the heart of the tool: pages in order, tables
/// within a page in order, rows within a table in order. The accumulator is
/// created here and threaded through the loop; nothing outlives the call.
pub fn extract_from_pages(
    source: impl Into<String>,
    pages: &[PageContent],
    config: &ExtractionConfig,
) -> ExtractionOutput {
    let started = Instant::now();
    let mut stats = ExtractionStats {
        pages: pages.len(),
        ..Default::default()
    };

    // Descriptive metadata only; row cells are mapped by position.
    let _headers = headers::normalize_headers(pages.first());

    let mut acceptor = Acceptor::new();

    for (page_idx, page) in pages.iter().enumerate() {
        let page_num = page_idx + 1;
        debug!(page = page_num, "processing page");

        if page.tables.is_empty() {
            debug!(page = page_num, "no tables found");
            continue;
        }

        let text_lines: Vec<&str> = page.text.lines().collect();

        for table in &page.tables {
            if table.rows.is_empty() {
                continue;
            }
            stats.tables += 1;

            // The first page's tables carry the header row; skip it there.
            let start_row = if page_num == 1 { 1 } else { 0 };

            for (row_idx, row) in table.rows.iter().skip(start_row).enumerate() {
                let Some(fields) = rows::normalize_row(row) else {
                    stats.skipped_rows += 1;
                    continue;
                };
                stats.candidate_rows += 1;

                let line_number =
                    annotate::line_number(&text_lines, &fields.section, &fields.room);
                let bounding_box =
                    annotate::bounding_box(&page.words, &fields.section, row_idx);

                let record = ExamRecord {
                    course: config.course.clone(),
                    section: fields.section,
                    mid_date: fields.mid_date,
                    room: fields.room,
                    dept: config.dept.clone(),
                    start_time: fields.start_time,
                    end_time: fields.end_time,
                    row_text: fields.row_text,
                    page_number: page_num,
                    line_number,
                    bounding_box,
                };

                match acceptor.offer(record) {
                    Verdict::Accepted => {}
                    Verdict::Invalid => stats.invalid_records += 1,
                    Verdict::Duplicate => stats.duplicate_records += 1,
                }
            }
        }
    }

    stats.accepted = acceptor.len();
    stats.duration_ms = started.elapsed().as_millis() as u64;
    info!(
        accepted = stats.accepted,
        skipped = stats.skipped_rows,
        invalid = stats.invalid_records,
        duplicates = stats.duplicate_records,
        "extraction complete"
    );

    ExtractionOutput {
        report: Report::new(source, acceptor.into_records()),
        stats,
    }
}

/// Serialize and atomically write the report to `path`, overwriting any
/// existing file.
pub fn write_report(report: &Report, path: &Path, pretty: bool) -> Result<(), ExtractError> {
    let json = report
        .to_json(pretty)
        .map_err(|e| ExtractError::Internal(format!("report serialization: {e}")))?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| ExtractError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Temp file in the destination directory so the rename stays on one
    // filesystem.
    let mut tmp =
        tempfile::NamedTempFile::new_in(&parent).map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tmp.write_all(b"\n")
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tmp.persist(path)
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_report_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale").unwrap();

        let report = Report::new("routine.pdf", Vec::new());
        write_report(&report, &path, true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"total_entries\": 0"));
        assert!(!written.contains("stale"));
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn compact_output_is_single_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/out.json");

        let report = Report::new("routine.pdf", Vec::new());
        write_report(&report, &path, false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.trim_end().lines().count(), 1);
    }
}
