//! pdfium-backed implementation of the document-extraction capability.
//!
//! pdfium exposes page text as rectangular segments (uniform runs of text
//! with a bounding rectangle). Everything the pipeline needs is derived from
//! those segments:
//!
//! * **text** — pdfium's own full-page text, line endings normalised,
//! * **words** — segment text split on whitespace, each word's horizontal
//!   span interpolated from the segment rectangle by character count,
//! * **tables** — segments clustered into rows by vertical midpoint; runs of
//!   rows with enough cells become a [`Table`].
//!
//! Coordinates are converted from pdfium's bottom-up page space to top-down
//! (`top` < `bottom`), matching the convention of [`crate::source::Word`].
//!
//! Per-page extraction failures degrade to an empty page; only a document
//! that cannot be opened at all is fatal.

use crate::error::ExtractError;
use crate::source::{DocumentMetadata, LoadedDocument, PageContent, Table, TableRow, Word};
use pdfium_render::prelude::*;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, warn};

/// Segments whose vertical midpoints differ by at most this many points
/// belong to the same table row.
const ROW_TOLERANCE: f64 = 3.0;

/// Minimum cells per segment row for the row to count as tabular.
const MIN_TABLE_CELLS: usize = 3;

/// Open a PDF and extract the content of every page.
pub fn load_document(
    path: &Path,
    password: Option<&str>,
) -> Result<LoadedDocument, ExtractError> {
    let pdfium = Pdfium::default();
    let document = open_document(&pdfium, path, password)?;
    let metadata = read_metadata(&document);
    debug!(pages = metadata.page_count, "PDF loaded");

    let mut pages = Vec::with_capacity(metadata.page_count);
    for (index, page) in document.pages().iter().enumerate() {
        pages.push(read_page(&page, index));
    }

    Ok(LoadedDocument { metadata, pages })
}

/// Read document metadata without extracting page content.
pub fn inspect_document(
    path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ExtractError> {
    let pdfium = Pdfium::default();
    let document = open_document(&pdfium, path, password)?;
    Ok(read_metadata(&document))
}

fn open_document<'a>(
    pdfium: &'a Pdfium,
    path: &Path,
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, ExtractError> {
    pdfium.load_pdf_from_file(path, password).map_err(|e| {
        let detail = format!("{:?}", e);
        if detail.contains("Password") || detail.contains("password") {
            if password.is_some() {
                ExtractError::WrongPassword {
                    path: path.to_path_buf(),
                }
            } else {
                ExtractError::PasswordRequired {
                    path: path.to_path_buf(),
                }
            }
        } else {
            ExtractError::CorruptPdf {
                path: path.to_path_buf(),
                detail,
            }
        }
    })
}

fn read_metadata(document: &PdfDocument<'_>) -> DocumentMetadata {
    let metadata = document.metadata();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    }
}

fn read_page(page: &PdfPage<'_>, index: usize) -> PageContent {
    let page_height = page.height().value as f64;

    let text = match page.text() {
        Ok(t) => t,
        Err(e) => {
            warn!(
                page = index + 1,
                error = ?e,
                "text extraction failed, page degraded to empty"
            );
            return PageContent::default();
        }
    };

    let page_text = normalise_line_endings(&text.all());
    let segments = collect_segments(&text, page_height);
    let words = words_from_segments(&segments);
    let tables = tables_from_segments(&segments);

    debug!(
        page = index + 1,
        tables = tables.len(),
        words = words.len(),
        "page content extracted"
    );

    PageContent {
        tables,
        text: page_text,
        words,
    }
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// A text run with its rectangle, in top-down coordinates.
#[derive(Debug, Clone)]
struct Segment {
    text: String,
    x0: f64,
    top: f64,
    x1: f64,
    bottom: f64,
}

impl Segment {
    fn v_mid(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

fn collect_segments(text: &PdfPageText<'_>, page_height: f64) -> Vec<Segment> {
    let mut segments: Vec<Segment> = text
        .segments()
        .iter()
        .filter_map(|segment| {
            let content = segment.text();
            if content.trim().is_empty() {
                return None;
            }
            let bounds = segment.bounds();
            Some(Segment {
                text: content,
                x0: bounds.left.value as f64,
                // pdfium y grows upward; flip to top-down
                top: page_height - bounds.top.value as f64,
                x1: bounds.right.value as f64,
                bottom: page_height - bounds.bottom.value as f64,
            })
        })
        .collect();

    segments.sort_by(|a, b| {
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal))
    });

    segments
}

/// Split each segment into whitespace-delimited words, interpolating each
/// word's horizontal span from the segment rectangle by character position.
fn words_from_segments(segments: &[Segment]) -> Vec<Word> {
    let mut words = Vec::new();

    for seg in segments {
        let chars: Vec<char> = seg.text.chars().collect();
        if chars.is_empty() {
            continue;
        }
        let per_char = (seg.x1 - seg.x0) / chars.len() as f64;

        let mut pos = 0;
        while pos < chars.len() {
            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
            let start = pos;
            while pos < chars.len() && !chars[pos].is_whitespace() {
                pos += 1;
            }
            if pos > start {
                words.push(Word {
                    text: chars[start..pos].iter().collect(),
                    x0: seg.x0 + start as f64 * per_char,
                    top: seg.top,
                    x1: seg.x0 + pos as f64 * per_char,
                    bottom: seg.bottom,
                });
            }
        }
    }

    words
}

/// Cluster segments into rows by vertical midpoint, then collect runs of
/// rows with at least [`MIN_TABLE_CELLS`] cells into tables. Title lines and
/// footers fall below the threshold and break the runs.
fn tables_from_segments(segments: &[Segment]) -> Vec<Table> {
    let mut rows: Vec<Vec<&Segment>> = Vec::new();
    for seg in segments {
        match rows.last_mut() {
            Some(row) if (seg.v_mid() - row[0].v_mid()).abs() <= ROW_TOLERANCE => {
                row.push(seg);
            }
            _ => rows.push(vec![seg]),
        }
    }

    let mut tables = Vec::new();
    let mut current: Vec<TableRow> = Vec::new();

    for mut row in rows {
        if row.len() >= MIN_TABLE_CELLS {
            row.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal));
            let cells: TableRow = row
                .iter()
                .map(|seg| {
                    let t = seg.text.trim();
                    if t.is_empty() {
                        None
                    } else {
                        Some(t.to_string())
                    }
                })
                .collect();
            current.push(cells);
        } else if !current.is_empty() {
            tables.push(Table::new(std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() {
        tables.push(Table::new(current));
    }

    tables
}
