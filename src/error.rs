//! Error types for the pdf2exams library.
//!
//! Only conditions that make the whole run impossible are modelled as
//! [`ExtractError`]: an input document that cannot be opened, an invalid
//! configuration, or an output file that cannot be written. Everything at
//! row granularity (blank rows, short rows, records failing validation,
//! duplicates) is filtered and counted in
//! [`crate::extract::ExtractionStats`] instead of being raised, and a failed
//! bounding-box lookup degrades to a synthetic box carried inside
//! [`crate::report::BoundingBox`] rather than surfacing here.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2exams library.
///
/// Row-level problems never appear here; they are filtered during the run
/// and reported through [`crate::extract::ExtractionStats`].
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = ExtractError::FileNotFound {
            path: PathBuf::from("/tmp/missing.pdf"),
        };
        assert!(e.to_string().contains("/tmp/missing.pdf"));
    }

    #[test]
    fn not_a_pdf_display_includes_magic() {
        let e = ExtractError::NotAPdf {
            path: PathBuf::from("notes.txt"),
            magic: *b"PK\x03\x04",
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"), "got: {msg}");
        assert!(msg.contains("First bytes"), "got: {msg}");
    }

    #[test]
    fn password_required_mentions_flag() {
        let e = ExtractError::PasswordRequired {
            path: PathBuf::from("locked.pdf"),
        };
        assert!(e.to_string().contains("--password"));
    }

    #[test]
    fn invalid_config_display() {
        let e = ExtractError::InvalidConfig("course code must not be empty".into());
        assert!(e.to_string().contains("course code"));
    }
}
