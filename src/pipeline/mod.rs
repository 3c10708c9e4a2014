//! Pipeline stages for schedule extraction.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and keeps the page loop in
//! [`crate::extract`] a plain sequence of calls.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ headers ──▶ rows ──▶ annotate ──▶ accept
//! (path)   (columns)  (fields)  (provenance)  (dedup)
//! ```
//!
//! 1. [`input`]    — validate the user-supplied path points at a readable PDF
//! 2. [`headers`]  — canonicalise the first page's header row (descriptive
//!    metadata only; rows are mapped by position)
//! 3. [`rows`]     — clean cells, standardise dates and time ranges, build
//!    one candidate record per table row
//! 4. [`annotate`] — best-effort line number and bounding box per record
//! 5. [`accept`]   — validate required fields and deduplicate by composite
//!    key, preserving first-seen order

pub mod accept;
pub mod annotate;
pub mod headers;
pub mod input;
pub mod rows;
