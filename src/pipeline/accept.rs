//! Validation and deduplication: the run's accumulator.
//!
//! An [`Acceptor`] is created per run and threaded through the page loop;
//! there is no module-level state. It owns the seen-key set and the ordered
//! list of accepted records; acceptance order is first-seen order (pages in
//! order, rows within a page in table order).

use crate::report::ExamRecord;
use std::collections::HashSet;
use tracing::debug;

/// Composite uniqueness key over the six required fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecordKey {
    course: String,
    section: String,
    mid_date: String,
    start_time: String,
    end_time: String,
    room: String,
}

impl RecordKey {
    fn of(record: &ExamRecord) -> Self {
        Self {
            course: record.course.clone(),
            section: record.section.clone(),
            mid_date: record.mid_date.clone(),
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            room: record.room.clone(),
        }
    }
}

/// What happened to an offered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// A required field was empty after normalization.
    Invalid,
    /// The record's key was already emitted this run.
    Duplicate,
}

/// Per-run accumulator: seen-key set plus accepted records in order.
#[derive(Debug, Default)]
pub struct Acceptor {
    seen: HashSet<RecordKey>,
    records: Vec<ExamRecord>,
}

impl Acceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate record: accepted iff valid and its key is unseen.
    /// Acceptance appends the record and marks the key as seen.
    pub fn offer(&mut self, record: ExamRecord) -> Verdict {
        if !is_valid(&record) {
            debug!(
                section = %record.section,
                page = record.page_number,
                "skipping invalid record"
            );
            return Verdict::Invalid;
        }
        let key = RecordKey::of(&record);
        if !self.seen.insert(key) {
            debug!(
                section = %record.section,
                page = record.page_number,
                "skipping duplicate record"
            );
            return Verdict::Duplicate;
        }
        self.records.push(record);
        Verdict::Accepted
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the accumulator, yielding the accepted records in
    /// first-seen order.
    pub fn into_records(self) -> Vec<ExamRecord> {
        self.records
    }
}

/// All six required fields must be non-empty.
fn is_valid(record: &ExamRecord) -> bool {
    !record.course.is_empty()
        && !record.section.is_empty()
        && !record.mid_date.is_empty()
        && !record.start_time.is_empty()
        && !record.end_time.is_empty()
        && !record.room.is_empty()
}
