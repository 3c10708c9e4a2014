//! Integration tests for the extraction pipeline.
//!
//! All tests run against in-memory [`PageContent`] fixtures, so the whole
//! pipeline — headers, row normalization, annotation, dedup, report
//! assembly — is exercised without a PDF or a pdfium library on disk.

use pdf2exams::{extract_from_pages, ExtractionConfig, PageContent, Table, Word};

// ── Fixture helpers ──────────────────────────────────────────────────────────

fn cells(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

/// A data row in source-table layout: serial, student ID, then the four
/// schedule columns.
fn exam_row(serial: &str, section: &str, date: &str, time: &str, room: &str) -> Vec<Option<String>> {
    cells(&[serial, "221-15-1234", section, date, time, room])
}

fn header_row() -> Vec<Option<String>> {
    cells(&[
        "SL",
        "Student ID",
        "Section",
        "Mid Exam Date",
        "Exam Time",
        "Classroom",
    ])
}

fn word(text: &str, top: f64, bottom: f64) -> Word {
    Word {
        text: text.to_string(),
        x0: 100.0,
        top,
        x1: 120.0,
        bottom,
    }
}

fn config() -> ExtractionConfig {
    ExtractionConfig::new("CSE101").unwrap()
}

/// Two-page fixture: page 1 has the header row plus two data rows, page 2
/// has two data rows and no header.
fn two_page_document() -> Vec<PageContent> {
    let page1 = PageContent {
        tables: vec![Table::new(vec![
            header_row(),
            exam_row("1", "01", "26-Jul-25", "08:30AM-10:00AM", "07A-01C"),
            exam_row("2", "02", "26-Jul-25", "10:15AM-11:45AM", "07A-02C"),
        ])],
        text: "Mid Term Examination Routine\n\
               SL ID Section Date Time Room\n\
               1 221-15-1234 01 26-Jul-25 08:30AM-10:00AM 07A-01C\n\
               2 221-15-1234 02 26-Jul-25 10:15AM-11:45AM 07A-02C\n"
            .to_string(),
        words: vec![word("01", 120.0, 131.0), word("02", 135.0, 146.0)],
    };
    let page2 = PageContent {
        tables: vec![Table::new(vec![
            exam_row("3", "03", "27/07/2025", "08:30AM\u{2013}10:00AM", "07A-03C"),
            exam_row("4", "04", "2025-07-28", "2:00PM-3:30PM", "07A-04C"),
        ])],
        text: "3 221-15-1234 03 27-Jul-25 08:30AM-10:00AM 07A-03C\n\
               4 221-15-1234 04 28-Jul-25 02:00PM-03:30PM 07A-04C\n"
            .to_string(),
        words: vec![word("03", 90.0, 101.0)],
    };
    vec![page1, page2]
}

// ── End-to-end candidate counting ────────────────────────────────────────────

#[test]
fn two_page_document_yields_four_candidates() {
    let output = extract_from_pages("routine.pdf", &two_page_document(), &config());

    assert_eq!(output.stats.candidate_rows, 4);
    assert_eq!(output.stats.accepted, 4);
    assert_eq!(output.stats.skipped_rows, 0);
    assert_eq!(output.report.exams.len(), 4);
    assert_eq!(output.report.metadata.total_entries, 4);
}

#[test]
fn output_invariants_hold_for_every_record() {
    let output = extract_from_pages("routine.pdf", &two_page_document(), &config());

    let mut seen = std::collections::HashSet::new();
    for record in &output.report.exams {
        for (name, value) in [
            ("Course", &record.course),
            ("Section", &record.section),
            ("Mid Date", &record.mid_date),
            ("Start Time", &record.start_time),
            ("End Time", &record.end_time),
            ("Room.", &record.room),
        ] {
            assert!(!value.is_empty(), "empty required field {name:?}");
        }
        let key = (
            record.course.clone(),
            record.section.clone(),
            record.mid_date.clone(),
            record.start_time.clone(),
            record.end_time.clone(),
            record.room.clone(),
        );
        assert!(seen.insert(key), "duplicate key in output");
    }
}

#[test]
fn normalization_standardizes_dates_and_times() {
    let output = extract_from_pages("routine.pdf", &two_page_document(), &config());
    let exams = &output.report.exams;

    assert_eq!(exams[0].mid_date, "2025-07-26");
    assert_eq!(exams[0].start_time, "08:30");
    assert_eq!(exams[0].end_time, "10:00");

    // DD/MM/YYYY input and an en-dash time range
    assert_eq!(exams[2].mid_date, "2025-07-27");
    assert_eq!(exams[2].start_time, "08:30");
    assert_eq!(exams[2].end_time, "10:00");

    // ISO date passes through; PM times convert
    assert_eq!(exams[3].mid_date, "2025-07-28");
    assert_eq!(exams[3].start_time, "14:00");
    assert_eq!(exams[3].end_time, "15:30");

    for record in exams {
        assert_eq!(record.course, "CSE101");
        assert_eq!(record.dept, "BIL");
    }
}

#[test]
fn extraction_is_idempotent_modulo_timestamp() {
    let pages = two_page_document();
    let first = extract_from_pages("routine.pdf", &pages, &config());
    let second = extract_from_pages("routine.pdf", &pages, &config());

    let a = serde_json::to_value(&first.report.exams).unwrap();
    let b = serde_json::to_value(&second.report.exams).unwrap();
    assert_eq!(a, b);
}

// ── Filtering ────────────────────────────────────────────────────────────────

#[test]
fn short_and_blank_rows_are_skipped_silently() {
    let page = PageContent {
        tables: vec![Table::new(vec![
            // only three cells left after the identifier columns
            cells(&["1", "221-15-1234", "01", "26-Jul-25", "08:30AM-10:00AM"]),
            vec![None, Some("  ".to_string()), None],
            exam_row("2", "02", "26-Jul-25", "08:30AM-10:00AM", "07A-02C"),
        ])],
        ..Default::default()
    };
    // page 2 so no header row is consumed
    let output = extract_from_pages("routine.pdf", &[PageContent::default(), page], &config());

    assert_eq!(output.stats.skipped_rows, 2);
    assert_eq!(output.stats.candidate_rows, 1);
    assert_eq!(output.report.exams.len(), 1);
    assert_eq!(output.report.exams[0].section, "02");
}

#[test]
fn unparseable_time_invalidates_the_record() {
    let page = PageContent {
        tables: vec![Table::new(vec![exam_row(
            "1",
            "01",
            "26-Jul-25",
            "time TBA",
            "07A-01C",
        )])],
        ..Default::default()
    };
    let output = extract_from_pages("routine.pdf", &[PageContent::default(), page], &config());

    assert_eq!(output.stats.candidate_rows, 1);
    assert_eq!(output.stats.invalid_records, 1);
    assert!(output.report.exams.is_empty());
}

#[test]
fn duplicate_rows_are_dropped_keeping_first_seen() {
    let mut pages = two_page_document();
    // page 2 repeats page 1's first data row verbatim
    pages[1]
        .tables
        .push(Table::new(vec![exam_row(
            "9",
            "01",
            "26-Jul-25",
            "08:30AM-10:00AM",
            "07A-01C",
        )]));

    let output = extract_from_pages("routine.pdf", &pages, &config());

    assert_eq!(output.stats.candidate_rows, 5);
    assert_eq!(output.stats.duplicate_records, 1);
    assert_eq!(output.report.exams.len(), 4);
    // the surviving copy is the one from page 1
    assert_eq!(output.report.exams[0].section, "01");
    assert_eq!(output.report.exams[0].page_number, 1);
}

// ── Provenance ───────────────────────────────────────────────────────────────

#[test]
fn line_numbers_point_at_matching_text_lines() {
    let output = extract_from_pages("routine.pdf", &two_page_document(), &config());
    let exams = &output.report.exams;

    // page 1 text: title, header line, then the two data lines
    assert_eq!(exams[0].line_number, 3);
    assert_eq!(exams[1].line_number, 4);
    assert_eq!(exams[0].page_number, 1);

    // page 2 lines 1 and 2
    assert_eq!(exams[2].line_number, 1);
    assert_eq!(exams[3].line_number, 2);
    assert_eq!(exams[3].page_number, 2);
}

#[test]
fn missing_text_line_gives_minus_one() {
    let page = PageContent {
        tables: vec![Table::new(vec![exam_row(
            "1",
            "05",
            "26-Jul-25",
            "08:30AM-10:00AM",
            "07A-05C",
        )])],
        text: "nothing that mentions the row".to_string(),
        ..Default::default()
    };
    let output = extract_from_pages("routine.pdf", &[PageContent::default(), page], &config());
    assert_eq!(output.report.exams[0].line_number, -1);
}

#[test]
fn bounding_boxes_use_matched_words_or_fall_back() {
    let output = extract_from_pages("routine.pdf", &two_page_document(), &config());
    let exams = &output.report.exams;

    // section "01" matched a word: fixed x-span, word's vertical extent
    let bbox = &exams[0].bounding_box;
    assert_eq!(bbox.x0, 89.664);
    assert_eq!(bbox.x1, 506.663);
    assert_eq!(bbox.y0, 120.0);
    assert_eq!(bbox.y1, 131.0);
    assert!(bbox.error.is_none());

    // section "04" has no matching word on page 2: synthetic box from
    // row index 1
    let bbox = &exams[3].bounding_box;
    assert_eq!(bbox.x0, 90.0);
    assert_eq!(bbox.x1, 500.0);
    assert_eq!(bbox.y0, 115.0);
    assert_eq!(bbox.y1, 125.0);
    assert!(bbox.error.is_none());
}

// ── Report shape ─────────────────────────────────────────────────────────────

#[test]
fn report_serializes_with_schema_field_names() {
    let output = extract_from_pages("routine.pdf", &two_page_document(), &config());
    let json = serde_json::to_value(&output.report).unwrap();

    assert_eq!(json["metadata"]["source"], "routine.pdf");
    assert_eq!(json["metadata"]["total_entries"], 4);
    assert!(json["metadata"]["generated_at"].is_string());
    assert!(json["metadata"]["fields_description"]["Mid Date"].is_string());

    let first = &json["exams"][0];
    for key in [
        "Course",
        "Section",
        "Mid Date",
        "Room.",
        "Dept.",
        "Start Time",
        "End Time",
        "RowText",
        "Page Number",
        "Line Number",
        "BoundingBox",
    ] {
        assert!(first.get(key).is_some(), "missing field {key:?}");
    }
    assert!(first["BoundingBox"].get("error").is_none());
    assert_eq!(
        first["RowText"],
        "1 221-15-1234 01 26-Jul-25 08:30AM-10:00AM 07A-01C"
    );
}

#[test]
fn headerless_first_page_still_extracts_with_default_headers() {
    // no tables at all on page 1: header normalization falls back, and no
    // data row is lost to the header skip on later pages
    let page2 = PageContent {
        tables: vec![Table::new(vec![exam_row(
            "1",
            "01",
            "26-Jul-25",
            "08:30AM-10:00AM",
            "07A-01C",
        )])],
        ..Default::default()
    };
    let output = extract_from_pages("routine.pdf", &[PageContent::default(), page2], &config());

    assert_eq!(output.stats.candidate_rows, 1);
    assert_eq!(output.report.exams.len(), 1);
}

#[test]
fn dept_override_is_stamped_on_records() {
    let config = ExtractionConfig::builder()
        .course("EEE205")
        .dept("EEE")
        .build()
        .unwrap();
    let output = extract_from_pages("routine.pdf", &two_page_document(), &config);
    assert!(output.report.exams.iter().all(|r| r.dept == "EEE"));
    assert!(output.report.exams.iter().all(|r| r.course == "EEE205"));
}
