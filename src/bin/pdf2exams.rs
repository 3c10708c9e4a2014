//! CLI binary for pdf2exams.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig`, prompts for the course code, and prints a summary.

use anyhow::{Context, Result};
use clap::Parser;
use pdf2exams::{extract_to_file, inspect, ExtractionConfig, DEFAULT_DEPT};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic extraction (prompts for the course code)
  pdf2exams routine.pdf routine.json

  # Non-interactive: course code from the flag
  pdf2exams --course CSE101 routine.pdf routine.json

  # Encrypted routine PDF
  pdf2exams --password secret --course CSE101 routine.pdf routine.json

  # Inspect document metadata (no extraction)
  pdf2exams --inspect-only routine.pdf routine.json

OUTPUT:
  A single JSON document: a metadata block (source, timestamp, entry count,
  field glossary) and an "exams" array of normalized records. Each record
  carries Course, Section, Mid Date, Start/End Time (24-hour), Room, Dept,
  the full row text, and provenance (page, line number, bounding box).

ENVIRONMENT VARIABLES:
  PDF2EXAMS_COURSE     Course code (same as --course)
  PDF2EXAMS_DEPT       Department code (same as --dept)
  PDF2EXAMS_PASSWORD   PDF user password (same as --password)
  PDFIUM_DYNAMIC_LIB_PATH  Directory holding the pdfium shared library
"#;

/// Extract examination-schedule tables from a PDF into structured JSON.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2exams",
    version,
    about = "Extract examination-schedule tables from PDF documents into structured JSON",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the exam-routine PDF.
    input: String,

    /// Path the JSON report is written to (overwritten if present).
    output: PathBuf,

    /// Course code stamped on every record; prompted for when omitted.
    #[arg(long, env = "PDF2EXAMS_COURSE")]
    course: Option<String>,

    /// Department code stamped on every record.
    #[arg(long, env = "PDF2EXAMS_DEPT", default_value = DEFAULT_DEPT)]
    dept: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2EXAMS_PASSWORD")]
    password: Option<String>,

    /// Compact JSON output instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Print document metadata only, no extraction.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input).context("Failed to inspect PDF")?;
        println!("File:         {}", cli.input);
        if let Some(ref t) = meta.title {
            println!("Title:        {}", t);
        }
        if let Some(ref a) = meta.author {
            println!("Author:       {}", a);
        }
        if let Some(ref s) = meta.subject {
            println!("Subject:      {}", s);
        }
        println!("Pages:        {}", meta.page_count);
        println!("PDF Version:  {}", meta.pdf_version);
        if let Some(ref p) = meta.producer {
            println!("Producer:     {}", p);
        }
        if let Some(ref c) = meta.creator {
            println!("Creator:      {}", c);
        }
        return Ok(());
    }

    // ── Course code: flag, or interactive prompt before any processing ───
    let course = match cli.course {
        Some(ref c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => prompt_course_code()?,
    };

    // ── Build config and run ─────────────────────────────────────────────
    let mut builder = ExtractionConfig::builder()
        .course(course)
        .dept(cli.dept.clone())
        .pretty(!cli.compact);
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    let config = builder.build().context("Invalid configuration")?;

    let stats = extract_to_file(&cli.input, &cli.output, &config)
        .context("Extraction failed")?;

    if !cli.quiet {
        eprintln!(
            "{}  {} records  →  {}",
            green("✔"),
            bold(&stats.accepted.to_string()),
            bold(&cli.output.display().to_string()),
        );
        eprintln!(
            "   {}",
            dim(&format!(
                "{} pages, {} candidate rows, {} skipped, {} invalid, {} duplicates, {}ms",
                stats.pages,
                stats.candidate_rows,
                stats.skipped_rows,
                stats.invalid_records,
                stats.duplicate_records,
                stats.duration_ms,
            )),
        );
    }

    Ok(())
}

/// Read the course code from stdin. An empty answer is a hard error; the
/// course is a required record field.
fn prompt_course_code() -> Result<String> {
    print!("Enter the course code for this PDF: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read course code from stdin")?;

    let course = line.trim().to_string();
    if course.is_empty() {
        anyhow::bail!("No course code given");
    }
    Ok(course)
}
