//! crates/fw_cli/src/args.rs
//! CLI argument parsing and validation for `fawcett`.
//!
//! Inputs named on the command line are local files only: no URI schemes, and
//! they must exist. Upstream feed endpoints are separate env-backed flags and
//! are only used when a local path is not given.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use fw_io::endpoints;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "fawcett",
    disable_help_subcommand = true,
    about = "Questions Tabled quick proof and Order Paper preview"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Only warnings and errors on stderr
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build the Questions Tabled document for a tabled date
    Questions(QuestionsArgs),
    /// Render business-item XML as an Order Paper preview page
    OrderPaper(OrderPaperArgs),
}

#[derive(Debug, clap::Args, Clone)]
pub struct QuestionsArgs {
    /// Tabled date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Notice of Questions JSON; fetched from --noq-uri when omitted
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// Answering-body reference JSON; fetched from --bodies-uri when omitted
    #[arg(long)]
    pub bodies: Option<PathBuf>,

    /// Questions Tabled HTML template (built-in when omitted)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file (a kept temp file when omitted)
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub endpoints: Endpoints,
}

#[derive(Debug, clap::Args, Clone)]
pub struct OrderPaperArgs {
    /// Sitting date shown in the preview heading (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Business-item XML documents, rendered in the order given
    #[arg(long, required = true, num_args = 1..)]
    pub business: Vec<PathBuf>,

    /// Question XML; its root's children are spliced after QUESTIONS
    #[arg(long)]
    pub questions: Option<PathBuf>,

    /// Tag style table JSON ([{tag, class, element}, ...])
    #[arg(long)]
    pub styles: Option<PathBuf>,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, clap::Args, Clone)]
pub struct Endpoints {
    /// Notice of Questions base URI; the tabled date is appended
    #[arg(long = "noq-uri", env = "FAWCETT_NOQ_URI", default_value = endpoints::NOTICE_OF_QUESTIONS_BASE)]
    pub noq_uri: String,

    #[arg(long = "bodies-uri", env = "FAWCETT_BODIES_URI", default_value = endpoints::ANSWERING_BODIES)]
    pub bodies_uri: String,
}

/// `doc` is the same HTML under a Word-openable suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Doc,
}

impl OutputFormat {
    pub fn suffix(self) -> &'static str {
        match self {
            OutputFormat::Html => ".html",
            OutputFormat::Doc => ".doc",
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    Missing { label: &'static str, path: String },
    NotAFile { label: &'static str, path: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
            CliError::Missing { label, path } => write!(f, "{label} not found: {path}"),
            CliError::NotAFile { label, path } => write!(f, "{label} is not a file: {path}"),
        }
    }
}

impl std::error::Error for CliError {}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("expected a date as YYYY-MM-DD, got {s:?}"))
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    validate(&args)?;
    Ok(args)
}

pub fn validate(args: &Args) -> Result<(), CliError> {
    match &args.command {
        Command::Questions(q) => {
            check_input(q.feed.as_deref(), "--feed")?;
            check_input(q.bodies.as_deref(), "--bodies")?;
            check_input(q.template.as_deref(), "--template")?;
            check_output(q.out.as_deref())
        }
        Command::OrderPaper(o) => {
            for p in &o.business {
                check_input(Some(p), "--business")?;
            }
            check_input(o.questions.as_deref(), "--questions")?;
            check_input(o.styles.as_deref(), "--styles")?;
            check_output(o.out.as_deref())
        }
    }
}

fn check_input(p: Option<&Path>, label: &'static str) -> Result<(), CliError> {
    match p {
        Some(p) => {
            ensure_local_path(p)?;
            ensure_local_exists(p, label)
        }
        None => Ok(()),
    }
}

fn check_output(p: Option<&Path>) -> Result<(), CliError> {
    match p {
        Some(p) => {
            ensure_local_path(p)?;
            if p.is_dir() {
                return Err(CliError::NotAFile { label: "--out", path: p.display().to_string() });
            }
            Ok(())
        }
        None => Ok(()),
    }
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    match fs::metadata(p) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(CliError::NotAFile { label, path: p.display().to_string() }),
        Err(_) => Err(CliError::Missing { label, path: p.display().to_string() }),
    }
}
