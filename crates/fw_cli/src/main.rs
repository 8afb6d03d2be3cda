//! crates/fw_cli/src/main.rs
//! `fawcett`: load feeds, render, write one output file, print its path.
//!
//! Logs go to stderr; stdout carries only the written path.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad arguments or unusable local paths
    pub const VALIDATION: i32 = 2;
    /// Feed fetch / parse failures, empty feeds
    pub const FEED: i32 = 3;
    pub const IO: i32 = 4;
    /// Template or rendering failures (missing container, bad style table)
    pub const RENDER: i32 = 5;
}

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args, Command, Endpoints, OrderPaperArgs, QuestionsArgs};

use fw_annotate::Annotator;
use fw_core::{AnsweringBodyMap, BusinessNode, Notifier, QuestionBlock, RunContext};
use fw_io::prelude::*;
use fw_report::prelude::*;
use fw_report::questions::LONG_DATE;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Validation(String),
    Feed(String),
    Io(String),
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "{m}"),
            MainError::Feed(m) => write!(f, "feed: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

/// Routes notifications into the log.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn warn(&self, msg: &str) {
        warn!("{msg}");
    }

    fn fail(&self, msg: &str) {
        error!("{msg}");
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("fawcett: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    init_tracing(args.quiet);

    let rc = match run(&args) {
        Ok(path) => {
            println!("{}", path.display());
            exitcodes::OK
        }
        Err(e) => {
            eprintln!("fawcett: error: {e}");
            map_error(&e)
        }
    };

    ExitCode::from(rc as u8)
}

/// `--quiet` pins the filter to `warn`; otherwise `RUST_LOG`, defaulting to `info`.
fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<PathBuf, MainError> {
    match &args.command {
        Command::Questions(q) => run_questions(q),
        Command::OrderPaper(o) => run_order_paper(o),
    }
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Feed(_) => FEED,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Path(m) => MainError::Io(m),
        e @ (IoError::Json { .. } | IoError::Xml { .. } | IoError::EmptyFeed(_) | IoError::Fetch { .. }) => {
            MainError::Feed(e.to_string())
        }
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}

// ----- questions -----

fn run_questions(q: &QuestionsArgs) -> Result<PathBuf, MainError> {
    let blocks = question_feed(q)?;
    let bodies = answering_bodies(q)?;
    info!(blocks = blocks.len(), bodies = bodies.len(), date = %q.date, "feeds loaded");

    let template = match &q.template {
        Some(p) => HtmlTemplate::new(read_local(p)?),
        None => HtmlTemplate::questions_tabled(),
    };

    let annotator = Annotator::new(&bodies).map_err(|e| MainError::Render(e.to_string()))?;
    let notifier = LogNotifier;
    let ctx = RunContext::new(&notifier);

    let (html, list) =
        render_questions_document(template, &blocks, q.date, &annotator, &ctx).map_err(map_report_err)?;
    if list.annotation_failures > 0 {
        warn!(failures = list.annotation_failures, "some questions were left unannotated");
    }

    let target = match &q.out {
        Some(p) => OutputTarget::Path(p.clone()),
        None => OutputTarget::temp("QsTabled", q.format.suffix()),
    };
    write_output(&target, &html).map_err(map_io_err)
}

fn question_feed(q: &QuestionsArgs) -> Result<Vec<QuestionBlock>, MainError> {
    match &q.feed {
        Some(p) => load_question_feed(p).map_err(map_io_err),
        None => fetch_question_feed(&q.endpoints, q.date),
    }
}

fn answering_bodies(q: &QuestionsArgs) -> Result<AnsweringBodyMap, MainError> {
    match &q.bodies {
        Some(p) => load_answering_bodies(p).map_err(map_io_err),
        None => fetch_answering_bodies(&q.endpoints),
    }
}

#[cfg(feature = "fetch")]
fn fetch_question_feed(ep: &Endpoints, date: NaiveDate) -> Result<Vec<QuestionBlock>, MainError> {
    fw_io::fetch::FeedClient::with_endpoints(&ep.noq_uri, &ep.bodies_uri)
        .and_then(|c| c.notice_of_questions(date))
        .map_err(map_io_err)
}

#[cfg(feature = "fetch")]
fn fetch_answering_bodies(ep: &Endpoints) -> Result<AnsweringBodyMap, MainError> {
    fw_io::fetch::FeedClient::with_endpoints(&ep.noq_uri, &ep.bodies_uri)
        .and_then(|c| c.answering_bodies())
        .map_err(map_io_err)
}

#[cfg(not(feature = "fetch"))]
fn fetch_question_feed(ep: &Endpoints, _date: NaiveDate) -> Result<Vec<QuestionBlock>, MainError> {
    Err(no_fetch("--feed", &ep.noq_uri))
}

#[cfg(not(feature = "fetch"))]
fn fetch_answering_bodies(ep: &Endpoints) -> Result<AnsweringBodyMap, MainError> {
    Err(no_fetch("--bodies", &ep.bodies_uri))
}

#[cfg(not(feature = "fetch"))]
fn no_fetch(flag: &str, uri: &str) -> MainError {
    MainError::Validation(format!(
        "{flag} not given and this build cannot fetch {uri} (rebuild with --features fetch)"
    ))
}

// ----- order paper -----

fn run_order_paper(o: &OrderPaperArgs) -> Result<PathBuf, MainError> {
    let documents = o
        .business
        .iter()
        .map(|p| load_business_xml(p))
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_io_err)?;

    // Without question XML the renderer splices the fetch-failure notice.
    let questions: Vec<BusinessNode> = match &o.questions {
        Some(p) => load_business_xml(p).map_err(map_io_err)?.children,
        None => Vec::new(),
    };

    let table = match &o.styles {
        Some(p) => StyleTable::from_json_str(&read_local(p)?).map_err(map_report_err)?,
        None => StyleTable::default(),
    };

    let sitting = o.date.format(LONG_DATE).to_string();
    let page = render_order_paper(&documents, &questions, &table, Some(sitting.as_str())).map_err(map_report_err)?;

    let target = match &o.out {
        Some(p) => OutputTarget::Path(p.clone()),
        None => OutputTarget::temp("order_paper_preview", ".html"),
    };
    write_output(&target, &page).map_err(map_io_err)
}

fn read_local(p: &Path) -> Result<String, MainError> {
    let raw = fs::read_to_string(p).map_err(|e| MainError::Io(format!("read {}: {e}", p.display())))?;
    Ok(raw.trim_start_matches('\u{feff}').to_owned())
}
