//! crates/fw_io/src/lib.rs
//! Wire formats and files for Fawcett.
//!
//! - Question feed (EQM "Notice of Questions" JSON) → `Vec<QuestionBlock>`
//! - Answering-body reference (MNIS JSON) → `AnsweringBodyMap`
//! - Business-item XML → `ElementNode` tree
//! - Output writing (explicit path, or a kept temporary file)
//! - Optional HTTP fetch behind the `fetch` feature (fixed timeout, no retries)
//!
//! An empty feed is an error here, never "zero items".

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod bodies;
pub mod business_xml;
pub mod feeds;
pub mod output;

#[cfg(feature = "fetch")]
pub mod fetch;

/// Unified error for fw_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create, persist).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON shape errors with a JSON-Pointer-like hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// XML well-formedness errors with the byte offset reached.
    #[error("xml error at byte {position}: {msg}")]
    Xml { position: u64, msg: String },

    /// The feed parsed but held nothing; stop the invocation.
    #[error("{0} is empty")]
    EmptyFeed(&'static str),

    /// Network failure or non-success status.
    #[error("fetch {uri}: {msg}")]
    Fetch { uri: String, msg: String },
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer; default to root.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

/// Read a whole local file as UTF-8, dropping a leading byte-order mark.
pub(crate) fn read_text(path: &std::path::Path) -> IoResult<String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| IoError::Path(format!("read {}: {e}", path.display())))?;
    Ok(strip_bom(&raw).to_owned())
}

/// MNIS responses tend to start with U+FEFF.
pub(crate) fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}

/// Default feed endpoints. Overridable from the command line / environment.
pub mod endpoints {
    /// Append the tabled date as `YYYY-MM-DD`.
    pub const NOTICE_OF_QUESTIONS_BASE: &str =
        "https://api.eqm.parliament.uk/feed/NoticeOfQuestions.json?preview=true&tabledDate=";
    pub const ANSWERING_BODIES: &str =
        "http://data.parliament.uk/membersdataplatform/services/mnis/ReferenceData/AnsweringBodies/";
    /// Seconds. Applied per request; failures are not retried.
    pub const FETCH_TIMEOUT_SECS: u64 = 30;
}

pub mod prelude {
    pub use crate::{IoError, IoResult};

    pub use crate::bodies::{load_answering_bodies, parse_answering_bodies};
    pub use crate::business_xml::{load_business_xml, parse_business_xml};
    pub use crate::feeds::{load_question_feed, parse_question_feed};
    pub use crate::output::{write_output, OutputTarget};
}
