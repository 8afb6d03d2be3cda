//! fw_report/src/lib.rs: pure rendering for Fawcett (HTML strings in, HTML strings out).
//!
//! - `tree`: business-item tree → HTML through the ordered tag style table
//! - `splice`: pure insert-after for question nodes in a business tree
//! - `questions`: Questions Tabled list (headings, question lines) + totals
//! - `template`: named insertion points in an HTML document (by id / class)
//! - `order_paper`: the Order Paper preview page
//!
//! No network and no file access here; callers supply parsed inputs.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod order_paper;
pub mod questions;
pub mod splice;
pub mod styles;
pub mod template;
pub mod tree;

/// Built-in Questions Tabled document (title, totals table, questions container).
pub const QUESTIONS_TEMPLATE: &str = include_str!("../templates/questions_tabled.html");

#[derive(Debug, Error)]
pub enum ReportError {
    /// A required insertion point is absent; nothing is produced.
    #[error(
        "the template HTML is missing the required element {selector}; \
         no output can be created, amend the template and try again"
    )]
    MissingElement { selector: String },

    /// The template document could not be scanned.
    #[error("template markup at byte {position}: {msg}")]
    TemplateMarkup { position: usize, msg: String },

    /// Page template rendering (minijinja).
    #[error("page template: {0}")]
    Page(String),

    /// Tag style table could not be read.
    #[error("tag style table: {0}")]
    Styles(String),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Escape text content for HTML (`&`, `<`, `>`).
pub(crate) fn esc_text(s: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::partial_escape(s)
}

pub mod prelude {
    pub use crate::{ReportError, ReportResult, QUESTIONS_TEMPLATE};

    pub use crate::order_paper::{render_order_paper, render_order_paper_fragment};
    pub use crate::questions::{build_question_list, build_question_list_with, render_questions_document, QuestionList};
    pub use crate::splice::{splice_after, splice_questions};
    pub use crate::styles::{StyleTable, TagStyleRule};
    pub use crate::template::{Fill, HtmlTemplate, Selector};
    pub use crate::tree::{render_node, render_nodes};
}
