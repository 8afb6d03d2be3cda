// crates/fw_annotate/src/lib.rs
//! House-style annotator for tabled question text.
//!
//! Pipeline per eligible question (left to right over a shrinking remainder,
//! already-annotated spans are never re-scanned):
//!   1. opening phrase ("To ask {target}"): correct, wrong department or missing
//!   2. comma after the opening (skipped after the missing-opening fallback)
//!   3. body scan: "suggested redraft" and runs of 2+ whitespace
//!   4. terminal full stop
//!   5. assemble marked-up fragment, parse it back as inline content
//!
//! Only written questions (ORDINARY, NAMEDDAY) get the full rule set. A TOPICAL
//! question leading its block gets step 1 only; everything else passes through.

#![forbid(unsafe_code)]

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use fw_core::{AnsweringBodyMap, BodyCode, InlineNode, MarkerKind, QuestionRecord, QuestionType};

pub mod body;
pub mod markup;
pub mod opening;

pub use markup::{parse_fragment, render_inline, to_fragment};
pub use opening::OpeningOutcome;

pub const TOOLTIP_FULL_STOP: &str = "Expected full stop";
pub const TOOLTIP_COMMA: &str = "Expected comma";
pub const TOOLTIP_SPACES: &str = "More than one space";

#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The assembled fragment did not parse back as inline content.
    #[error("annotated fragment is not valid inline content: {0}")]
    Markup(String),
    #[error("body scan pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Which rules apply to a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationScope {
    Full,
    OpeningOnly,
    None,
}

impl AnnotationScope {
    /// `position` is 1-based within the question's block.
    pub fn for_question(kind: QuestionType, position: usize) -> Self {
        match kind {
            QuestionType::Ordinary | QuestionType::NamedDay => AnnotationScope::Full,
            QuestionType::Topical if position == 1 => AnnotationScope::OpeningOnly,
            QuestionType::Topical | QuestionType::Substantive => AnnotationScope::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub scope: AnnotationScope,
    /// `None` when the opening check did not run (exempt type or empty text).
    pub opening: Option<OpeningOutcome>,
    pub nodes: Vec<InlineNode>,
}

impl Annotation {
    fn passthrough(scope: AnnotationScope, text: &str) -> Self {
        let nodes = if text.is_empty() { Vec::new() } else { vec![InlineNode::text(text)] };
        Self { scope, opening: None, nodes }
    }
}

/// Holds the per-run reference data and the compiled body-scan pattern.
pub struct Annotator<'m> {
    bodies: &'m AnsweringBodyMap,
    scan: Regex,
}

impl<'m> Annotator<'m> {
    pub fn new(bodies: &'m AnsweringBodyMap) -> Result<Self, AnnotateError> {
        Ok(Self { bodies, scan: body::scan_pattern()? })
    }

    pub fn annotate(&self, q: &QuestionRecord, position: usize) -> Result<Annotation, AnnotateError> {
        self.annotate_text(&q.text, q.question_type, position, &q.answering_body)
    }

    pub fn annotate_text(
        &self,
        text: &str,
        kind: QuestionType,
        position: usize,
        body: &BodyCode,
    ) -> Result<Annotation, AnnotateError> {
        let scope = AnnotationScope::for_question(kind, position);
        if scope == AnnotationScope::None || text.is_empty() {
            return Ok(Annotation::passthrough(scope, text));
        }

        let mut pieces = Vec::new();
        let opened = opening::check_opening(text, body, self.bodies, &mut pieces);
        if opened.outcome != OpeningOutcome::Correct {
            debug!(body = %body, outcome = ?opened.outcome, "opening phrase flagged");
        }

        if scope == AnnotationScope::Full {
            let mut rest = opened.rest;
            if opened.outcome != OpeningOutcome::Missing {
                rest = opening::check_comma(rest, &mut pieces);
            }
            body::scan_body(&self.scan, rest, &mut pieces);
            mark_terminal(&mut pieces);
        } else {
            push_text(&mut pieces, opened.rest);
        }

        let nodes = parse_fragment(&to_fragment(&pieces))?;
        Ok(Annotation { scope, opening: Some(opened.outcome), nodes })
    }
}

// ----------------------------- Step 4: terminal full stop -----------------------------

/// Wrap the final character in a full-stop marker unless it is a period.
/// When the last piece is already a marker, the whole marker is wrapped.
fn mark_terminal(pieces: &mut Vec<InlineNode>) {
    if InlineNode::plain_text(pieces).ends_with('.') {
        return;
    }
    match pieces.pop() {
        None => {}
        Some(InlineNode::Text(s)) => {
            let Some((idx, last)) = s.char_indices().next_back() else {
                return;
            };
            push_text(pieces, &s[..idx]);
            pieces.push(InlineNode::marker(
                MarkerKind::Standard,
                Some(TOOLTIP_FULL_STOP),
                last.to_string(),
            ));
        }
        Some(marker) => pieces.push(InlineNode::Marker {
            kind: MarkerKind::Standard,
            tooltip: Some(TOOLTIP_FULL_STOP.to_owned()),
            children: vec![marker],
        }),
    }
}

/// Append text, merging with a trailing text piece.
pub(crate) fn push_text(pieces: &mut Vec<InlineNode>, s: &str) {
    if s.is_empty() {
        return;
    }
    if let Some(InlineNode::Text(prev)) = pieces.last_mut() {
        prev.push_str(s);
    } else {
        pieces.push(InlineNode::text(s));
    }
}
