//! crates/fw_annotate/src/opening.rs
//! Steps 1 and 2: the "To ask {target}" opening and the comma after it.

use fw_core::{AnsweringBodyMap, BodyCode, InlineNode, MarkerKind};

use crate::{push_text, TOOLTIP_COMMA};

/// Characters consumed by the missing-opening fallback.
pub const FALLBACK_SPAN_CHARS: usize = 6;

/// Exactly one of these per annotated question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpeningOutcome {
    /// Starts with the phrase for its own answering body; left unmarked.
    Correct,
    /// Starts with another department's phrase; that phrase is marked pink.
    WrongDepartment,
    /// No department phrase at all; the first few characters are marked pink.
    Missing,
}

#[derive(Debug)]
pub struct OpeningCheck<'t> {
    pub outcome: OpeningOutcome,
    /// Text after the consumed opening.
    pub rest: &'t str,
}

/// Consume the opening of `text`, appending its piece to `pieces`.
pub fn check_opening<'t>(
    text: &'t str,
    body: &BodyCode,
    bodies: &AnsweringBodyMap,
    pieces: &mut Vec<InlineNode>,
) -> OpeningCheck<'t> {
    let expected = bodies.target(body).filter(|t| !t.is_empty());

    if let Some(target) = expected {
        if let Some(rest) = strip_to_ask(text, target) {
            push_text(pieces, &text[..text.len() - rest.len()]);
            return OpeningCheck { outcome: OpeningOutcome::Correct, rest };
        }
    }

    // The tooltip names what the answering body expects; an unknown or target-less body is named by its code.
    let tooltip = format!("Expected {}", expected.unwrap_or(body.as_str()));

    for target in bodies.targets().filter(|t| !t.is_empty()) {
        if let Some(rest) = strip_to_ask(text, target) {
            let phrase = &text[..text.len() - rest.len()];
            pieces.push(InlineNode::marker(MarkerKind::WrongDepartment, Some(tooltip.as_str()), phrase));
            return OpeningCheck { outcome: OpeningOutcome::WrongDepartment, rest };
        }
    }

    let cut = text
        .char_indices()
        .nth(FALLBACK_SPAN_CHARS)
        .map_or(text.len(), |(i, _)| i);
    let (span, rest) = text.split_at(cut);
    if !span.is_empty() {
        pieces.push(InlineNode::marker(MarkerKind::WrongDepartment, Some(tooltip.as_str()), span));
    }
    OpeningCheck { outcome: OpeningOutcome::Missing, rest }
}

/// Mark the first character as a missing comma unless `rest` starts with one.
/// Returns what is left to scan.
pub fn check_comma<'t>(rest: &'t str, pieces: &mut Vec<InlineNode>) -> &'t str {
    if rest.starts_with(',') {
        return rest;
    }
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => {
            pieces.push(InlineNode::marker(
                MarkerKind::Standard,
                Some(TOOLTIP_COMMA),
                first.to_string(),
            ));
            chars.as_str()
        }
        None => rest,
    }
}

fn strip_to_ask<'t>(text: &'t str, target: &str) -> Option<&'t str> {
    text.strip_prefix("To ask ")?.strip_prefix(target)
}
