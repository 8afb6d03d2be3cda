//! crates/fw_annotate/src/body.rs
//! Step 3: split the remainder on "suggested redraft" (any case) and on runs of
//! two or more whitespace characters. Separators become markers, the rest passes
//! through untouched.

use regex::Regex;

use fw_core::{InlineNode, MarkerKind};

use crate::{push_text, TOOLTIP_SPACES};

pub const REDRAFT_PHRASE: &str = "suggested redraft";
/// Visible stand-in for a whitespace run: two non-breaking spaces.
pub const SPACES_GLYPH: &str = "\u{a0}\u{a0}";

pub fn scan_pattern() -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i){}|\s{{2,}}", regex::escape(REDRAFT_PHRASE)))
}

pub fn scan_body(pattern: &Regex, rest: &str, pieces: &mut Vec<InlineNode>) {
    let mut last = 0;
    for m in pattern.find_iter(rest) {
        push_text(pieces, &rest[last..m.start()]);
        let sep = m.as_str();
        if sep.chars().all(char::is_whitespace) {
            pieces.push(InlineNode::marker(MarkerKind::Standard, Some(TOOLTIP_SPACES), SPACES_GLYPH));
        } else {
            pieces.push(InlineNode::marker(MarkerKind::Standard, None, sep.to_uppercase()));
        }
        last = m.end();
    }
    push_text(pieces, &rest[last..]);
}
