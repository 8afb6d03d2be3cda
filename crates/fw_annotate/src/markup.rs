//! crates/fw_annotate/src/markup.rs
//! Step 5: inline content as marker markup, and back.
//!
//! Marker spans:
//!   `<span class="marker">..</span>`
//!   `<span class="marker" data-toggle="tooltip" title="..">..</span>`
//!   `<span class="marker-pink" data-toggle="tooltip" title="..">..</span>`
//! The fragment is wrapped in `<span class="temporary">` only so it parses as
//! one element; the wrapper never reaches the output.

use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use fw_core::{InlineNode, MarkerKind};

use crate::{push_text, AnnotateError};

pub const WRAPPER_CLASS: &str = "temporary";

/// Serialise inline content as HTML (text escaped, U+00A0 as `&#160;`).
pub fn render_inline(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    write_inline(nodes, &mut out);
    out
}

pub fn write_inline(nodes: &[InlineNode], out: &mut String) {
    for node in nodes {
        match node {
            InlineNode::Text(s) => push_nbsp_safe(out, partial_escape(s.as_str())),
            InlineNode::Marker { kind, tooltip, children } => {
                out.push_str("<span class=\"");
                out.push_str(kind.css_class());
                out.push('"');
                if let Some(t) = tooltip {
                    out.push_str(" data-toggle=\"tooltip\" title=\"");
                    push_nbsp_safe(out, escape(t.as_str()));
                    out.push('"');
                }
                out.push('>');
                write_inline(children, out);
                out.push_str("</span>");
            }
        }
    }
}

/// The assembled, parseable fragment for `nodes`.
pub fn to_fragment(nodes: &[InlineNode]) -> String {
    let mut out = format!("<span class=\"{WRAPPER_CLASS}\">");
    write_inline(nodes, &mut out);
    out.push_str("</span>");
    out
}

fn push_nbsp_safe(out: &mut String, escaped: Cow<'_, str>) {
    if escaped.contains('\u{a0}') {
        out.push_str(&escaped.replace('\u{a0}', "&#160;"));
    } else {
        out.push_str(&escaped);
    }
}

// ----------------------------- Parsing -----------------------------

struct Frame {
    /// `None` for the wrapper.
    marker: Option<(MarkerKind, Option<String>)>,
    children: Vec<InlineNode>,
}

/// Parse a wrapped fragment back into inline content, dropping the wrapper.
/// Only marker spans are accepted inside it.
pub fn parse_fragment(src: &str) -> Result<Vec<InlineNode>, AnnotateError> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut done: Option<Vec<InlineNode>> = None;

    loop {
        let event = reader.read_event().map_err(|e| markup_err(&reader, e))?;
        match event {
            Event::Start(start) => {
                if done.is_some() {
                    return Err(AnnotateError::Markup("content after the wrapper".into()));
                }
                let (class, title) = span_attrs(&start)?;
                if stack.is_empty() {
                    if class.as_deref() != Some(WRAPPER_CLASS) {
                        return Err(AnnotateError::Markup("missing wrapper span".into()));
                    }
                    stack.push(Frame { marker: None, children: Vec::new() });
                } else {
                    let kind = marker_kind(class.as_deref())?;
                    stack.push(Frame { marker: Some((kind, title)), children: Vec::new() });
                }
            }
            Event::Empty(start) => {
                let (class, title) = span_attrs(&start)?;
                let kind = marker_kind(class.as_deref())?;
                let parent = stack
                    .last_mut()
                    .ok_or_else(|| AnnotateError::Markup("marker outside the wrapper".into()))?;
                parent.children.push(InlineNode::Marker { kind, tooltip: title, children: Vec::new() });
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| AnnotateError::Markup("unbalanced closing tag".into()))?;
                match frame.marker {
                    None => done = Some(frame.children),
                    Some((kind, tooltip)) => {
                        let parent = stack
                            .last_mut()
                            .ok_or_else(|| AnnotateError::Markup("marker outside the wrapper".into()))?;
                        parent.children.push(InlineNode::Marker { kind, tooltip, children: frame.children });
                    }
                }
            }
            Event::Text(t) => {
                let s = t.unescape().map_err(|e| markup_err(&reader, e))?;
                match stack.last_mut() {
                    Some(top) => push_text(&mut top.children, &s),
                    None if s.trim().is_empty() => {}
                    None => return Err(AnnotateError::Markup("text outside the wrapper".into())),
                }
            }
            Event::Eof => break,
            _ => return Err(AnnotateError::Markup("unexpected markup in fragment".into())),
        }
    }

    if !stack.is_empty() {
        return Err(AnnotateError::Markup("unclosed span".into()));
    }
    done.ok_or_else(|| AnnotateError::Markup("empty fragment".into()))
}

fn span_attrs(start: &BytesStart<'_>) -> Result<(Option<String>, Option<String>), AnnotateError> {
    if start.local_name().as_ref() != b"span" {
        let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        return Err(AnnotateError::Markup(format!("unexpected element <{tag}>")));
    }
    let mut class = None;
    let mut title = None;
    for attr in start.attributes() {
        let attr = attr.map_err(|e| AnnotateError::Markup(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| AnnotateError::Markup(e.to_string()))?
            .into_owned();
        match attr.key.local_name().as_ref() {
            b"class" => class = Some(value),
            b"title" => title = Some(value),
            _ => {}
        }
    }
    Ok((class, title))
}

fn marker_kind(class: Option<&str>) -> Result<MarkerKind, AnnotateError> {
    class
        .and_then(MarkerKind::from_css_class)
        .ok_or_else(|| AnnotateError::Markup(format!("not a marker span: class={class:?}")))
}

fn markup_err(reader: &Reader<&[u8]>, e: impl std::fmt::Display) -> AnnotateError {
    AnnotateError::Markup(format!("at byte {}: {e}", reader.buffer_position()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<InlineNode> {
        vec![
            InlineNode::marker(MarkerKind::WrongDepartment, Some("Expected \"the\" <Minister>"), "To ask"),
            InlineNode::text(" A & B"),
            InlineNode::marker(MarkerKind::Standard, Some("More than one space"), "\u{a0}\u{a0}"),
            InlineNode::Marker {
                kind: MarkerKind::Standard,
                tooltip: Some("Expected full stop".into()),
                children: vec![InlineNode::marker(MarkerKind::Standard, None, "REDRAFT")],
            },
        ]
    }

    #[test]
    fn renders_marker_spans() {
        let html = render_inline(&sample());
        assert!(html.starts_with(
            "<span class=\"marker-pink\" data-toggle=\"tooltip\" title=\"Expected &quot;the&quot; &lt;Minister&gt;\">To ask</span>"
        ));
        assert!(html.contains(" A &amp; B"));
        assert!(html.contains(">&#160;&#160;</span>"));
        assert!(html.ends_with(
            "<span class=\"marker\" data-toggle=\"tooltip\" title=\"Expected full stop\"><span class=\"marker\">REDRAFT</span></span>"
        ));
    }

    #[test]
    fn fragment_parses_back_to_the_same_content() {
        let nodes = sample();
        assert_eq!(parse_fragment(&to_fragment(&nodes)).unwrap(), nodes);
    }

    #[test]
    fn rejects_foreign_markup() {
        for bad in [
            "<span class=\"temporary\"><b>x</b></span>",
            "<span class=\"temporary\"><span class=\"other\">x</span></span>",
            "<span class=\"marker\">x</span>",
            "<span class=\"temporary\">x",
            "<span class=\"temporary\">a &bogus; b</span>",
            "",
        ] {
            assert!(matches!(parse_fragment(bad), Err(AnnotateError::Markup(_))), "{bad}");
        }
    }
}
