//! crates/fw_report/src/template.rs
//! Named insertion points in an HTML document.
//!
//! Slots are located by `id` or by tag + class, never by position. The scan is
//! lenient about HTML: end-tag names are not checked, void elements (`<meta>`,
//! `<br>`, ...) do not nest, and entities are left untouched. Filling a slot
//! rewrites only the slot's inner content; the rest of the document is kept
//! byte for byte. A self-closed slot (`<td id="x"/>`) becomes an open/close pair.

use std::fmt;
use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::{ReportError, ReportResult, QUESTIONS_TEMPLATE};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Any element with this `id`.
    Id(&'a str),
    /// A `tag` element whose class list contains `class`.
    Class { tag: &'a str, class: &'a str },
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class { tag, class } => write!(f, "<{tag} class=\"{class}\">"),
        }
    }
}

impl Selector<'_> {
    fn matches(&self, start: &BytesStart<'_>) -> bool {
        match self {
            Selector::Id(id) => attr_value(start, b"id").is_some_and(|v| v == *id),
            Selector::Class { tag, class } => {
                local_name(start).eq_ignore_ascii_case(tag)
                    && attr_value(start, b"class")
                        .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == *class))
            }
        }
    }
}

/// How new content relates to what the slot already holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Replace,
    Append,
}

/// Where a slot sits in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    /// Byte range of the inner content.
    Inner(Range<usize>),
    /// Byte range of a self-closed tag, plus its name.
    SelfClosed { tag_range: Range<usize>, name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlTemplate {
    doc: String,
}

impl HtmlTemplate {
    pub fn new(doc: impl Into<String>) -> Self {
        Self { doc: doc.into() }
    }

    /// The built-in Questions Tabled document.
    pub fn questions_tabled() -> Self {
        Self::new(QUESTIONS_TEMPLATE)
    }

    pub fn as_str(&self) -> &str {
        &self.doc
    }

    pub fn into_string(self) -> String {
        self.doc
    }

    pub fn contains(&self, selector: &Selector<'_>) -> ReportResult<bool> {
        Ok(self.find(selector)?.is_some())
    }

    /// Fill the first matching slot with `content` (already HTML).
    /// Returns `false` when the document has no such slot.
    pub fn fill(&mut self, selector: &Selector<'_>, content: &str, mode: Fill) -> ReportResult<bool> {
        let Some(slot) = self.find(selector)? else {
            return Ok(false);
        };
        match slot {
            Slot::Inner(r) => {
                let at = match mode {
                    Fill::Replace => r,
                    Fill::Append => r.end..r.end,
                };
                self.doc.replace_range(at, content);
            }
            Slot::SelfClosed { tag_range, name } => {
                let raw = &self.doc[tag_range.clone()];
                let open = raw.trim_end_matches('>').trim_end_matches('/').trim_end();
                let rebuilt = format!("{open}>{content}</{name}>");
                self.doc.replace_range(tag_range, &rebuilt);
            }
        }
        debug!(slot = %selector, bytes = content.len(), "filled template slot");
        Ok(true)
    }

    /// Like `fill`, but a missing slot is `ReportError::MissingElement`.
    pub fn fill_required(&mut self, selector: &Selector<'_>, content: &str, mode: Fill) -> ReportResult<()> {
        if self.fill(selector, content, mode)? {
            Ok(())
        } else {
            Err(ReportError::MissingElement { selector: selector.to_string() })
        }
    }

    fn find(&self, selector: &Selector<'_>) -> ReportResult<Option<Slot>> {
        let mut reader = Reader::from_str(&self.doc);
        {
            let cfg = reader.config_mut();
            cfg.trim_text(false);
            cfg.check_end_names = false;
            cfg.allow_unmatched_ends = true;
        }

        // Open non-void element names; the target's depth and content start once found.
        let mut open: Vec<String> = Vec::new();
        let mut target: Option<(usize, usize, String)> = None;

        loop {
            let event = reader.read_event().map_err(|e| ReportError::TemplateMarkup {
                position: reader.buffer_position() as usize,
                msg: e.to_string(),
            })?;
            let end = reader.buffer_position() as usize;
            let begin = self.doc[..end].rfind('<').unwrap_or(0);
            match event {
                Event::Start(start) => {
                    let name = local_name(&start).to_ascii_lowercase();
                    let is_void = VOID_ELEMENTS.contains(&name.as_str());
                    if target.is_none() && selector.matches(&start) {
                        if is_void {
                            return Ok(None);
                        }
                        target = Some((open.len(), end, name.clone()));
                    }
                    if !is_void {
                        open.push(name);
                    }
                }
                Event::Empty(start) => {
                    if target.is_none() && selector.matches(&start) {
                        let name = local_name(&start);
                        if VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
                            return Ok(None);
                        }
                        return Ok(Some(Slot::SelfClosed { tag_range: begin..end, name }));
                    }
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
                    // Close back to the nearest open element of this name.
                    if let Some(idx) = open.iter().rposition(|n| *n == name) {
                        open.truncate(idx);
                        if let Some((depth, content_start, _)) = &target {
                            if idx <= *depth {
                                return Ok(Some(Slot::Inner(*content_start..begin)));
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        match target {
            // Unclosed slot: its content runs to the end of the document.
            Some((_, content_start, _)) => Ok(Some(Slot::Inner(content_start..self.doc.len()))),
            None => Ok(None),
        }
    }
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn attr_value(start: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    start
        .html_attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref().eq_ignore_ascii_case(key))
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>t</title></head>
<body>
<h1 id="main_title">Placeholder</h1>
<table><tr><td id="ordinary"/><td id="nameDay">0</td></tr></table>
<div class="section questions"><p>kept</p></div>
<p>tail&nbsp;text<br></p>
</body></html>"#;

    #[test]
    fn replaces_inner_content_by_id() {
        let mut t = HtmlTemplate::new(DOC);
        assert!(t.fill(&Selector::Id("main_title"), "Questions tabled", Fill::Replace).unwrap());
        assert!(t.as_str().contains(r#"<h1 id="main_title">Questions tabled</h1>"#));
        assert!(t.as_str().contains("tail&nbsp;text<br></p>"));
    }

    #[test]
    fn self_closed_slot_is_opened() {
        let mut t = HtmlTemplate::new(DOC);
        t.fill(&Selector::Id("ordinary"), "4", Fill::Replace).unwrap();
        t.fill(&Selector::Id("nameDay"), "2", Fill::Replace).unwrap();
        assert!(t.as_str().contains(r#"<td id="ordinary">4</td><td id="nameDay">2</td>"#));
    }

    #[test]
    fn class_slot_appends_after_existing_content() {
        let mut t = HtmlTemplate::new(DOC);
        let sel = Selector::Class { tag: "div", class: "questions" };
        t.fill_required(&sel, "<h3>x</h3>", Fill::Append).unwrap();
        assert!(t.as_str().contains(r#"<div class="section questions"><p>kept</p><h3>x</h3></div>"#));
    }

    #[test]
    fn missing_slots() {
        let mut t = HtmlTemplate::new(DOC);
        assert!(!t.fill(&Selector::Id("grandTotal"), "9", Fill::Replace).unwrap());
        let err = t
            .fill_required(&Selector::Class { tag: "div", class: "answers" }, "", Fill::Append)
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingElement { .. }));
        assert!(err.to_string().contains(r#"<div class="answers">"#));
        assert_eq!(t.as_str(), DOC);
    }

    #[test]
    fn nested_same_name_elements_close_correctly() {
        let mut t = HtmlTemplate::new(r#"<div id="a"><div>inner</div>after</div><div>b</div>"#);
        t.fill(&Selector::Id("a"), "X", Fill::Replace).unwrap();
        assert_eq!(t.as_str(), r#"<div id="a">X</div><div>b</div>"#);
    }
}
