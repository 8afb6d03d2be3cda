//! crates/fw_report/src/tree.rs
//! Business-item tree → HTML string.
//!
//! Per node:
//! - comments render as nothing and are not descended into;
//! - an element with no text and no children renders as nothing;
//! - no style rule: `<p class="unformatted">{text}</p>` (children not rendered);
//! - otherwise `<{element} class="{class}">`, the ballot number spans when the
//!   node is numbered, a line break for question text, the node's own text
//!   (newlines as `<br />`, note text split into sibling paragraphs on `;`),
//!   each child in document order, then the closing tag.
//!
//! Output has no newline separators and depends only on the tree and the table.

use quick_xml::escape::escape;

use fw_core::{BusinessNode, ElementNode};

use crate::esc_text;
use crate::styles::{StyleTable, TagStyleRule, NOTE_TEXT_TAG, QUESTION_TEXT_TAG, UNFORMATTED_CLASS};

pub fn render_nodes(nodes: &[BusinessNode], table: &StyleTable) -> String {
    let mut out = String::new();
    for n in nodes {
        write_node(n, table, &mut out);
    }
    out
}

pub fn render_node(node: &BusinessNode, table: &StyleTable) -> String {
    let mut out = String::new();
    write_node(node, table, &mut out);
    out
}

fn write_node(node: &BusinessNode, table: &StyleTable, out: &mut String) {
    match node {
        BusinessNode::Comment(_) => {}
        BusinessNode::Element(e) => write_element(e, table, out),
    }
}

fn write_element(e: &ElementNode, table: &StyleTable, out: &mut String) {
    if e.is_empty() {
        return;
    }
    let Some(rule) = table.find(&e.tag) else {
        out.push_str("<p class=\"");
        out.push_str(UNFORMATTED_CLASS);
        out.push_str("\">");
        if let Some(text) = &e.text {
            push_text(out, text);
        }
        out.push_str("</p>");
        return;
    };

    push_open(out, rule);
    if let Some(n) = &e.number {
        out.push_str("<span class=\"number-span\"><span class=\"charBallotNumber\">");
        out.push_str(&esc_text(n));
        out.push_str("</span></span>");
    }
    if e.tag == QUESTION_TEXT_TAG {
        out.push_str("<br />");
    }
    if let Some(text) = &e.text {
        if e.tag == NOTE_TEXT_TAG {
            for (i, part) in text.split(';').enumerate() {
                if i > 0 {
                    push_close(out, rule);
                    push_open(out, rule);
                }
                push_text(out, part);
            }
        } else {
            push_text(out, text);
        }
    }
    for child in &e.children {
        write_node(child, table, out);
    }
    push_close(out, rule);
}

fn push_open(out: &mut String, rule: &TagStyleRule) {
    out.push('<');
    out.push_str(&rule.element);
    out.push_str(" class=\"");
    out.push_str(&escape(rule.class.as_str()));
    out.push_str("\">");
}

fn push_close(out: &mut String, rule: &TagStyleRule) {
    out.push_str("</");
    out.push_str(&rule.element);
    out.push('>');
}

/// Escaped text with embedded newlines as line breaks.
fn push_text(out: &mut String, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<br />");
        }
        out.push_str(&esc_text(line));
    }
}
