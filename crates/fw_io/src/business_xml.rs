//! Business-item XML → `ElementNode` tree.
//!
//! Mapping rules:
//! - element tag is the local name (namespace prefixes dropped);
//! - the `number` attribute is kept, everything else is ignored;
//! - `text` is the content before the first child element (text and CDATA
//!   concatenated); text after a child is not part of the model;
//! - whitespace-only leading text is dropped when the element has children;
//! - comments are kept as `BusinessNode::Comment`.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use fw_core::{BusinessNode, ElementNode};

use crate::{read_text, strip_bom, IoError, IoResult};

pub fn load_business_xml(path: &Path) -> IoResult<ElementNode> {
    let text = read_text(path)?;
    parse_business_xml(&text)
}

/// Parse one document. Exactly one root element is required.
pub fn parse_business_xml(src: &str) -> IoResult<ElementNode> {
    let mut reader = Reader::from_str(strip_bom(src));
    {
        let cfg = reader.config_mut();
        cfg.trim_text(false);
        cfg.check_end_names = true;
    }

    let mut stack: Vec<ElementNode> = Vec::new();
    let mut root: Option<ElementNode> = None;

    loop {
        let pos = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| IoError::Xml { position: pos, msg: e.to_string() })?;
        match event {
            Event::Start(start) => {
                ensure_single_root(&root, pos)?;
                stack.push(open_element(&start, pos)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root, pos)?;
                let node = open_element(&start, pos)?;
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                let mut node = stack.pop().ok_or_else(|| IoError::Xml {
                    position: pos,
                    msg: "unexpected closing tag".into(),
                })?;
                if !node.children.is_empty()
                    && node.text.as_deref().is_some_and(|t| t.trim().is_empty())
                {
                    node.text = None;
                }
                attach(&mut stack, &mut root, node);
            }
            Event::Text(t) => {
                let s = t
                    .unescape()
                    .map_err(|e| IoError::Xml { position: pos, msg: e.to_string() })?;
                push_text(&mut stack, &s, pos)?;
            }
            Event::CData(c) => {
                let s = String::from_utf8_lossy(&c);
                push_text(&mut stack, &s, pos)?;
            }
            Event::Comment(c) => {
                if let Some(parent) = stack.last_mut() {
                    let body = String::from_utf8_lossy(&c).into_owned();
                    parent.children.push(BusinessNode::Comment(body));
                }
            }
            Event::Eof => break,
            // Declarations, processing instructions and doctypes carry nothing we render.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(IoError::Xml {
            position: reader.buffer_position() as u64,
            msg: format!("unclosed element <{}>", open.tag),
        });
    }
    let root = root.ok_or_else(|| IoError::Xml { position: 0, msg: "no root element".into() })?;
    debug!(tag = %root.tag, children = root.children.len(), "parsed business xml");
    Ok(root)
}

fn ensure_single_root(root: &Option<ElementNode>, pos: u64) -> IoResult<()> {
    if root.is_some() {
        return Err(IoError::Xml { position: pos, msg: "more than one root element".into() });
    }
    Ok(())
}

fn open_element(start: &BytesStart<'_>, pos: u64) -> IoResult<ElementNode> {
    let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut node = ElementNode::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| IoError::Xml { position: pos, msg: e.to_string() })?;
        if attr.key.local_name().as_ref() == b"number" {
            let v = attr
                .unescape_value()
                .map_err(|e| IoError::Xml { position: pos, msg: e.to_string() })?;
            node.number = Some(v.into_owned());
        }
    }
    Ok(node)
}

fn attach(stack: &mut [ElementNode], root: &mut Option<ElementNode>, node: ElementNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(BusinessNode::Element(node)),
        None => *root = Some(node),
    }
}

fn push_text(stack: &mut [ElementNode], s: &str, pos: u64) -> IoResult<()> {
    match stack.last_mut() {
        Some(current) => {
            // Tail text (after a child element) is outside the node model.
            if current.children.iter().all(|c| matches!(c, BusinessNode::Comment(_))) {
                current.text.get_or_insert_with(String::new).push_str(s);
            }
            Ok(())
        }
        None if s.trim().is_empty() => Ok(()),
        None => Err(IoError::Xml { position: pos, msg: "text outside the root element".into() }),
    }
}
