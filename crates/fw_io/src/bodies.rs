//! Answering-body reference loader (MNIS `ReferenceData/AnsweringBodies`).
//!
//! Accepts the MNIS envelope
//! `{"AnsweringBodies":{"AnsweringBody":[{"Name":..,"Target":..}]}}`
//! (where a single body may appear as an object rather than an array),
//! or a bare array of `{Name, Target}` objects.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use fw_core::AnsweringBodyMap;

use crate::{read_text, strip_bom, IoError, IoResult};

// ----------------------------- Raw wire types -----------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReference {
    Wrapped {
        #[serde(rename = "AnsweringBodies")]
        answering_bodies: RawEnvelope,
    },
    Bare(Vec<RawBody>),
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "AnsweringBody", default)]
    answering_body: OneOrMany,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawBody>),
    One(RawBody),
    #[default]
    None,
}

#[derive(Debug, Deserialize)]
struct RawBody {
    #[serde(rename = "Name", alias = "name", default)]
    name: Option<String>,
    #[serde(rename = "Target", alias = "target", default)]
    target: Option<String>,
}

// ----------------------------- Public API -----------------------------

pub fn load_answering_bodies(path: &Path) -> IoResult<AnsweringBodyMap> {
    let text = read_text(path)?;
    parse_answering_bodies(&text)
}

/// Collapse the reference into an ordered map. Entries without a name are
/// skipped; a missing target becomes the empty string.
pub fn parse_answering_bodies(src: &str) -> IoResult<AnsweringBodyMap> {
    let raw: RawReference = serde_json::from_str(strip_bom(src))?;
    let bodies = match raw {
        RawReference::Bare(v) => v,
        RawReference::Wrapped { answering_bodies } => match answering_bodies.answering_body {
            OneOrMany::Many(v) => v,
            OneOrMany::One(b) => vec![b],
            OneOrMany::None => Vec::new(),
        },
    };

    let map = AnsweringBodyMap::from_pairs(bodies.into_iter().filter_map(|b| {
        let name = b.name.filter(|n| !n.trim().is_empty())?;
        Some((name, b.target.unwrap_or_default()))
    }));

    if map.is_empty() {
        return Err(IoError::EmptyFeed("answering-body reference"));
    }
    debug!(bodies = map.len(), "parsed answering-body reference");
    Ok(map)
}
