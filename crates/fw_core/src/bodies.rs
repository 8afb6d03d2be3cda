//! crates/fw_core/src/bodies.rs
//! Answering-body code → expected display target ("the Secretary of State for ...").
//!
//! Order matters: the annotator scans targets in insertion order and the first
//! match wins. A later entry with a duplicate name overwrites the target but
//! keeps the original position.

use crate::ids::BodyCode;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnsweringBodyMap {
    entries: Vec<(BodyCode, String)>,
}

impl AnsweringBodyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, target)` pairs; later duplicates overwrite earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<BodyCode>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (k, v) in pairs {
            map.insert(k.into(), v.into());
        }
        map
    }

    pub fn insert(&mut self, code: BodyCode, target: String) {
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some(slot) => slot.1 = target,
            None => self.entries.push((code, target)),
        }
    }

    /// Expected target for `code`, if the reference knows it.
    pub fn target(&self, code: &BodyCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, t)| t.as_str())
    }

    /// All targets in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, t)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
