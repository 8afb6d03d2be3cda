//! crates/fw_core/src/totals.rs
//! Per-run question counters. Four base counters, mutually exclusive; the
//! three sums are always derived, never stored.

use crate::question::QuestionType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub ordinary: u32,
    pub name_day: u32,
    pub topical: u32,
    pub substantive: u32,
}

impl Totals {
    /// Count one question against exactly one base counter.
    pub fn record(&mut self, kind: QuestionType) {
        match kind {
            QuestionType::Substantive => self.substantive += 1,
            QuestionType::Topical => self.topical += 1,
            QuestionType::NamedDay => self.name_day += 1,
            QuestionType::Ordinary => self.ordinary += 1,
        }
    }

    #[inline]
    pub fn total_writtens(&self) -> u32 {
        self.ordinary + self.name_day
    }

    #[inline]
    pub fn total_orals(&self) -> u32 {
        self.substantive + self.topical
    }

    #[inline]
    pub fn grand_total(&self) -> u32 {
        self.total_writtens() + self.total_orals()
    }

    /// `(slot id, value)` pairs for the totals table, in table order.
    pub fn slots(&self) -> [(&'static str, u32); 7] {
        [
            ("ordinary", self.ordinary),
            ("nameDay", self.name_day),
            ("totalWrittens", self.total_writtens()),
            ("substantive", self.substantive),
            ("topical", self.topical),
            ("totalOrals", self.total_orals()),
            ("grandTotal", self.grand_total()),
        ]
    }
}
