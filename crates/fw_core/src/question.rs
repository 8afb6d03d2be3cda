//! crates/fw_core/src/question.rs
//! Tabled question records and the date-headed blocks they arrive in.

use chrono::NaiveDate;

use crate::ids::{BodyCode, Uin};

/// Question category. Governs the numbering prefix, which counter a question
/// increments, and whether the house-style rules apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Ordinary,
    NamedDay,
    Topical,
    Substantive,
}

impl QuestionType {
    /// Map the feed's `Type` string. Anything unrecognised (or absent) is an
    /// ordinary written question, matching how the totals fall through.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some("NAMEDDAY") => QuestionType::NamedDay,
            Some("TOPICAL") => QuestionType::Topical,
            Some("SUBSTANTIVE") => QuestionType::Substantive,
            _ => QuestionType::Ordinary,
        }
    }
}

/// One tabled question, immutable once read from the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRecord {
    pub text: String,
    pub member_name: String,
    pub constituency: String,
    pub question_type: QuestionType,
    pub uin: Uin,
    pub is_transfer: bool,
    pub has_declared_interest: bool,
    pub answering_body: BodyCode,
}

impl QuestionRecord {
    /// Numbering label for the 1-based `position` within its block, including
    /// the trailing space the word-processor output relies on.
    ///
    /// `T3 ` for topical, `3 N ` for named day, `3 ` otherwise.
    pub fn number_label(&self, position: usize) -> String {
        match self.question_type {
            QuestionType::Topical => format!("T{position} "),
            QuestionType::NamedDay => format!("{position} N "),
            _ => format!("{position} "),
        }
    }

    /// Prefix markers shown before the UIN: `[R] ` then `[Transferred] `.
    pub fn uin_label(&self) -> String {
        let mut s = String::new();
        if self.has_declared_interest {
            s.push_str("[R] ");
        }
        if self.is_transfer {
            s.push_str("[Transferred] ");
        }
        s.push('(');
        s.push_str(self.uin.as_str());
        s.push(')');
        s
    }
}

/// Questions sharing an answer date and a description, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionBlock {
    pub date: NaiveDate,
    pub description: String,
    pub questions: Vec<QuestionRecord>,
}
