//! Question feed loader: EQM "Notice of Questions" JSON → ordered `QuestionBlock`s.
//!
//! Wire shape (array, display order preserved):
//! `[{ "Date": "YYYY-MM-DD", "Description": "...", "Questions": [{ "Type", "Member",
//!    "Constituency", "Text", "UIN", "IsTransfer", "DeclaredInterest", "AnsweringBody" }] }]`

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use fw_core::{BodyCode, QuestionBlock, QuestionRecord, QuestionType, Uin};

use crate::{read_text, strip_bom, IoError, IoResult};

// ----------------------------- Raw wire types -----------------------------

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Questions", default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(rename = "Member", default)]
    member: Option<String>,
    #[serde(rename = "Constituency", default)]
    constituency: Option<String>,
    #[serde(rename = "Text", default)]
    text: Option<String>,
    #[serde(rename = "UIN", default, deserialize_with = "de_stringish")]
    uin: String,
    #[serde(rename = "IsTransfer", default, deserialize_with = "de_flag")]
    is_transfer: bool,
    #[serde(rename = "DeclaredInterest", default, deserialize_with = "de_flag")]
    declared_interest: bool,
    #[serde(rename = "AnsweringBody", default)]
    answering_body: Option<String>,
}

/// Flags arrive as booleans or as strings (non-empty meaning set).
fn de_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_i64().map_or(true, |v| v != 0),
        Value::Null => false,
        _ => true,
    })
}

/// UINs are usually strings but some feeds emit numbers.
fn de_stringish<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

// ----------------------------- Public API -----------------------------

pub fn load_question_feed(path: &Path) -> IoResult<Vec<QuestionBlock>> {
    let text = read_text(path)?;
    parse_question_feed(&text)
}

/// Parse the feed. An empty array is `IoError::EmptyFeed`.
pub fn parse_question_feed(src: &str) -> IoResult<Vec<QuestionBlock>> {
    let raw: Vec<RawBlock> = serde_json::from_str(strip_bom(src))?;
    if raw.is_empty() {
        return Err(IoError::EmptyFeed("question feed"));
    }

    let mut out = Vec::with_capacity(raw.len());
    for (i, rb) in raw.into_iter().enumerate() {
        let date_text = rb.date.ok_or_else(|| IoError::Json {
            pointer: format!("/{i}/Date"),
            msg: "missing".into(),
        })?;
        let date = parse_feed_date(&date_text).ok_or_else(|| IoError::Json {
            pointer: format!("/{i}/Date"),
            msg: format!("not a YYYY-MM-DD date: {date_text:?}"),
        })?;
        out.push(QuestionBlock {
            date,
            description: rb.description.unwrap_or_default(),
            questions: rb.questions.into_iter().map(into_record).collect(),
        });
    }

    debug!(blocks = out.len(), "parsed question feed");
    Ok(out)
}

/// Accepts `YYYY-MM-DD`, optionally followed by a `T...` time part.
pub fn parse_feed_date(s: &str) -> Option<NaiveDate> {
    let day = s.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn into_record(q: RawQuestion) -> QuestionRecord {
    QuestionRecord {
        text: q.text.unwrap_or_default(),
        member_name: q.member.unwrap_or_default(),
        constituency: q.constituency.unwrap_or_default(),
        question_type: QuestionType::from_wire(q.kind.as_deref()),
        uin: Uin::from(q.uin),
        is_transfer: q.is_transfer,
        has_declared_interest: q.declared_interest,
        answering_body: BodyCode::from(q.answering_body.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
      {
        "Date": "2024-05-21",
        "Description": "Health and Social Care",
        "Questions": [
          {
            "Type": "NAMEDDAY",
            "Member": "Jane Doe",
            "Constituency": "Northtown",
            "Text": "To ask the Secretary of State for Health and Social Care, how many doses were administered.",
            "UIN": 12345,
            "IsTransfer": true,
            "DeclaredInterest": "",
            "AnsweringBody": "Department of Health and Social Care"
          },
          { "Type": "ODDITY", "UIN": "777", "DeclaredInterest": "R" }
        ]
      }
    ]"#;

    #[test]
    fn parses_blocks_and_records() {
        let blocks = parse_question_feed(FEED).unwrap();
        assert_eq!(blocks.len(), 1);
        let b = &blocks[0];
        assert_eq!(b.date, NaiveDate::from_ymd_opt(2024, 5, 21).unwrap());
        assert_eq!(b.description, "Health and Social Care");

        let q = &b.questions[0];
        assert_eq!(q.question_type, QuestionType::NamedDay);
        assert_eq!(q.uin.as_str(), "12345");
        assert!(q.is_transfer);
        assert!(!q.has_declared_interest);

        let q = &b.questions[1];
        assert_eq!(q.question_type, QuestionType::Ordinary);
        assert!(q.has_declared_interest);
        assert!(q.text.is_empty());
    }

    #[test]
    fn empty_feed_is_a_hard_stop() {
        assert!(matches!(parse_question_feed("[]"), Err(IoError::EmptyFeed(_))));
        assert!(matches!(parse_question_feed("\u{feff}[]"), Err(IoError::EmptyFeed(_))));
    }

    #[test]
    fn bad_date_points_at_block() {
        let err = parse_question_feed(r#"[{"Date": "21/05/2024", "Questions": []}]"#).unwrap_err();
        match err {
            IoError::Json { pointer, .. } => assert_eq!(pointer, "/0/Date"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn feed_dates_may_carry_time() {
        assert_eq!(
            parse_feed_date("2024-05-21T00:00:00"),
            NaiveDate::from_ymd_opt(2024, 5, 21)
        );
        assert_eq!(parse_feed_date("yesterday"), None);
    }
}
