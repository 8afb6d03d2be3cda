//! crates/fw_report/src/styles.rs
//! Ordered tag style table: source tag → (CSS class, HTML element).
//!
//! Lookup is a linear scan; the first rule whose tag equals the node's tag wins.
//! Duplicate tags are allowed and only the first one is ever used.

use serde::Deserialize;

use crate::{ReportError, ReportResult};

/// Tag whose content is preceded by a line break.
pub const QUESTION_TEXT_TAG: &str = "QnText";
/// Tag whose text is split into sibling paragraphs on `;`.
pub const NOTE_TEXT_TAG: &str = "NoteText";
/// Class used for tags with no rule.
pub const UNFORMATTED_CLASS: &str = "unformatted";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TagStyleRule {
    pub tag: String,
    pub class: String,
    pub element: String,
}

impl TagStyleRule {
    pub fn new(tag: &str, class: &str, element: &str) -> Self {
        Self { tag: tag.to_owned(), class: class.to_owned(), element: element.to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleTable {
    rules: Vec<TagStyleRule>,
}

// (tag, class, element) in lookup order.
const DEFAULT_RULES: &[(&str, &str, &str)] = &[
    ("FawcettError", "unformatted", "p"),
    ("OPHeading1", "paraBusinessTodayChamberHeading", "h3"),
    ("OPHeading2", "paraBusinessSub-SectionHeading", "h4"),
    ("DebateTimingRubric", "paraOrderofBusinessItemTiming", "p"),
    ("Times", "paraOrderofBusinessItemTiming", "p"),
    ("BusinessItemHeadingBulleted", "paraBusinessItemHeading-bulleted", "p"),
    ("NoteHeading", "paraNotesTag", "p"),
    ("NoteText", "paraNotesText", "p"),
    ("BusinessItemHeadingNumbered", "paraBusinessItemHeading", "p"),
    ("Bulleted", "paraBusinessItemHeading-bulleted", "p"),
    ("QuestionRestart", "paraQuestion", "p"),
    ("Question", "paraQuestion", "p"),
    ("PMQ", "paraQuestion", "p"),
    ("TopicalQuestionRestart", "paraQuestion", "p"),
    ("TopicalQuestion", "paraQuestion", "p"),
    ("Number", "number-span", "span"),
    ("Member", "charMember", "span"),
    ("Constit", "charConstituency", "span"),
    ("QnText", "charQuestion", "span"),
    ("UIN", "charUIN", "span"),
    ("MotionSponsor", "paraMotionSponsor", "p"),
    ("MotionSponsorGroup", "paraMotionSponsorGroup row", "p"),
    ("from_cdata", "from_cdata", "span"),
    ("BusinessListItem", "paraBusinessListItem", "p"),
    ("PresenterSponsor", "charPresenterSponsor", "strong"),
    ("MotionCrossHeading", "paraOrderofBusinessItemTiming", "p"),
    ("MinisterialStatement", "paraMinisterialStatement", "p"),
    ("SOReference", "charStandingOrderReference", "span"),
    ("MotionText", "paraMotionText", "p"),
    ("FbaLocation", "FbaLocation", "p"),
    ("BusinessItemHeading", "paraBusinessItemHeading", "p"),
    ("QuestionTimeing", "paraFutureBusinessItemHeadingwithTiming", "p"),
    ("SponsorNotes", "SponsorNotes", "span"),
];

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(tag, class, element)| TagStyleRule::new(tag, class, element))
                .collect(),
        }
    }
}

impl StyleTable {
    pub fn new(rules: Vec<TagStyleRule>) -> Self {
        Self { rules }
    }

    /// Replacement table from a JSON array of `{tag, class, element}` objects.
    pub fn from_json_str(src: &str) -> ReportResult<Self> {
        let rules: Vec<TagStyleRule> =
            serde_json::from_str(src).map_err(|e| ReportError::Styles(e.to_string()))?;
        if rules.is_empty() {
            return Err(ReportError::Styles("no rules".into()));
        }
        for (i, r) in rules.iter().enumerate() {
            if !is_element_name(&r.element) {
                return Err(ReportError::Styles(format!(
                    "rule {i} ({}): {:?} is not an element name",
                    r.tag, r.element
                )));
            }
        }
        Ok(Self { rules })
    }

    /// First rule for `tag`.
    pub fn find(&self, tag: &str) -> Option<&TagStyleRule> {
        self.rules.iter().find(|r| r.tag == tag)
    }

    pub fn rules(&self) -> &[TagStyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn is_element_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_every_rule_in_order() {
        let t = StyleTable::default();
        assert_eq!(t.len(), 33);
        assert_eq!(t.rules()[0].tag, "FawcettError");
        assert_eq!(t.rules()[32].tag, "SponsorNotes");
        assert_eq!(t.find("UIN").map(|r| r.class.as_str()), Some("charUIN"));
        assert!(t.find("FooBar").is_none());
    }

    #[test]
    fn first_match_wins() {
        let t = StyleTable::new(vec![
            TagStyleRule::new("Item", "first", "p"),
            TagStyleRule::new("Item", "second", "div"),
        ]);
        assert_eq!(t.find("Item").map(|r| r.class.as_str()), Some("first"));
    }

    #[test]
    fn json_table_is_validated() {
        let t = StyleTable::from_json_str(r#"[{"tag":"Item","class":"c","element":"h5"}]"#).unwrap();
        assert_eq!(t.len(), 1);
        assert!(StyleTable::from_json_str("[]").is_err());
        assert!(StyleTable::from_json_str(r#"[{"tag":"Item","class":"c","element":"p onclick"}]"#).is_err());
        assert!(StyleTable::from_json_str(r#"{"tag":"Item"}"#).is_err());
    }
}
