//! crates/fw_report/src/splice.rs
//! Pure tree rebuilding: insert nodes right after an anchor child.

use fw_core::{BusinessNode, ElementNode};

/// Tag of the placeholder the day's questions follow.
pub const QUESTIONS_ANCHOR: &str = "QUESTIONS";
pub const FETCH_FAILURE_TAG: &str = "FawcettError";
pub const FETCH_FAILURE_TEXT: &str =
    "There was a problem fetching the questions. Please try again later.";

/// A copy of `root` with `nodes` placed, in order, directly after the first
/// child element tagged `anchor`. `None` when `root` has no such child.
pub fn splice_after(root: &ElementNode, anchor: &str, nodes: &[BusinessNode]) -> Option<ElementNode> {
    let at = root.children.iter().position(|c| c.tag() == Some(anchor))?;

    let mut children = Vec::with_capacity(root.children.len() + nodes.len());
    children.extend_from_slice(&root.children[..=at]);
    children.extend_from_slice(nodes);
    children.extend_from_slice(&root.children[at + 1..]);

    Some(ElementNode {
        tag: root.tag.clone(),
        number: root.number.clone(),
        text: root.text.clone(),
        children,
    })
}

/// Splice question nodes after the `QUESTIONS` placeholder. With no question
/// nodes, a fetch-failure notice goes there instead. Trees without the
/// placeholder are returned unchanged.
pub fn splice_questions(root: &ElementNode, questions: &[BusinessNode]) -> ElementNode {
    let notice;
    let nodes = if questions.is_empty() {
        notice = [BusinessNode::from(
            ElementNode::new(FETCH_FAILURE_TAG).with_text(FETCH_FAILURE_TEXT),
        )];
        &notice[..]
    } else {
        questions
    };
    splice_after(root, QUESTIONS_ANCHOR, nodes).unwrap_or_else(|| root.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(e: &ElementNode) -> Vec<&str> {
        e.children.iter().filter_map(BusinessNode::tag).collect()
    }

    fn business() -> ElementNode {
        ElementNode::new("root")
            .with_child(ElementNode::new("OPHeading1").with_text("Business"))
            .with_child(ElementNode::new(QUESTIONS_ANCHOR))
            .with_child(ElementNode::new("MotionText").with_text("That"))
    }

    #[test]
    fn inserts_in_order_after_anchor_without_touching_input() {
        let root = business();
        let qs = [
            BusinessNode::from(ElementNode::new("Question").with_text("1")),
            BusinessNode::from(ElementNode::new("PMQ").with_text("2")),
        ];
        let merged = splice_after(&root, QUESTIONS_ANCHOR, &qs).unwrap();
        assert_eq!(tags(&merged), ["OPHeading1", "QUESTIONS", "Question", "PMQ", "MotionText"]);
        assert_eq!(tags(&root), ["OPHeading1", "QUESTIONS", "MotionText"]);
    }

    #[test]
    fn missing_anchor_is_none() {
        let root = ElementNode::new("root").with_child(ElementNode::new("MotionText"));
        assert!(splice_after(&root, QUESTIONS_ANCHOR, &[]).is_none());
        assert_eq!(splice_questions(&root, &[]), root);
    }

    #[test]
    fn no_questions_inserts_failure_notice() {
        let merged = splice_questions(&business(), &[]);
        assert_eq!(tags(&merged), ["OPHeading1", "QUESTIONS", FETCH_FAILURE_TAG, "MotionText"]);
        let notice = merged.children[2].as_element().unwrap();
        assert_eq!(notice.text.as_deref(), Some(FETCH_FAILURE_TEXT));
    }
}
