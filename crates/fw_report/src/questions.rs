//! crates/fw_report/src/questions.rs
//! Questions Tabled list: one pass over the day's question blocks.
//!
//! - Blocks dated on the chosen day itself are skipped (those are today's
//!   questions, not ones for future answer).
//! - An h3 "Questions for Answer on ..." is emitted when the date changes,
//!   then an h4 per block description, then one line per question.
//! - Every rendered question counts against exactly one `Totals` counter.
//! - A question whose annotation fails is rendered with its plain text and
//!   reported through the notifier; the rest of the run carries on.

use chrono::NaiveDate;
use tracing::{info, warn};

use fw_annotate::{render_inline, AnnotateError, Annotation, Annotator};
use fw_core::{QuestionBlock, QuestionRecord, RunContext, Totals};

use crate::esc_text;
use crate::template::{Fill, HtmlTemplate, Selector};
use crate::ReportResult;

/// `Monday 03 June 2024`
pub const LONG_DATE: &str = "%A %d %B %Y";

pub const QUESTIONS_CONTAINER: Selector<'static> = Selector::Class { tag: "div", class: "questions" };
pub const MAIN_TITLE: Selector<'static> = Selector::Id("main_title");

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionList {
    pub html: String,
    pub totals: Totals,
    pub annotation_failures: usize,
}

pub fn build_question_list(
    blocks: &[QuestionBlock],
    chosen: NaiveDate,
    annotator: &Annotator<'_>,
    ctx: &RunContext<'_>,
) -> QuestionList {
    build_question_list_with(blocks, chosen, ctx, |q, position| annotator.annotate(q, position))
}

/// `build_question_list` with the annotate step supplied by the caller.
pub fn build_question_list_with<F>(
    blocks: &[QuestionBlock],
    chosen: NaiveDate,
    ctx: &RunContext<'_>,
    mut annotate: F,
) -> QuestionList
where
    F: FnMut(&QuestionRecord, usize) -> Result<Annotation, AnnotateError>,
{
    let mut list = QuestionList::default();
    let mut heading_date: Option<NaiveDate> = None;

    for block in blocks.iter().filter(|b| b.date != chosen) {
        if heading_date != Some(block.date) {
            heading_date = Some(block.date);
            list.html.push_str("<h3>Questions for Answer on ");
            list.html.push_str(&block.date.format(LONG_DATE).to_string());
            list.html.push_str("</h3>");
        }
        list.html.push_str("<h4>");
        list.html.push_str(&esc_text(&block.description));
        list.html.push_str("</h4>");

        for (i, q) in block.questions.iter().enumerate() {
            let position = i + 1;
            let (line, annotated) = question_line(q, position, annotate(q, position), ctx);
            if !annotated {
                list.annotation_failures += 1;
            }
            list.html.push_str(&line);
            list.totals.record(q.question_type);
        }
    }

    info!(
        questions = list.totals.grand_total(),
        failures = list.annotation_failures,
        "built question list"
    );
    list
}

/// One `p.questionContainer` line. The flag is `false` when annotation failed
/// and the plain text was used instead.
pub fn render_question_line(
    q: &QuestionRecord,
    position: usize,
    annotator: &Annotator<'_>,
    ctx: &RunContext<'_>,
) -> (String, bool) {
    question_line(q, position, annotator.annotate(q, position), ctx)
}

fn question_line(
    q: &QuestionRecord,
    position: usize,
    annotation: Result<Annotation, AnnotateError>,
    ctx: &RunContext<'_>,
) -> (String, bool) {
    let (text_html, annotated) = match annotation {
        Ok(a) => (render_inline(&a.nodes), true),
        Err(e) => {
            ctx.notifier.fail(&format!("question {}: {e}", q.uin));
            (esc_text(&q.text).into_owned(), false)
        }
    };

    let mut out = String::with_capacity(text_html.len() + 256);
    out.push_str("<p class=\"questionContainer\">");
    out.push_str("<span class=\"questionNumber\">");
    out.push_str(&q.number_label(position));
    out.push_str("</span><strong class=\"memberName\">");
    out.push_str(&esc_text(&q.member_name));
    out.push_str(" </strong><span class=\"memberConstituency\">(");
    out.push_str(&esc_text(&q.constituency));
    out.push_str("): </span><span class=\"questionText\">");
    out.push_str(&text_html);
    out.push_str("</span><span class=\"uin\">");
    out.push_str(&esc_text(&q.uin_label()));
    out.push_str("</span></p>");
    (out, annotated)
}

/// Populate a Questions Tabled document: the container (required), the main
/// title and the seven totals slots. Missing optional slots are logged and
/// reported as warnings. On error nothing is returned.
pub fn render_questions_document(
    template: HtmlTemplate,
    blocks: &[QuestionBlock],
    chosen: NaiveDate,
    annotator: &Annotator<'_>,
    ctx: &RunContext<'_>,
) -> ReportResult<(String, QuestionList)> {
    let mut doc = template;
    if !doc.contains(&QUESTIONS_CONTAINER)? {
        return Err(crate::ReportError::MissingElement { selector: QUESTIONS_CONTAINER.to_string() });
    }

    let list = build_question_list(blocks, chosen, annotator, ctx);

    doc.fill_required(&QUESTIONS_CONTAINER, &list.html, Fill::Append)?;

    let title = format!("Questions tabled on {}", chosen.format(LONG_DATE));
    doc.fill(&MAIN_TITLE, &esc_text(&title), Fill::Replace)?;

    for (id, value) in list.totals.slots() {
        if !doc.fill(&Selector::Id(id), &value.to_string(), Fill::Replace)? {
            warn!(slot = id, "totals slot not found in template");
            ctx.notifier.warn(&format!("totals slot #{id} not found in the template"));
        }
    }

    Ok((doc.into_string(), list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_core::{AnsweringBodyMap, BodyCode, QuestionType, RecordingNotifier, Uin};

    fn q(kind: QuestionType, text: &str, uin: &str) -> QuestionRecord {
        QuestionRecord {
            text: text.into(),
            member_name: "Jane Doe".into(),
            constituency: "Northtown".into(),
            question_type: kind,
            uin: Uin::from(uin),
            is_transfer: false,
            has_declared_interest: false,
            answering_body: BodyCode::from("Treasury"),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn blocks() -> Vec<QuestionBlock> {
        let ok = "To ask the Chancellor of the Exchequer, what steps.";
        vec![
            QuestionBlock {
                date: day(2024, 5, 21),
                description: "Today".into(),
                questions: vec![q(QuestionType::Ordinary, ok, "1")],
            },
            QuestionBlock {
                date: day(2024, 6, 3),
                description: "Treasury".into(),
                questions: vec![q(QuestionType::Ordinary, ok, "2"), q(QuestionType::NamedDay, ok, "3")],
            },
            QuestionBlock {
                date: day(2024, 6, 3),
                description: "Treasury & Co".into(),
                questions: vec![q(QuestionType::Topical, "If he will", "4"), q(QuestionType::Topical, "If", "5")],
            },
            QuestionBlock {
                date: day(2024, 6, 4),
                description: "Orals".into(),
                questions: vec![q(QuestionType::Substantive, "What", "6")],
            },
        ]
    }

    fn map() -> AnsweringBodyMap {
        AnsweringBodyMap::from_pairs([("Treasury", "the Chancellor of the Exchequer")])
    }

    #[test]
    fn headings_are_run_length_compressed_and_today_is_skipped() {
        let map = map();
        let annotator = Annotator::new(&map).unwrap();
        let n = RecordingNotifier::new();
        let list = build_question_list(&blocks(), day(2024, 5, 21), &annotator, &RunContext::new(&n));

        assert_eq!(list.html.matches("<h3>").count(), 2);
        assert!(list.html.contains("<h3>Questions for Answer on Monday 03 June 2024</h3>"));
        assert!(list.html.contains("<h4>Treasury &amp; Co</h4>"));
        assert!(!list.html.contains("Today"));

        assert_eq!(list.totals.ordinary, 1);
        assert_eq!(list.totals.name_day, 1);
        assert_eq!(list.totals.topical, 2);
        assert_eq!(list.totals.substantive, 1);
        assert_eq!(list.totals.grand_total(), 5);
        assert!(n.failures().is_empty());
    }

    #[test]
    fn question_line_layout() {
        let map = map();
        let annotator = Annotator::new(&map).unwrap();
        let n = RecordingNotifier::new();
        let mut rec = q(QuestionType::NamedDay, "To ask the Chancellor of the Exchequer, what steps.", "900123");
        rec.is_transfer = true;
        rec.has_declared_interest = true;
        let (line, annotated) = render_question_line(&rec, 2, &annotator, &RunContext::new(&n));
        assert!(annotated);
        assert_eq!(
            line,
            concat!(
                r#"<p class="questionContainer"><span class="questionNumber">2 N </span>"#,
                r#"<strong class="memberName">Jane Doe </strong>"#,
                r#"<span class="memberConstituency">(Northtown): </span>"#,
                r#"<span class="questionText">To ask the Chancellor of the Exchequer, what steps.</span>"#,
                r#"<span class="uin">[R] [Transferred] (900123)</span></p>"#
            )
        );
    }

    #[test]
    fn second_topical_is_not_annotated() {
        let map = map();
        let annotator = Annotator::new(&map).unwrap();
        let n = RecordingNotifier::new();
        let ctx = RunContext::new(&n);
        let (first, _) = render_question_line(&q(QuestionType::Topical, "If he will", "4"), 1, &annotator, &ctx);
        let (second, _) = render_question_line(&q(QuestionType::Topical, "If he will", "5"), 2, &annotator, &ctx);
        assert!(first.contains("marker-pink"));
        assert!(second.contains(r#"<span class="questionText">If he will</span>"#));
        assert!(second.contains(">T2 </span>"));
    }

    #[test]
    fn failed_annotation_keeps_plain_text_and_the_batch_going() {
        let map = map();
        let annotator = Annotator::new(&map).unwrap();
        let n = RecordingNotifier::new();
        let rec = q(QuestionType::Ordinary, "To ask the Chancellor of the Exchequer, what <b> & co", "77");
        let day_blocks = vec![QuestionBlock {
            date: day(2024, 6, 3),
            description: "Treasury".into(),
            questions: vec![
                q(QuestionType::Ordinary, "To ask the Chancellor of the Exchequer, what steps", "76"),
                rec,
                q(QuestionType::NamedDay, "To ask the Chancellor of the Exchequer, how many", "78"),
            ],
        }];

        let list = build_question_list_with(&day_blocks, day(2024, 5, 21), &RunContext::new(&n), |q, pos| {
            if q.uin.as_str() == "77" {
                Err(AnnotateError::Markup("unexpected element".into()))
            } else {
                annotator.annotate(q, pos)
            }
        });

        assert!(list.html.contains(
            r#"<span class="questionText">To ask the Chancellor of the Exchequer, what &lt;b&gt; &amp; co</span>"#
        ));
        assert_eq!(list.annotation_failures, 1);
        assert_eq!(n.failures().len(), 1);
        assert!(n.failures()[0].contains("77"));

        // Neighbours are still annotated: both lack a final full stop.
        assert_eq!(list.html.matches("Expected full stop").count(), 2);
        assert!(list.html.contains("(78)"));
        assert_eq!(list.totals.ordinary, 2);
        assert_eq!(list.totals.name_day, 1);
        assert_eq!(list.totals.grand_total(), 3);
    }

    #[test]
    fn document_fills_every_slot() {
        let map = map();
        let annotator = Annotator::new(&map).unwrap();
        let n = RecordingNotifier::new();
        let (html, list) = render_questions_document(
            HtmlTemplate::questions_tabled(),
            &blocks(),
            day(2024, 5, 21),
            &annotator,
            &RunContext::new(&n),
        )
        .unwrap();
        assert!(html.contains(r#"<h1 id="main_title">Questions tabled on Tuesday 21 May 2024</h1>"#));
        assert!(html.contains(r#"<td id="grandTotal">5</td>"#));
        assert!(html.contains(r#"<td id="totalWrittens">2</td>"#));
        assert!(html.contains(r#"<td id="totalOrals">3</td>"#));
        assert!(html.contains("questionContainer"));
        assert!(n.warnings().is_empty());
        assert_eq!(list.totals.grand_total(), 5);
    }

    #[test]
    fn missing_container_aborts_and_missing_totals_warn() {
        let map = map();
        let annotator = Annotator::new(&map).unwrap();
        let n = RecordingNotifier::new();
        let ctx = RunContext::new(&n);

        let err = render_questions_document(
            HtmlTemplate::new("<html><body><h1 id=\"main_title\"></h1></body></html>"),
            &blocks(),
            day(2024, 5, 21),
            &annotator,
            &ctx,
        )
        .unwrap_err();
        assert!(matches!(err, crate::ReportError::MissingElement { .. }));

        let (html, _) = render_questions_document(
            HtmlTemplate::new("<html><body><div class=\"questions\"></div></body></html>"),
            &blocks(),
            day(2024, 5, 21),
            &annotator,
            &ctx,
        )
        .unwrap();
        assert!(html.contains("questionContainer"));
        assert_eq!(n.warnings().len(), 7);
    }
}
