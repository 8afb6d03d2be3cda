//! crates/fw_report/src/order_paper.rs
//! Order Paper preview: business documents rendered in order inside a fixed page.

use minijinja::{context, Environment, Value};
use tracing::info;

use fw_core::{BusinessNode, ElementNode};

use crate::splice::splice_questions;
use crate::styles::StyleTable;
use crate::tree::render_nodes;
use crate::{ReportError, ReportResult};

static PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>{{ title }}</title>
        <link rel="stylesheet" href="https://designsystem.parliament.uk/apps/commons-business/v1.0/css/design-system.css">
        <link rel="stylesheet" href="https://designsystem.parliament.uk/apps/commons-business/v1.0/css/businesspapers.css">
        <style>
            body { font-family: 'Segoe UI', sans-serif; }
            .OP-heading-outdent { margin-left: -2.5rem; }
            .unformatted { color: #cc0033; }
        </style>
    </head>
    <body>
        <main id="main-content">
            <article>
                <div class="container-fluid">
                    <div class="block block-page">
                        <div class="row">
                            <div class="col-md-9 js-toc-content">
                                <div class="OP-left-margin">
                                    <div id="content-goes-here" class="section">
                                        <h2 class="OP-heading-outdent">
                                            Order Paper preview{% if sitting %} for {{ sitting }}{% endif %}
                                        </h2>
                                        <p class="unformatted">
                                            <strong>This is an approximate rendering of Order Paper items.</strong> Some aspects of the Order Paper's layout and content are only finalised at the point of publication. If you have any questions about the limitations of this tool, or notice any issues with the rendering of the information, please contact a member of <a href="https://intranet.parliament.uk/people-offices/offices-departments/commons-departments/chamber-and-participation-team/vote-office1/ppu/" target="_blank">PPU's technology team</a>.
                                        </p>
                                        {{ content }}
                                    </div>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>
            </article>
        </main>
    </body>
</html>
"#;

pub const PAGE_TITLE: &str = "Order Paper Future Business diff";

/// Body HTML for the preview: for each document, in order, its root's children
/// rendered after splicing `questions` behind the `QUESTIONS` placeholder.
pub fn render_order_paper_fragment(
    documents: &[ElementNode],
    questions: &[BusinessNode],
    table: &StyleTable,
) -> String {
    let mut html = String::new();
    for doc in documents {
        let merged = splice_questions(doc, questions);
        html.push_str(&render_nodes(&merged.children, table));
    }
    html
}

/// The complete preview page. `sitting` is shown in the page heading when given.
pub fn render_order_paper(
    documents: &[ElementNode],
    questions: &[BusinessNode],
    table: &StyleTable,
    sitting: Option<&str>,
) -> ReportResult<String> {
    let content = render_order_paper_fragment(documents, questions, table);

    let mut env = Environment::new();
    env.add_template("order_paper.html", PAGE)
        .map_err(|e| ReportError::Page(e.to_string()))?;
    let tmpl = env
        .get_template("order_paper.html")
        .map_err(|e| ReportError::Page(e.to_string()))?;

    let page = tmpl
        .render(context! {
            title => PAGE_TITLE,
            sitting => sitting,
            content => Value::from_safe_string(content),
        })
        .map_err(|e| ReportError::Page(e.to_string()))?;

    info!(documents = documents.len(), bytes = page.len(), "rendered order paper preview");
    Ok(page)
}
