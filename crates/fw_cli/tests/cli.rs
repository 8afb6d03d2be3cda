//! End-to-end runs of the `fawcett` binary against the workspace fixtures.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(name)
}

fn fawcett() -> Command {
    let mut cmd = Command::cargo_bin("fawcett").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn questions_tabled_document_is_written_to_out() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("qs.html");

    fawcett()
        .args(["questions", "--date", "2024-05-21", "--quiet"])
        .arg("--feed")
        .arg(fixture("questions_2024-05-21.json"))
        .arg("--bodies")
        .arg(fixture("answering_bodies.json"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("qs.html"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"<h1 id="main_title">Questions tabled on Tuesday 21 May 2024</h1>"#));
    assert!(html.contains(r#"<td id="ordinary">2</td>"#));
    assert!(html.contains(r#"<td id="nameDay">1</td>"#));
    assert!(html.contains(r#"<td id="totalWrittens">3</td>"#));
    assert!(html.contains(r#"<td id="topical">2</td>"#));
    assert!(html.contains(r#"<td id="totalOrals">3</td>"#));
    assert!(html.contains(r#"<td id="grandTotal">6</td>"#));

    // Same-day block is skipped; later dates each get one heading.
    assert!(!html.contains("(900001)"));
    assert!(html.contains("<h3>Questions for Answer on Monday 03 June 2024</h3>"));
    assert!(html.contains("<h3>Questions for Answer on Tuesday 04 June 2024</h3>"));
    assert_eq!(html.matches("<h3>").count(), 2);

    // Wrong department highlighted, transfer and interest flags on the UIN.
    assert!(html.contains("marker-pink"));
    assert!(html.contains("Expected the Secretary of State for Health and Social Care"));
    assert!(html.contains(r#"<span class="uin">[R] [Transferred] (12346)</span>"#));
}

#[test]
fn doc_format_uses_a_kept_temp_file() {
    let assert = fawcett()
        .args(["questions", "--date", "2024-05-21", "--format", "doc", "--quiet"])
        .arg("--feed")
        .arg(fixture("questions_2024-05-21.json"))
        .arg("--bodies")
        .arg(fixture("answering_bodies.json"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let path = PathBuf::from(stdout.trim());
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("QsTabled"));
    assert_eq!(path.extension().unwrap(), "doc");
    assert!(fs::read_to_string(&path).unwrap().contains("questionContainer"));
    let _ = fs::remove_file(path);
}

#[test]
fn order_paper_preview_splices_questions() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("op.html");

    fawcett()
        .args(["order-paper", "--date", "2024-06-03", "--quiet"])
        .arg("--business")
        .arg(fixture("business_fba.xml"))
        .arg("--questions")
        .arg(fixture("questions_op.xml"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Order Paper preview for Monday 03 June 2024"));
    assert!(html.contains(r#"<h3 class="paraBusinessTodayChamberHeading">Future Business</h3>"#));
    assert!(html.contains(r#"<span class="charMember">Jane Doe (Northtown)</span>"#));
    assert!(html.contains(r#"<p class="paraNotesText">First note</p><p class="paraNotesText"> second note</p>"#));
    assert!(html.contains(r#"<p class="unformatted">Raw text</p>"#));
    assert!(!html.contains("There was a problem fetching the questions"));

    let location = html.find("FbaLocation\">Chamber").unwrap();
    let question = html.find("charMember").unwrap();
    let estimates = html.find("Estimates Day").unwrap();
    assert!(location < question && question < estimates);
}

#[test]
fn order_paper_without_questions_shows_the_notice() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("op.html");

    fawcett()
        .args(["order-paper", "--date", "2024-06-03", "--quiet"])
        .arg("--business")
        .arg(fixture("business_fba.xml"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("There was a problem fetching the questions. Please try again later."));
}

#[test]
fn template_without_container_exits_5_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("bad.html");
    fs::write(&template, r#"<html><body><h1 id="main_title"></h1></body></html>"#).unwrap();
    let out = dir.path().join("qs.html");

    fawcett()
        .args(["questions", "--date", "2024-05-21", "--quiet"])
        .arg("--feed")
        .arg(fixture("questions_2024-05-21.json"))
        .arg("--bodies")
        .arg(fixture("answering_bodies.json"))
        .arg("--template")
        .arg(&template)
        .arg("--out")
        .arg(&out)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("missing the required element"));

    assert!(!out.exists());
}

#[test]
fn empty_feed_exits_3() {
    let dir = tempdir().unwrap();
    let feed = dir.path().join("empty.json");
    fs::write(&feed, "[]").unwrap();

    fawcett()
        .args(["questions", "--date", "2024-05-21", "--quiet"])
        .arg("--feed")
        .arg(&feed)
        .arg("--bodies")
        .arg(fixture("answering_bodies.json"))
        .arg("--out")
        .arg(dir.path().join("qs.html"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("question feed is empty"));
}

#[test]
fn bad_arguments_exit_2() {
    fawcett().args(["questions", "--date", "21 May 2024"]).assert().code(2);

    fawcett()
        .args(["questions", "--date", "2024-05-21", "--feed", "no/such/feed.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--feed not found"));
}
