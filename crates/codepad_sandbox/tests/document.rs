use codepad_sandbox::assemble;
use pretty_assertions::assert_eq;

const HTML: &str = "<h1>Hello</h1>";
const CSS: &str = "h1 { color: hotpink; }";
const JS: &str = "console.log('hi');";

#[test]
fn embeds_all_three_buffers_verbatim() {
    let doc = assemble(HTML, CSS, JS, 1);
    assert!(doc.contains(HTML));
    assert!(doc.contains(CSS));
    assert!(doc.contains(JS));
}

#[test]
fn produces_a_complete_standalone_document() {
    let doc = assemble(HTML, CSS, JS, 1);
    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("<style>"));
    assert!(doc.contains("</style>"));
    assert!(doc.contains("<script>"));
    assert!(doc.trim_end().ends_with("</html>"));
}

#[test]
fn empty_buffers_still_yield_a_complete_document() {
    let doc = assemble("", "", "", 1);
    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("<body>"));
    assert!(doc.trim_end().ends_with("</html>"));
}

#[test]
fn instrumentation_precedes_the_user_script() {
    let doc = assemble(HTML, CSS, JS, 1);
    let instrumentation = doc.find("__padRun").expect("instrumentation present");
    let user = doc.find(JS).expect("user script present");
    assert!(instrumentation < user);
}

#[test]
fn user_script_runs_inside_the_guard() {
    let doc = assemble(HTML, CSS, JS, 1);
    let guard_open = doc.find("try {").expect("guard open");
    let user = doc.find(JS).expect("user script present");
    let guard_close = doc.find("} catch (error)").expect("guard close");
    assert!(guard_open < user && user < guard_close);
}

#[test]
fn run_identifier_is_stamped() {
    let doc = assemble(HTML, CSS, JS, 7);
    assert!(doc.contains("var __padRun = 7;"));
}

#[test]
fn tolerates_arbitrary_text_in_every_field() {
    // Deliberately hostile inputs, including a premature script close. The
    // builder templates them verbatim and must not panic.
    let junk = "</script><script>alert(1)</script> \" ' ` \\ {} \u{0} é 日本語";
    let doc = assemble(junk, junk, junk, u64::MAX);
    assert_eq!(doc.matches(junk).count(), 3);
}
