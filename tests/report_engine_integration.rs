mod common;

use common::{boxed, texts, Workspace};
use indoc::indoc;
use lintmux::cli::{render, OutputFormat};
use lintmux::engine::ReportEngine;

const REPORT: &str = indoc! {r#"
    [
      {
        "text": "unused variable count",
        "pos": { "filename": "src/lib.rs", "line": 2, "column": 9 }
      },
      {
        "from_engine": "clippy::style",
        "text": "redundant clone",
        "severity": "warning",
        "pos": { "filename": "src/lib.rs", "line": 3 }
      }
    ]
"#};

fn workspace() -> Workspace {
    Workspace::new()
        .file(
            "src/lib.rs",
            "pub fn f() {\n    let count = 1;\n    let y = count.clone();\n}\n",
        )
        .file("reports/clippy.json", REPORT)
}

#[test]
fn test_report_issues_flow_through_the_chain() {
    let ws = workspace();
    let outcome = ws.run(&[boxed(ReportEngine::new("clippy", "reports/clippy.json"))]);

    assert!(outcome.error.is_none());
    assert_eq!(
        texts(&outcome.issues),
        vec!["unused variable `count`", "redundant clone"]
    );
    assert_eq!(outcome.issues[0].from_engine, "clippy");
    assert_eq!(outcome.issues[1].from_engine, "clippy::style");
    assert_eq!(outcome.issues[1].source_lines, vec!["    let y = count.clone();"]);
}

#[test]
fn test_missing_report_is_an_engine_failure() {
    let ws = workspace().configure(|c| c.run.fail_fast = true);
    let outcome = ws.run(&[boxed(ReportEngine::new("gone", "reports/missing.json"))]);

    let error = outcome.error.expect("missing report fails the engine");
    assert_eq!(error.engine(), "gone");
    assert!(error.to_string().contains("Failed to read report"));
    assert!(outcome.issues.is_empty());
}

#[test]
fn test_json_output_round_trips_kept_fields() {
    let ws = workspace();
    let outcome = ws.run(&[boxed(ReportEngine::new("clippy", "reports/clippy.json"))]);
    let json = render(&outcome.issues, OutputFormat::Json).unwrap();
    let parsed: Vec<lintmux::Issue> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, outcome.issues);
}
