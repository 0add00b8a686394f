//! Integration tests reading gtest reports from disk
//!
//! Each test writes a report into a temporary directory and runs it through
//! the public API: parsing, breakdowns and both renderers.

use gtest_report::render::{to_json, to_text, JsonFormat, RenderOptions};
use gtest_report::{parse_file, summarize_file, Error, Outcome, ParseOptions, ReportParser, Verdict};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites tests="7" failures="2" disabled="1" errors="0" timestamp="2024-05-01T10:00:00" time="0.123" name="AllTests" project="Calculator">
  <testsuite name="AddTest" tests="3" failures="0" disabled="0" errors="0" time="0.01" timestamp="2024-05-01T10:00:00" tags="smoke">
    <testcase name="Positive" status="run" result="completed" time="0" timestamp="2024-05-01T10:00:00" classname="AddTest" />
    <testcase name="Negative" status="run" result="completed" time="0" timestamp="2024-05-01T10:00:00" classname="AddTest" />
    <testcase name="Zero" status="run" result="completed" time="0.01" timestamp="2024-05-01T10:00:00" classname="AddTest" />
  </testsuite>
  <testsuite name="DivTest" tests="4" failures="2" disabled="1" errors="0" time="0.113" timestamp="2024-05-01T10:00:00">
    <testcase name="ByOne" status="run" result="completed" time="0.001" timestamp="2024-05-01T10:00:00" classname="DivTest" />
    <testcase name="ByZero" status="run" result="completed" time="0.1" timestamp="2024-05-01T10:00:00" classname="DivTest">
      <failure message="div.cc:20&#x0A;Expected: throws std::domain_error&#x0A;  Actual: it throws nothing." type=""><![CDATA[div.cc:20
Expected: throws std::domain_error
  Actual: it throws nothing.]]></failure>
    </testcase>
    <testcase name="Rounding" status="run" result="completed" time="0.012" timestamp="2024-05-01T10:00:00" classname="DivTest">
      <failure message="div.cc:31&#x0A;Expected equality" type="precision"></failure>
    </testcase>
    <testcase name="DISABLED_Huge" status="notrun" result="suppressed" time="0" timestamp="2024-05-01T10:00:00" classname="DivTest" />
  </testsuite>
</testsuites>
"#;

fn write_report(dir: &TempDir, name: &str, xml: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, xml).expect("write report");
    path
}

#[test]
fn test_parse_report_file() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "test_detail.xml", REPORT);

    let report = parse_file(&path).unwrap();

    assert_eq!(report.source, "test_detail.xml");
    assert_eq!(report.project, "Calculator");
    assert_eq!(report.suites.len(), 2);
    assert_eq!(report.testcase_count(), 7);
    assert_eq!(report.counts.success, 4);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let div = &report.suites[1];
    assert_eq!(div.id, 1);
    assert_eq!(div.cases[1].verdict(), Verdict::Failed);
    assert_eq!(div.cases[2].failures[0].kind.as_deref(), Some("precision"));
    assert_eq!(div.cases[3].verdict(), Verdict::Skipped);

    let failed: Vec<String> = report.failed_cases().map(|(_, c)| c.full_name()).collect();
    assert_eq!(failed, vec!["DivTest.ByZero", "DivTest.Rounding"]);
}

#[test]
fn test_breakdowns_sum_to_100() {
    let dir = TempDir::new().unwrap();
    let report = parse_file(write_report(&dir, "r.xml", REPORT)).unwrap();

    // 4/7, 2/7, 1/7 = 57.14, 28.57, 14.29
    let total = report.breakdown().unwrap();
    assert_eq!(total.percentage(Outcome::Success), 57);
    assert_eq!(total.percentage(Outcome::Fail), 29);
    assert_eq!(total.percentage(Outcome::Disabled), 14);

    for suite in &report.suites {
        let sum: u32 = suite
            .breakdown()
            .unwrap()
            .segments()
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert_eq!(sum, 100, "suite {}", suite.name);
    }

    let add = report.suites[0].breakdown().unwrap();
    let visible: Vec<Outcome> = add.visible_segments().map(|s| s.outcome).collect();
    assert_eq!(visible, vec![Outcome::Success]);
}

#[test]
fn test_summarize_file() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "r.xml", REPORT);

    let text = summarize_file(&path, &RenderOptions::new().with_cases(true)).unwrap();
    assert!(text.starts_with("Calculator\nAllTests (r.xml)"));
    assert!(text.contains("passed 57% (4), failed 29% (2), disabled 14% (1)"));
    assert!(text.contains("[0] AddTest (smoke)"));
    assert!(text.contains("#4 [SKIP] DivTest.DISABLED_Huge"));
    assert!(text.contains("(type = precision)"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let report = parse_file(write_report(&dir, "r.xml", REPORT)).unwrap();

    let json = to_json(&report, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["project"], "Calculator");
    assert_eq!(value["suites"][1]["cases"][1]["status"], "run");
    assert_eq!(value["breakdown"]["segments"][1]["percentage"], 29);
}

#[test]
fn test_report_without_suites() {
    let dir = TempDir::new().unwrap();
    let path = write_report(
        &dir,
        "empty.xml",
        r#"<testsuites tests="0" failures="0" disabled="0" time="0" timestamp="t" name="AllTests"/>"#,
    );

    let report = parse_file(&path).unwrap();
    assert!(report.breakdown().unwrap().is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("empty.xml: "));

    let text = to_text(&report, &RenderOptions::new().with_bar_width(5)).unwrap();
    assert!(text.contains("[#####] passed 100% (0)"));
}

#[test]
fn test_invalid_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "bad.xml", "<testsuite name=\"x\"></testsuite>");

    let err = ReportParser::new(ParseOptions::default())
        .parse_file(&path)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidReport(_)));
    assert!(err.to_string().contains("bad.xml"));
}

#[test]
fn test_malformed_xml_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "broken.xml", "<testsuites><testsuite></testsuites>");

    let err = parse_file(&path).unwrap_err();
    assert!(matches!(err, Error::XmlParse(_)));
}
