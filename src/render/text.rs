//! Plain text renderer implementation.

use crate::error::Result;
use crate::model::{Report, Suite, TestCase, Verdict};
use crate::summary::Breakdown;
use unicode_width::UnicodeWidthStr;

use super::bar::{bar, segment_label};
use super::options::RenderOptions;

const SUITE_HEADER: [&str; 7] = ["#", "Suite", "Tests", "Passed", "Failed", "Disabled", "Time"];

/// Convert a Report to plain text.
pub fn to_text(report: &Report, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    output.push_str(&report.project);
    output.push('\n');
    output.push_str(&format!("{} ({})\n", report.name, report.source));
    output.push_str(&format!(
        "Author: {} | Time: {} | Timestamp: {}\n\n",
        report.author, report.time, report.timestamp
    ));

    let total = report.breakdown()?;
    output.push_str(&format!("Total: {} tests\n", report.counts.total));
    output.push_str(&render_breakdown(&total, options)?);
    output.push_str("\n\n");

    if !report.suites.is_empty() {
        output.push_str(&render_suite_table(&report.suites));
        output.push_str("\n\n");
    }

    for suite in &report.suites {
        let breakdown = suite.breakdown()?;
        output.push_str(&format!("[{}] {}", suite.id, suite.name));
        if !suite.tags.is_empty() {
            output.push_str(&format!(" ({})", suite.tags));
        }
        output.push('\n');
        output.push_str(&render_breakdown(&breakdown, options)?);
        output.push('\n');

        if options.list_cases {
            for case in &suite.cases {
                output.push_str(&render_case(case, options));
            }
        }
        output.push('\n');
    }

    if options.include_warnings && !report.warnings.is_empty() {
        output.push_str("Warnings:\n");
        for warning in &report.warnings {
            output.push_str(&format!("  ! {}\n", warning));
        }
    }

    Ok(output.trim_end().to_string())
}

/// Bar line followed by the segment labels.
fn render_breakdown(breakdown: &Breakdown, options: &RenderOptions) -> Result<String> {
    let labels: Vec<String> = breakdown.visible_segments().map(segment_label).collect();
    let labels = labels.join(", ");

    if options.bar_width == 0 {
        return Ok(format!("  {}", labels));
    }
    Ok(format!("  [{}] {}", bar(breakdown, options.bar_width)?, labels))
}

fn verdict_tag(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Passed => "PASS",
        Verdict::Skipped => "SKIP",
        Verdict::Failed => "FAIL",
    }
}

fn render_case(case: &TestCase, options: &RenderOptions) -> String {
    let mut out = format!(
        "  #{} [{}] {} ({}s)",
        case.number,
        verdict_tag(case.verdict()),
        case.full_name(),
        case.time
    );
    if !case.tags.is_empty() {
        out.push_str(&format!(" {{{}}}", case.tags));
    }
    out.push('\n');

    if options.include_failures {
        for failure in &case.failures {
            out.push_str(&format!("      - {}", failure.message.replace('\n', " ")));
            if let Some(ref kind) = failure.kind {
                out.push_str(&format!(" (type = {})", kind));
            }
            out.push('\n');
        }
    }
    out
}

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

/// Render the per-suite counts as an ASCII table.
fn render_suite_table(suites: &[Suite]) -> String {
    let rows: Vec<[String; 7]> = suites
        .iter()
        .map(|s| {
            [
                s.id.to_string(),
                s.name.clone(),
                s.counts.total.to_string(),
                s.counts.success.to_string(),
                s.counts.fail.to_string(),
                s.counts.disabled.to_string(),
                s.time.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = SUITE_HEADER
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let border = |fill: &str| {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&fill.repeat(*w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut output = border("-");

    output.push('|');
    for (i, h) in SUITE_HEADER.iter().enumerate() {
        output.push_str(&format!(" {} |", pad(h, widths[i])));
    }
    output.push('\n');
    output.push_str(&border("="));

    for row in &rows {
        output.push('|');
        for (i, cell) in row.iter().enumerate() {
            output.push_str(&format!(" {} |", pad(cell, widths[i])));
        }
        output.push('\n');
    }

    let mut bottom = border("-");
    bottom.pop();
    output.push_str(&bottom);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Failure, TestStatus};
    use crate::summary::Counts;

    fn sample() -> Report {
        Report {
            name: "AllTests".to_string(),
            project: "Calculator".to_string(),
            author: "QA".to_string(),
            time: "0.02".to_string(),
            timestamp: "2024-05-01T10:00:00".to_string(),
            source: "report.xml".to_string(),
            counts: Counts::from_report(3, 1, 0).unwrap(),
            suites: vec![Suite {
                id: 0,
                name: "Größe".to_string(),
                time: "0.02".to_string(),
                counts: Counts::from_report(3, 1, 0).unwrap(),
                cases: vec![
                    TestCase {
                        number: 1,
                        name: "Adds".to_string(),
                        classname: "Math".to_string(),
                        time: "0".to_string(),
                        status: TestStatus::Run,
                        ..Default::default()
                    },
                    TestCase {
                        number: 2,
                        name: "Divides".to_string(),
                        classname: "Math".to_string(),
                        time: "0.02".to_string(),
                        status: TestStatus::Run,
                        failures: vec![Failure {
                            message: "Expected 2\nActual 3".to_string(),
                            kind: Some("assert".to_string()),
                            text: String::new(),
                        }],
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            warnings: vec!["report.xml: something odd".to_string()],
        }
    }

    #[test]
    fn test_report_to_text() {
        let text = to_text(&sample(), &RenderOptions::new().with_bar_width(10)).unwrap();

        assert!(text.starts_with("Calculator\nAllTests (report.xml)"));
        assert!(text.contains("Total: 3 tests"));
        assert!(text.contains("[#######xxx] passed 67% (2), failed 33% (1)"));
        assert!(text.contains("[0] Größe"));
        assert!(!text.contains("Divides"));
        assert!(!text.contains("Warnings:"));
    }

    #[test]
    fn test_cases_and_failures() {
        let opts = RenderOptions::new().with_cases(true);
        let text = to_text(&sample(), &opts).unwrap();
        assert!(text.contains("#1 [PASS] Math.Adds (0s)"));
        assert!(text.contains("#2 [FAIL] Math.Divides (0.02s)"));
        assert!(text.contains("- Expected 2 Actual 3 (type = assert)"));

        let opts = RenderOptions::new().with_cases(true).with_failures(false);
        let text = to_text(&sample(), &opts).unwrap();
        assert!(!text.contains("Expected 2"));
    }

    #[test]
    fn test_warnings_section() {
        let opts = RenderOptions::new().with_warnings(true);
        let text = to_text(&sample(), &opts).unwrap();
        assert!(text.ends_with("! report.xml: something odd"));
    }

    #[test]
    fn test_no_bar() {
        let text = to_text(&sample(), &RenderOptions::new().with_bar_width(0)).unwrap();
        assert!(text.contains("\n  passed 67% (2), failed 33% (1)"));
    }

    #[test]
    fn test_suite_table_alignment() {
        let table = render_suite_table(&sample().suites);
        let widths: Vec<usize> = table
            .lines()
            .map(|l| UnicodeWidthStr::width(l))
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{}", table);
        assert!(table.contains("| Größe |"));
    }

    #[test]
    fn test_empty_report_text() {
        let text = to_text(&Report::default(), &RenderOptions::new().with_bar_width(4)).unwrap();
        assert!(text.contains("[####] passed 100% (0)"));
    }
}
