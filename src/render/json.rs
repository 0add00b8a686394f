//! JSON renderer implementation.

use crate::error::Result;
use crate::model::{Report, Suite, TestCase, Verdict};
use crate::summary::{Breakdown, Counts, Segment};
use serde::Serialize;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

#[derive(Serialize)]
struct SegmentView<'a> {
    #[serde(flatten)]
    segment: &'a Segment,
    class: &'static str,
}

#[derive(Serialize)]
struct BreakdownView<'a> {
    empty: bool,
    segments: Vec<SegmentView<'a>>,
}

impl<'a> BreakdownView<'a> {
    fn new(breakdown: &'a Breakdown) -> Self {
        Self {
            empty: breakdown.is_empty(),
            segments: breakdown
                .segments()
                .iter()
                .map(|segment| SegmentView {
                    segment,
                    class: segment.outcome.class(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct CaseView<'a> {
    #[serde(flatten)]
    case: &'a TestCase,
    verdict: Verdict,
    class: &'static str,
    icon: &'static str,
}

impl<'a> CaseView<'a> {
    fn new(case: &'a TestCase) -> Self {
        let verdict = case.verdict();
        Self {
            case,
            verdict,
            class: verdict.class(),
            icon: verdict.icon(),
        }
    }
}

#[derive(Serialize)]
struct SuiteView<'a> {
    id: usize,
    name: &'a str,
    tags: &'a str,
    time: &'a str,
    counts: Counts,
    breakdown: BreakdownView<'a>,
    cases: Vec<CaseView<'a>>,
}

#[derive(Serialize)]
struct ReportView<'a> {
    name: &'a str,
    project: &'a str,
    author: &'a str,
    time: &'a str,
    timestamp: &'a str,
    source: &'a str,
    counts: Counts,
    breakdown: BreakdownView<'a>,
    suites: Vec<SuiteView<'a>>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    warnings: &'a [String],
}

/// Breakdowns are computed up front so the views can borrow them.
struct Breakdowns {
    report: Breakdown,
    suites: Vec<Breakdown>,
}

impl Breakdowns {
    fn new(report: &Report) -> Result<Self> {
        Ok(Self {
            report: report.breakdown()?,
            suites: report
                .suites
                .iter()
                .map(Suite::breakdown)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl<'a> ReportView<'a> {
    fn new(report: &'a Report, breakdowns: &'a Breakdowns) -> Self {
        let suites = report
            .suites
            .iter()
            .zip(&breakdowns.suites)
            .map(|(suite, breakdown)| SuiteView {
                id: suite.id,
                name: &suite.name,
                tags: &suite.tags,
                time: &suite.time,
                counts: suite.counts,
                breakdown: BreakdownView::new(breakdown),
                cases: suite.cases.iter().map(CaseView::new).collect(),
            })
            .collect();

        Self {
            name: &report.name,
            project: &report.project,
            author: &report.author,
            time: &report.time,
            timestamp: &report.timestamp,
            source: &report.source,
            counts: report.counts,
            breakdown: BreakdownView::new(&breakdowns.report),
            suites,
            warnings: &report.warnings,
        }
    }
}

/// Convert a Report, with the breakdown of the report and of every suite,
/// to JSON.
///
/// Segments and test cases carry a display `class` (`success`, `danger`,
/// `warning`) and test cases an `icon`, for consumers that style the output.
pub fn to_json(report: &Report, format: JsonFormat) -> Result<String> {
    let breakdowns = Breakdowns::new(report)?;
    let view = ReportView::new(report, &breakdowns);
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(&view)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(&view)?,
    };
    Ok(json)
}

/// Convert a Report to JSON with default formatting.
pub fn to_json_default(report: &Report) -> Result<String> {
    to_json(report, JsonFormat::Pretty)
}
