//! # gtest-report
//!
//! Summaries of GoogleTest XML reports with percentages that add up to 100.
//!
//! The core of the crate is [`round_to_100`], a largest-remainder rounder
//! that turns real-valued percentages into integers summing to exactly 100
//! while minimizing a weighted rounding error. Around it sit a reader for
//! `--gtest_output=xml` reports and plain text / JSON renderers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gtest_report::{parse_file, render, Outcome};
//!
//! let report = parse_file("test_detail.xml")?;
//! let breakdown = report.breakdown()?;
//! println!("{}% passed", breakdown.percentage(Outcome::Success));
//!
//! let text = render::to_text(&report, &render::RenderOptions::default())?;
//! println!("{}", text);
//! # Ok::<(), gtest_report::Error>(())
//! ```
//!
//! ## Rounding only
//!
//! ```
//! use gtest_report::{round_to_100, Breakdown, Counts};
//!
//! assert_eq!(round_to_100(&[33.3, 33.3, 33.4])?, vec![33, 33, 34]);
//!
//! let counts = Counts::from_report(7, 1, 0)?;
//! let breakdown = Breakdown::from_counts(&counts)?;
//! assert_eq!(breakdown.segments().iter().map(|s| s.percentage).sum::<u32>(), 100);
//! # Ok::<(), gtest_report::Error>(())
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod rounding;
pub mod summary;

// Re-exports
pub use error::{Error, Result};
pub use model::{Failure, Report, Suite, TestCase, TestStatus, Verdict};
pub use parser::{ParseOptions, ReportParser};
pub use rounding::{allocate, error_weight, round_to_100};
pub use summary::{Breakdown, Counts, Outcome, Segment};

use std::path::Path;

/// Parse a gtest XML report file with default options.
///
/// # Example
///
/// ```no_run
/// use gtest_report::parse_file;
///
/// let report = parse_file("test_detail.xml")?;
/// println!("Suites: {}", report.suites.len());
/// # Ok::<(), gtest_report::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Report> {
    ReportParser::default().parse_file(path)
}

/// Parse gtest report XML held in memory with default options.
pub fn parse_str(xml: &str) -> Result<Report> {
    ReportParser::default().parse_str(xml, "<memory>")
}

/// Read a report and render its plain text summary.
pub fn summarize_file(path: impl AsRef<Path>, options: &render::RenderOptions) -> Result<String> {
    let report = parse_file(path)?;
    render::to_text(&report, options)
}
