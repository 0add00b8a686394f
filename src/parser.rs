//! gtest XML report parser.
//!
//! Reads the `testsuites > testsuite > testcase > failure` hierarchy written by
//! `--gtest_output=xml` with a streaming `quick_xml` reader. Missing
//! attributes are resolved to defaults in the returned [`Report`]; nothing in
//! the input is rewritten.
//!
//! # Example
//!
//! ```
//! use gtest_report::{ParseOptions, ReportParser};
//!
//! let xml = r#"<testsuites tests="1" failures="0" disabled="0" name="AllTests">
//!   <testsuite name="Math" tests="1" failures="0" disabled="0" time="0.001">
//!     <testcase name="Adds" status="run" time="0.001" classname="Math"/>
//!   </testsuite>
//! </testsuites>"#;
//!
//! let report = ReportParser::new(ParseOptions::default()).parse_str(xml, "report.xml")?;
//! assert_eq!(report.suites[0].cases[0].name, "Adds");
//! # Ok::<(), gtest_report::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::model::{Failure, Report, Suite, TestCase, TestStatus};
use crate::summary::Counts;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;

/// Default for string attributes that are missing.
pub const UNDEFINED: &str = "-undefined-";

const REPORT_ATTRIBUTES: &[&str] = &[
    "tests", "failures", "disabled", "errors", "time", "timestamp", "name", "project", "author",
];
const SUITE_ATTRIBUTES: &[&str] = &[
    "name", "tests", "failures", "disabled", "errors", "time", "timestamp", "tags",
];
const CASE_ATTRIBUTES: &[&str] = &[
    "name", "status", "result", "time", "timestamp", "classname", "tags",
];
const FAILURE_ATTRIBUTES: &[&str] = &["message", "type"];

/// Options for reading reports.
///
/// gtest does not write `project` or `author`; the defaults here are
/// neutral placeholders, so set your own with [`ParseOptions::with_project`]
/// and [`ParseOptions::with_author`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Project name used when the report has no `project` attribute
    pub default_project: String,

    /// Author used when the report has no `author` attribute
    pub default_author: String,

    /// Warn when a known attribute is missing
    pub warn_missing_attributes: bool,

    /// Warn about every unknown attribute, not only blank ones
    pub warn_unknown_attributes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_project: "Automation Test Framework".to_string(),
            default_author: "unknown".to_string(),
            warn_missing_attributes: true,
            warn_unknown_attributes: false,
        }
    }
}

impl ParseOptions {
    /// Create new parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback project name.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.default_project = project.into();
        self
    }

    /// Set the fallback author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = author.into();
        self
    }

    /// Enable or disable warnings for missing attributes.
    pub fn with_missing_warnings(mut self, enabled: bool) -> Self {
        self.warn_missing_attributes = enabled;
        self
    }

    /// Warn about all unknown attributes.
    pub fn with_unknown_warnings(mut self, enabled: bool) -> Self {
        self.warn_unknown_attributes = enabled;
        self
    }
}

/// Attributes of one element, in document order.
struct Attributes {
    tag: String,
    values: Vec<(String, String)>,
}

impl Attributes {
    fn read(e: &BytesStart) -> Result<Self> {
        let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let mut values = Vec::new();

        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            values.push((key, value));
        }

        Ok(Self { tag, values })
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `<tag a="1" b="2">` for messages.
    fn describe(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (k, v) in &self.values {
            out.push_str(&format!(" {}={:?}", k, v));
        }
        out.push('>');
        out
    }
}

/// Per-report state threaded through attribute resolution.
///
/// Carries the report's source name so every warning can point at the file
/// it came from.
struct ParseContext<'a> {
    source: &'a str,
    options: &'a ParseOptions,
    warnings: Vec<String>,
}

impl<'a> ParseContext<'a> {
    fn new(source: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            source,
            options,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!(source = self.source, "{}", message);
        self.warnings.push(format!("{}: {}", self.source, message));
    }

    fn invalid(&self, attrs: &Attributes, message: impl std::fmt::Display) -> Error {
        Error::InvalidData(format!(
            "{}: {} in {}",
            self.source,
            message,
            attrs.describe()
        ))
    }

    fn missing(&mut self, attrs: &Attributes, name: &str, default: &str) {
        if self.options.warn_missing_attributes {
            self.warn(format!(
                "attribute '{}' not found in {}, using default {:?}",
                name,
                attrs.describe(),
                default
            ));
        }
    }

    /// A string attribute that should be present; warns when it is not.
    fn string(&mut self, attrs: &Attributes, name: &str, default: &str) -> String {
        match attrs.get(name) {
            Some(value) => value.to_string(),
            None => {
                self.missing(attrs, name, default);
                default.to_string()
            }
        }
    }

    /// An optional string attribute; never warns.
    fn optional(&self, attrs: &Attributes, name: &str, default: &str) -> String {
        attrs.get(name).unwrap_or(default).to_string()
    }

    /// A counter attribute; missing counters are 0.
    fn count(&mut self, attrs: &Attributes, name: &str) -> Result<u32> {
        match attrs.get(name) {
            Some(value) => value.trim().parse::<u32>().map_err(|_| {
                self.invalid(attrs, format!("attribute '{}' is not a count: {:?}", name, value))
            }),
            None => {
                if self.options.warn_missing_attributes {
                    self.warn(format!(
                        "attribute '{}' not found in {}, using default 0",
                        name,
                        attrs.describe()
                    ));
                }
                Ok(0)
            }
        }
    }

    fn counts(&mut self, attrs: &Attributes) -> Result<Counts> {
        let tests = self.count(attrs, "tests")?;
        let failures = self.count(attrs, "failures")?;
        let disabled = self.count(attrs, "disabled")?;
        Counts::from_report(tests, failures, disabled).map_err(|e| self.invalid(attrs, e))
    }

    /// Warn about attributes outside `known`.
    ///
    /// Blank unknown attributes always warn; non-blank ones only when
    /// [`ParseOptions::warn_unknown_attributes`] is set.
    fn check_unknown(&mut self, attrs: &Attributes, known: &[&str]) {
        let unknown: Vec<String> = attrs
            .values
            .iter()
            .filter(|(k, v)| {
                !known.contains(&k.as_str())
                    && (v.trim().is_empty() || self.options.warn_unknown_attributes)
            })
            .map(|(k, _)| k.clone())
            .collect();

        for name in unknown {
            self.warn(format!(
                "unknown attribute '{}' in {} is not parsed",
                name,
                attrs.describe()
            ));
        }
    }

    fn report(&mut self, attrs: &Attributes) -> Result<Report> {
        let counts = self.counts(attrs)?;
        let report = Report {
            name: self.string(attrs, "name", "undefined"),
            project: self.optional(attrs, "project", &self.options.default_project),
            author: self.optional(attrs, "author", &self.options.default_author),
            time: self.string(attrs, "time", UNDEFINED),
            timestamp: self.string(attrs, "timestamp", UNDEFINED),
            counts,
            suites: Vec::new(),
            source: self.source.to_string(),
            warnings: Vec::new(),
        };
        self.check_unknown(attrs, REPORT_ATTRIBUTES);
        Ok(report)
    }

    fn suite(&mut self, attrs: &Attributes, id: usize) -> Result<Suite> {
        let suite = Suite {
            id,
            name: self.string(attrs, "name", UNDEFINED),
            counts: self.counts(attrs)?,
            time: self.string(attrs, "time", UNDEFINED),
            tags: self.optional(attrs, "tags", ""),
            cases: Vec::new(),
        };
        self.check_unknown(attrs, SUITE_ATTRIBUTES);
        Ok(suite)
    }

    fn case(&mut self, attrs: &Attributes, number: usize) -> TestCase {
        let case = TestCase {
            number,
            name: self.string(attrs, "name", UNDEFINED),
            time: self.string(attrs, "time", UNDEFINED),
            status: TestStatus::from(self.string(attrs, "status", UNDEFINED)),
            classname: self.string(attrs, "classname", UNDEFINED),
            tags: self.optional(attrs, "tags", ""),
            failures: Vec::new(),
        };
        self.check_unknown(attrs, CASE_ATTRIBUTES);
        case
    }

    fn failure(&mut self, attrs: &Attributes) -> Failure {
        let message = self.string(attrs, "message", UNDEFINED);
        // An empty `type` is common and means "no type"; only absence warns.
        let kind = match attrs.get("type") {
            Some(kind) if !kind.trim().is_empty() => Some(kind.trim().to_string()),
            Some(_) => None,
            None => {
                self.missing(attrs, "type", "");
                None
            }
        };
        self.check_unknown(attrs, FAILURE_ATTRIBUTES);
        Failure {
            message,
            kind,
            text: String::new(),
        }
    }
}

/// Elements currently being assembled.
#[derive(Default)]
struct ReportBuilder {
    stack: Vec<String>,
    report: Option<Report>,
    suite: Option<Suite>,
    case: Option<TestCase>,
    failure: Option<Failure>,
}

impl ReportBuilder {
    fn parent(&self) -> Option<String> {
        self.stack.last().cloned()
    }

    fn open(&mut self, e: &BytesStart, empty: bool, ctx: &mut ParseContext) -> Result<()> {
        let attrs = Attributes::read(e)?;

        match (self.parent().as_deref(), attrs.tag.as_str()) {
            (None, "testsuites") if self.report.is_none() => {
                self.report = Some(ctx.report(&attrs)?);
            }
            (None, other) if self.report.is_none() => {
                return Err(Error::InvalidReport(format!(
                    "{}: invalid root element (found: <{}>, expected: <testsuites>)",
                    ctx.source, other
                )));
            }
            (Some("testsuites"), "testsuite") => {
                let id = self.report.as_ref().map_or(0, |r| r.suites.len());
                self.suite = Some(ctx.suite(&attrs, id)?);
            }
            (Some("testsuite"), "testcase") => {
                let number = self.suite.as_ref().map_or(0, |s| s.cases.len()) + 1;
                self.case = Some(ctx.case(&attrs, number));
            }
            (Some("testcase"), "failure") => {
                self.failure = Some(ctx.failure(&attrs));
            }
            _ => {}
        }

        if empty {
            self.close(&attrs.tag, ctx);
        } else {
            self.stack.push(attrs.tag);
        }
        Ok(())
    }

    fn close(&mut self, tag: &str, ctx: &mut ParseContext) {
        match (self.parent().as_deref(), tag) {
            (Some("testcase"), "failure") => {
                if let (Some(mut failure), Some(case)) = (self.failure.take(), self.case.as_mut()) {
                    failure.text = failure.text.trim().to_string();
                    case.failures.push(failure);
                }
            }
            (Some("testsuite"), "testcase") => {
                if let (Some(case), Some(suite)) = (self.case.take(), self.suite.as_mut()) {
                    suite.cases.push(case);
                }
            }
            (Some("testsuites"), "testsuite") => {
                if let Some(suite) = self.suite.take() {
                    if suite.cases.is_empty() {
                        ctx.warn(format!(
                            "no <testcase> elements found in testsuite {:?}",
                            suite.name
                        ));
                    }
                    if let Some(report) = self.report.as_mut() {
                        report.suites.push(suite);
                    }
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, ctx: &mut ParseContext) {
        if let Some(tag) = self.stack.pop() {
            self.close(&tag, ctx);
        }
    }

    fn text(&mut self, text: &str) {
        if self.parent().as_deref() == Some("failure") {
            if let Some(failure) = self.failure.as_mut() {
                failure.text.push_str(text);
            }
        }
    }
}

/// Parser for gtest XML reports.
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    options: ParseOptions,
}

impl ReportParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Read and parse a report file.
    ///
    /// Warnings name the file by its base name.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Report> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(path = %path.display(), "parsing report");
        self.parse_str(&xml, &source)
    }

    /// Parse report XML held in memory; `source` names it in warnings.
    pub fn parse_str(&self, xml: &str, source: &str) -> Result<Report> {
        let mut ctx = ParseContext::new(source, &self.options);
        let mut builder = ReportBuilder::default();

        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => builder.open(&e, false, &mut ctx)?,
                Ok(Event::Empty(e)) => builder.open(&e, true, &mut ctx)?,
                Ok(Event::End(_)) => builder.end(&mut ctx),
                Ok(Event::Text(e)) => {
                    let text = e.unescape()?;
                    builder.text(&text);
                }
                Ok(Event::CData(e)) => {
                    builder.text(&String::from_utf8_lossy(&e.into_inner()));
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        let mut report = builder.report.ok_or_else(|| {
            Error::InvalidReport(format!("{}: the document has no root element", source))
        })?;

        if report.suites.is_empty() {
            ctx.warn(
                "no <testsuite> elements found; nothing is listed per suite".to_string(),
            );
        }

        tracing::debug!(
            source,
            suites = report.suites.len(),
            cases = report.testcase_count(),
            "parsed report"
        );

        report.warnings = ctx.warnings;
        Ok(report)
    }
}
