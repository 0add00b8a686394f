//! Test case and failure models.

use serde::{Deserialize, Serialize};

/// Execution status reported in the `status` attribute of a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    /// The test was executed
    #[default]
    Run,
    /// The test was not executed (disabled)
    NotRun,
    /// Any other value, kept verbatim
    Other(String),
}

impl TestStatus {
    /// Get the status as it appears in the report.
    pub fn as_str(&self) -> &str {
        match self {
            TestStatus::Run => "run",
            TestStatus::NotRun => "notrun",
            TestStatus::Other(s) => s,
        }
    }
}

impl From<String> for TestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "run" => TestStatus::Run,
            "notrun" => TestStatus::NotRun,
            _ => TestStatus::Other(value),
        }
    }
}

impl From<TestStatus> for String {
    fn from(status: TestStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Display verdict of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Skipped,
    Failed,
}

impl Verdict {
    /// Display class, shared with [`crate::Outcome::class`].
    pub fn class(self) -> &'static str {
        match self {
            Verdict::Passed => "success",
            Verdict::Skipped => "warning",
            Verdict::Failed => "danger",
        }
    }

    /// Icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Verdict::Passed => "check",
            Verdict::Skipped => "warning",
            Verdict::Failed => "x",
        }
    }
}

/// A `<failure>` element of a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Failure message (`message` attribute)
    pub message: String,

    /// Failure type (`type` attribute), absent when empty
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,

    /// Element text, usually the assertion output
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub text: String,
}

/// A single `<testcase>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCase {
    /// 1-based position within the suite
    pub number: usize,
    pub name: String,
    pub classname: String,
    pub time: String,
    pub status: TestStatus,
    pub tags: String,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<Failure>,
}

impl TestCase {
    /// Derive the display verdict.
    ///
    /// A test passes only when it ran and recorded no failures; a test that
    /// did not run is skipped; everything else failed.
    pub fn verdict(&self) -> Verdict {
        match self.status {
            TestStatus::Run if self.failures.is_empty() => Verdict::Passed,
            TestStatus::NotRun => Verdict::Skipped,
            _ => Verdict::Failed,
        }
    }

    /// `classname.name`, or just the name when the class is unknown.
    pub fn full_name(&self) -> String {
        if self.classname.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.classname, self.name)
        }
    }
}
