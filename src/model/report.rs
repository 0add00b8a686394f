//! Report and test suite models.

use super::TestCase;
use crate::error::Result;
use crate::summary::{Breakdown, Counts};
use serde::{Deserialize, Serialize};

/// A `<testsuite>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suite {
    /// 0-based position within the report
    pub id: usize,
    pub name: String,
    pub tags: String,
    pub time: String,
    pub counts: Counts,

    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl Suite {
    /// Rounded percentage breakdown of this suite.
    pub fn breakdown(&self) -> Result<Breakdown> {
        Breakdown::from_counts(&self.counts)
    }
}

/// A parsed gtest report (`<testsuites>` root).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// Report name (`name` attribute)
    pub name: String,

    /// Project name, from the report or the configured default
    pub project: String,

    /// Author, from the report or the configured default
    pub author: String,

    /// Total execution time as written in the report
    pub time: String,

    /// Execution timestamp as written in the report
    pub timestamp: String,

    /// Totals over all suites
    pub counts: Counts,

    #[serde(default)]
    pub suites: Vec<Suite>,

    /// Base name of the report file
    pub source: String,

    /// Warnings raised while reading the report
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

impl Report {
    /// Rounded percentage breakdown of the whole report.
    pub fn breakdown(&self) -> Result<Breakdown> {
        Breakdown::from_counts(&self.counts)
    }

    /// Number of test cases over all suites.
    pub fn testcase_count(&self) -> usize {
        self.suites.iter().map(|s| s.cases.len()).sum()
    }

    /// Iterate over all failed test cases with their suite.
    pub fn failed_cases(&self) -> impl Iterator<Item = (&Suite, &TestCase)> {
        self.suites.iter().flat_map(|suite| {
            suite
                .cases
                .iter()
                .filter(|c| c.verdict() == super::Verdict::Failed)
                .map(move |c| (suite, c))
        })
    }
}
