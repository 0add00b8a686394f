//! Test outcome counts and their rounded percentage breakdown.

use crate::error::{Error, Result};
use crate::rounding::round_to_100;
use serde::{Deserialize, Serialize};

/// Outcome category of a test, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Tests that ran and passed
    Success,
    /// Tests that ran and failed
    Fail,
    /// Tests that were disabled
    Disabled,
}

impl Outcome {
    /// All outcomes in the order the rounding vector uses.
    pub const ALL: [Outcome; 3] = [Outcome::Success, Outcome::Fail, Outcome::Disabled];

    /// Display class of the outcome.
    pub fn class(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Fail => "danger",
            Outcome::Disabled => "warning",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "passed",
            Outcome::Fail => "failed",
            Outcome::Disabled => "disabled",
        }
    }
}

/// Absolute test counts of a report or suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: u32,
    pub success: u32,
    pub fail: u32,
    pub disabled: u32,
}

impl Counts {
    /// Create counts, checking that the categories add up to `total`.
    pub fn new(total: u32, success: u32, fail: u32, disabled: u32) -> Result<Self> {
        let sum = u64::from(success) + u64::from(fail) + u64::from(disabled);
        if sum != u64::from(total) {
            return Err(Error::InvalidData(format!(
                "success {} + fail {} + disabled {} does not equal total {}",
                success, fail, disabled, total
            )));
        }
        Ok(Self {
            total,
            success,
            fail,
            disabled,
        })
    }

    /// Create counts the way gtest reports them, deriving `success`.
    pub fn from_report(total: u32, fail: u32, disabled: u32) -> Result<Self> {
        let success = total
            .checked_sub(fail)
            .and_then(|rest| rest.checked_sub(disabled))
            .ok_or_else(|| {
                Error::InvalidData(format!(
                    "{} failures and {} disabled exceed {} tests",
                    fail, disabled, total
                ))
            })?;
        Ok(Self {
            total,
            success,
            fail,
            disabled,
        })
    }

    /// Absolute count of one outcome.
    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Success => self.success,
            Outcome::Fail => self.fail,
            Outcome::Disabled => self.disabled,
        }
    }
}

/// One outcome's share of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub outcome: Outcome,
    /// Rounded percentage; all segments of a breakdown sum to 100
    pub percentage: u32,
    /// Absolute count
    pub absolute: u32,
}

/// Rounded percentage breakdown of [`Counts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    segments: Vec<Segment>,
    empty: bool,
}

impl Breakdown {
    /// Compute the breakdown of `counts`.
    ///
    /// With `total == 0` there is nothing to report; by convention this
    /// yields a single segment showing 100% success with an absolute count
    /// of 0. Otherwise all three categories are rounded together, so that
    /// categories with a zero count still take part in the allocation.
    pub fn from_counts(counts: &Counts) -> Result<Self> {
        if counts.total == 0 {
            return Ok(Self {
                segments: vec![Segment {
                    outcome: Outcome::Success,
                    percentage: 100,
                    absolute: 0,
                }],
                empty: true,
            });
        }

        let total = f64::from(counts.total);
        let percentages: Vec<f64> = Outcome::ALL
            .iter()
            .map(|&o| 100.0 * f64::from(counts.get(o)) / total)
            .collect();

        let rounded = round_to_100(&percentages)?;

        let segments = Outcome::ALL
            .iter()
            .zip(rounded)
            .map(|(&outcome, percentage)| Segment {
                outcome,
                percentage,
                absolute: counts.get(outcome),
            })
            .collect();

        Ok(Self {
            segments,
            empty: false,
        })
    }

    /// All segments, zero counts included.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments a renderer should show: those with a non-zero count, or the
    /// single conventional segment of an empty breakdown.
    pub fn visible_segments(&self) -> impl Iterator<Item = &Segment> {
        let empty = self.empty;
        self.segments
            .iter()
            .filter(move |s| empty || s.absolute > 0)
    }

    /// Whether this breakdown stands for zero tests.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Rounded percentage of one outcome (0 when absent).
    pub fn percentage(&self, outcome: Outcome) -> u32 {
        self.segments
            .iter()
            .find(|s| s.outcome == outcome)
            .map(|s| s.percentage)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_new_checks_sum() {
        assert!(Counts::new(10, 7, 2, 1).is_ok());
        assert!(matches!(
            Counts::new(10, 7, 2, 2),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_counts_from_report() {
        let counts = Counts::from_report(10, 2, 1).unwrap();
        assert_eq!(counts.success, 7);

        assert!(matches!(
            Counts::from_report(3, 2, 2),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_empty_breakdown_convention() {
        let breakdown = Breakdown::from_counts(&Counts::default()).unwrap();
        assert!(breakdown.is_empty());

        let visible: Vec<_> = breakdown.visible_segments().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].outcome, Outcome::Success);
        assert_eq!(visible[0].percentage, 100);
        assert_eq!(visible[0].absolute, 0);
    }

    #[test]
    fn test_thirds_breakdown() {
        let counts = Counts::new(3, 1, 1, 1).unwrap();
        let breakdown = Breakdown::from_counts(&counts).unwrap();

        let pct: Vec<u32> = breakdown.segments().iter().map(|s| s.percentage).collect();
        assert_eq!(pct, vec![34, 33, 33]);
    }

    #[test]
    fn test_zero_count_is_hidden_but_rounded() {
        let counts = Counts::new(7, 6, 1, 0).unwrap();
        let breakdown = Breakdown::from_counts(&counts).unwrap();

        assert_eq!(breakdown.segments().len(), 3);
        assert_eq!(
            breakdown.segments().iter().map(|s| s.percentage).sum::<u32>(),
            100
        );
        assert_eq!(breakdown.percentage(Outcome::Success), 86);
        assert_eq!(breakdown.percentage(Outcome::Fail), 14);

        let visible: Vec<Outcome> = breakdown.visible_segments().map(|s| s.outcome).collect();
        assert_eq!(visible, vec![Outcome::Success, Outcome::Fail]);
    }

    #[test]
    fn test_all_failed() {
        let counts = Counts::from_report(4, 4, 0).unwrap();
        let breakdown = Breakdown::from_counts(&counts).unwrap();
        assert_eq!(breakdown.percentage(Outcome::Fail), 100);
        assert_eq!(breakdown.visible_segments().count(), 1);
    }

    #[test]
    fn test_outcome_classes() {
        assert_eq!(Outcome::Success.class(), "success");
        assert_eq!(Outcome::Fail.class(), "danger");
        assert_eq!(Outcome::Disabled.class(), "warning");
    }
}
