use serde::{Deserialize, Serialize};

use crate::aggregate::ResultRecord;
use crate::error::{ChartError, ChartResult};

/// Pass/fail counts for a set of graded results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFailTally {
    pub passed: usize,
    pub failed: usize,
    /// Records without a usable grade; counted in neither bucket.
    pub excluded: usize,
}

impl PassFailTally {
    #[must_use]
    pub fn total(self) -> usize {
        self.passed + self.failed
    }

    /// Share of passes among graded results; `None` when nothing was graded.
    #[must_use]
    pub fn pass_rate(self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.passed as f64 / total as f64)
    }
}

/// Partitions results into passes (`grade >= threshold`) and fails.
///
/// A null or non-finite grade is excluded from both counts.
pub fn tally_pass_fail<'a>(
    results: impl IntoIterator<Item = &'a ResultRecord>,
    threshold: f64,
) -> PassFailTally {
    results
        .into_iter()
        .fold(PassFailTally::default(), |mut tally, result| {
            match result.grade.filter(|grade| grade.is_finite()) {
                Some(grade) if grade >= threshold => tally.passed += 1,
                Some(_) => tally.failed += 1,
                None => tally.excluded += 1,
            }
            tally
        })
}

/// Two non-negative magnitudes compared as shares of their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioSplit {
    first: f64,
    second: f64,
}

impl RatioSplit {
    pub fn new(first: f64, second: f64) -> ChartResult<Self> {
        for (name, value) in [("first", first), ("second", second)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "ratio {name} magnitude must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(Self { first, second })
    }

    #[must_use]
    pub fn first(self) -> f64 {
        self.first
    }

    #[must_use]
    pub fn second(self) -> f64 {
        self.second
    }

    #[must_use]
    pub fn total(self) -> f64 {
        self.first + self.second
    }

    /// `(first, second)` shares in `0..=1`; `None` for a zero total.
    #[must_use]
    pub fn fractions(self) -> Option<(f64, f64)> {
        let total = self.total();
        (total > 0.0).then(|| (self.first / total, self.second / total))
    }

    /// Donut sweeps in degrees; the two always add up to 360.
    #[must_use]
    pub fn sweep_degrees(self) -> Option<(f64, f64)> {
        self.fractions()
            .map(|(first, second)| (360.0 * first, 360.0 * second))
    }
}

impl From<PassFailTally> for RatioSplit {
    fn from(tally: PassFailTally) -> Self {
        Self {
            first: tally.passed as f64,
            second: tally.failed as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn null_grades_are_excluded_not_failed() {
        let results = vec![
            ResultRecord::new(Some(1.0), "2024-01-01"),
            ResultRecord::new(Some(0.5), "2024-01-02"),
            ResultRecord::new(None, "2024-01-03"),
        ];
        let tally = tally_pass_fail(&results, 1.0);
        assert_eq!(tally.passed, 1);
        assert_eq!(tally.failed, 1);
        assert_eq!(tally.excluded, 1);
        assert_eq!(tally.pass_rate(), Some(0.5));
    }

    #[test]
    fn negative_magnitudes_are_rejected() {
        assert!(RatioSplit::new(-1.0, 2.0).is_err());
        assert!(RatioSplit::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn sweeps_cover_full_circle() {
        let split = RatioSplit::new(30.0, 10.0).expect("split");
        let (up, down) = split.sweep_degrees().expect("sweeps");
        assert_relative_eq!(up, 270.0);
        assert_relative_eq!(down, 90.0);
    }

    #[test]
    fn zero_total_has_no_fractions() {
        let split = RatioSplit::new(0.0, 0.0).expect("split");
        assert!(split.fractions().is_none());
    }
}
