//! Phase results and test outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a phase asks the runner to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseResult {
    /// Phase passed; run the next one.
    #[default]
    Continue,
    /// Phase did not apply to this DUT.
    Skip,
    /// Phase failed but the remaining phases still run.
    FailAndContinue,
    /// Phase failed and the test stops here.
    Stop,
}

impl PhaseResult {
    pub fn outcome(&self) -> PhaseOutcome {
        match self {
            PhaseResult::Continue => PhaseOutcome::Pass,
            PhaseResult::Skip => PhaseOutcome::Skip,
            PhaseResult::FailAndContinue | PhaseResult::Stop => PhaseOutcome::Fail,
        }
    }

    pub fn stops_test(&self) -> bool {
        matches!(self, PhaseResult::Stop)
    }
}

/// Recorded outcome of a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseOutcome {
    Pass,
    Fail,
    Skip,
    Error,
}

impl PhaseOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseOutcome::Pass => "PASS",
            PhaseOutcome::Fail => "FAIL",
            PhaseOutcome::Skip => "SKIP",
            PhaseOutcome::Error => "ERROR",
        }
    }
}

impl fmt::Display for PhaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall outcome of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestOutcome {
    Pass,
    Fail,
    Error,
    Aborted,
}

impl TestOutcome {
    /// Derive the test outcome from its phase outcomes.
    ///
    /// An aborted run stays aborted; otherwise errors outrank failures, and a
    /// run with only passing or skipped phases passes.
    pub fn from_phases<'a>(
        outcomes: impl IntoIterator<Item = &'a PhaseOutcome>,
        aborted: bool,
    ) -> Self {
        if aborted {
            return TestOutcome::Aborted;
        }
        let mut result = TestOutcome::Pass;
        for outcome in outcomes {
            match outcome {
                PhaseOutcome::Error => return TestOutcome::Error,
                PhaseOutcome::Fail => result = TestOutcome::Fail,
                PhaseOutcome::Pass | PhaseOutcome::Skip => {}
            }
        }
        result
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, TestOutcome::Pass)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestOutcome::Pass => "PASS",
            TestOutcome::Fail => "FAIL",
            TestOutcome::Error => "ERROR",
            TestOutcome::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_result_mapping() {
        assert_eq!(PhaseResult::Continue.outcome(), PhaseOutcome::Pass);
        assert_eq!(PhaseResult::Skip.outcome(), PhaseOutcome::Skip);
        assert_eq!(PhaseResult::FailAndContinue.outcome(), PhaseOutcome::Fail);
        assert_eq!(PhaseResult::Stop.outcome(), PhaseOutcome::Fail);
        assert!(PhaseResult::Stop.stops_test());
        assert!(!PhaseResult::FailAndContinue.stops_test());
    }

    #[test]
    fn test_outcome_aggregation() {
        use PhaseOutcome::*;
        assert_eq!(TestOutcome::from_phases(&[], false), TestOutcome::Pass);
        assert_eq!(TestOutcome::from_phases(&[Pass, Skip], false), TestOutcome::Pass);
        assert_eq!(TestOutcome::from_phases(&[Pass, Fail], false), TestOutcome::Fail);
        assert_eq!(TestOutcome::from_phases(&[Fail, Error], false), TestOutcome::Error);
        assert_eq!(TestOutcome::from_phases(&[Pass], true), TestOutcome::Aborted);
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&TestOutcome::Aborted).unwrap(),
            "\"ABORTED\""
        );
        assert_eq!(serde_json::to_string(&PhaseOutcome::Skip).unwrap(), "\"SKIP\"");
    }
}
