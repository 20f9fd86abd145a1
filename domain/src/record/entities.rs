//! Test and phase records.

use super::outcome::{PhaseOutcome, TestOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A log line emitted by a phase through the test logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Name of the phase that logged it, if any.
    pub phase: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(level: LogLevel, phase: Option<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            phase,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub name: String,
    pub outcome: PhaseOutcome,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Error message when `outcome` is `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhaseRecord {
    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}

/// Everything recorded about one test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_name: String,
    pub dut_id: String,
    pub station_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub outcome: Option<TestOutcome>,
    pub phases: Vec<PhaseRecord>,
    pub log_records: Vec<LogRecord>,
}

impl TestRecord {
    pub fn new(
        test_name: impl Into<String>,
        dut_id: impl Into<String>,
        station_id: impl Into<String>,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            dut_id: dut_id.into(),
            station_id: station_id.into(),
            start_time: Utc::now(),
            end_time: None,
            outcome: None,
            phases: Vec::new(),
            log_records: Vec::new(),
        }
    }

    pub fn add_phase(&mut self, phase: PhaseRecord) {
        self.phases.push(phase);
    }

    /// Stamp the end time and derive the outcome from the phase records.
    pub fn finalize(&mut self, aborted: bool) -> TestOutcome {
        let outcome = TestOutcome::from_phases(self.phases.iter().map(|p| &p.outcome), aborted);
        self.outcome = Some(outcome);
        self.end_time = Some(Utc::now());
        outcome
    }

    pub fn is_finalized(&self) -> bool {
        self.outcome.is_some()
    }
}
