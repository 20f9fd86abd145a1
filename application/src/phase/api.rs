//! Per-phase view of the running test.

use htf_domain::{LogLevel, LogRecord};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Test log sink handed to phases.
///
/// Each line is stored as a [`LogRecord`] for the test record and mirrored
/// to `tracing` under the `htf::test` target. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct TestLogger {
    phase: Option<String>,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl TestLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger writing to the same buffer, tagged with `phase`.
    pub fn for_phase(&self, phase: impl Into<String>) -> Self {
        Self {
            phase: Some(phase.into()),
            records: self.records.clone(),
        }
    }

    pub fn debug(&self, message: impl Display) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Display) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Display) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Display) {
        self.log(LogLevel::Error, message);
    }

    pub fn log(&self, level: LogLevel, message: impl Display) {
        let message = message.to_string();
        let phase = self.phase.as_deref().unwrap_or("-");
        match level {
            LogLevel::Debug => debug!(target: "htf::test", phase, "{}", message),
            LogLevel::Info => info!(target: "htf::test", phase, "{}", message),
            LogLevel::Warning => warn!(target: "htf::test", phase, "{}", message),
            LogLevel::Error => error!(target: "htf::test", phase, "{}", message),
        }
        self.lock()
            .push(LogRecord::new(level, self.phase.clone(), message));
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn take_records(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// What a phase sees of the test it runs in.
pub struct TestApi {
    dut_id: String,
    station_id: String,
    logger: TestLogger,
}

impl TestApi {
    pub fn new(dut_id: impl Into<String>, station_id: impl Into<String>, logger: TestLogger) -> Self {
        Self {
            dut_id: dut_id.into(),
            station_id: station_id.into(),
            logger,
        }
    }

    pub fn dut_id(&self) -> &str {
        &self.dut_id
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn logger(&self) -> &TestLogger {
        &self.logger
    }
}
