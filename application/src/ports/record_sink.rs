//! Port for persisting finished test records (output callbacks).
//!
//! The runner hands the finalized [`TestRecord`] to every registered sink.
//! A failing sink is logged and skipped; it never changes the test outcome.

use htf_domain::TestRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordSinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub trait TestRecordSink: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    fn write(&self, record: &TestRecord) -> Result<(), RecordSinkError>;
}
