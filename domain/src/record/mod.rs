//! Test run records.
//!
//! A [`TestRecord`] accumulates one [`PhaseRecord`] per executed phase plus
//! every [`LogRecord`] phases emit. Its [`TestOutcome`] is derived from the
//! phase outcomes when the run finishes.

pub mod entities;
pub mod outcome;

pub use entities::{LogLevel, LogRecord, PhaseRecord, TestRecord};
pub use outcome::{PhaseOutcome, PhaseResult, TestOutcome};
