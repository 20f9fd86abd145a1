//! Progress notification port
//!
//! Defines the interface for reporting progress during a test run.

use htf_domain::{PhaseRecord, TestRecord};

/// Callback for progress updates during a test run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait TestProgressNotifier: Send + Sync {
    /// Called before the first phase runs
    fn on_test_start(&self, _test_name: &str, _dut_id: &str) {}

    /// Called when a phase starts
    fn on_phase_start(&self, _phase: &str) {}

    /// Called when a phase finishes, whatever its outcome
    fn on_phase_complete(&self, _phase: &PhaseRecord) {}

    /// Called once the record is finalized and written to the sinks
    fn on_test_complete(&self, _record: &TestRecord) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoTestProgress;

impl TestProgressNotifier for NoTestProgress {}
