//! Execute Test use case.
//!
//! Runs the phases of a [`Test`] in order against one DUT and produces the
//! finalized [`TestRecord`].
//!
//! # Phase flow
//!
//! ```text
//! Continue        → PASS, next phase
//! Skip            → SKIP, next phase
//! FailAndContinue → FAIL, next phase
//! Stop            → FAIL, stop
//! Err(_)          → ERROR, stop (ABORTED test if the error was a cancellation)
//! token cancelled → phase future dropped, ABORTED test
//! ```

use crate::config::RunParams;
use crate::phase::{Phase, TestApi, TestLogger};
use crate::ports::record_sink::TestRecordSink;
use crate::ports::test_progress::{NoTestProgress, TestProgressNotifier};
use chrono::Utc;
use htf_domain::{PhaseOutcome, PhaseRecord, TestRecord};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// A named, ordered list of phases.
#[derive(Clone)]
pub struct Test {
    name: String,
    phases: Vec<Arc<dyn Phase>>,
}

impl Test {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phases: Vec::new(),
        }
    }

    pub fn with_phase(mut self, phase: Arc<dyn Phase>) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phases(&self) -> &[Arc<dyn Phase>] {
        &self.phases
    }
}

/// Use case for executing a test.
pub struct TestRunner {
    progress: Arc<dyn TestProgressNotifier>,
    sinks: Vec<Arc<dyn TestRecordSink>>,
    cancellation: CancellationToken,
}

impl TestRunner {
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoTestProgress),
            sinks: Vec::new(),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn TestProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Add an output sink; sinks receive the record in registration order.
    pub fn with_record_sink(mut self, sink: Arc<dyn TestRecordSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub async fn execute(&self, test: &Test, params: &RunParams) -> TestRecord {
        let mut record = TestRecord::new(test.name(), &params.dut_id, &params.station_id);
        let logger = TestLogger::new();
        let mut aborted = false;

        info!(
            "Starting test '{}' on DUT {} ({} phases)",
            test.name(),
            params.dut_id,
            test.phases().len()
        );
        self.progress.on_test_start(test.name(), &params.dut_id);

        for phase in test.phases() {
            if self.cancellation.is_cancelled() {
                aborted = true;
                break;
            }

            let name = phase.name().to_string();
            self.progress.on_phase_start(&name);
            let api = TestApi::new(
                &params.dut_id,
                &params.station_id,
                logger.for_phase(&name),
            );

            let start_time = Utc::now();
            let result = tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => None,
                result = phase.run(&api) => Some(result),
            };

            let (outcome, error, stop) = match result {
                Some(Ok(phase_result)) => (phase_result.outcome(), None, phase_result.stops_test()),
                Some(Err(e)) => {
                    aborted |= e.is_cancelled();
                    warn!("Phase '{}' raised an error: {}", name, e);
                    (PhaseOutcome::Error, Some(e.to_string()), true)
                }
                None => {
                    aborted = true;
                    warn!("Test cancelled during phase '{}'", name);
                    (PhaseOutcome::Error, Some("Test cancelled".to_string()), true)
                }
            };

            let phase_record = PhaseRecord {
                name,
                outcome,
                start_time,
                end_time: Utc::now(),
                error,
            };
            info!(
                "Phase '{}' finished: {} ({} ms)",
                phase_record.name,
                phase_record.outcome,
                phase_record.duration_ms()
            );
            self.progress.on_phase_complete(&phase_record);
            record.add_phase(phase_record);

            if stop {
                break;
            }
        }

        record.log_records = logger.take_records();
        let outcome = record.finalize(aborted);
        info!("Test '{}' finished: {}", test.name(), outcome);

        for sink in &self.sinks {
            if let Err(e) = sink.write(&record) {
                warn!("Record sink '{}' failed: {}", sink.name(), e);
            }
        }
        self.progress.on_test_complete(&record);

        record
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::record_sink::RecordSinkError;
    use crate::phase::PhaseError;
    use crate::ports::user_input::UserInputError;
    use async_trait::async_trait;
    use htf_domain::{PhaseResult, TestOutcome};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Phase returning a fixed result and counting its runs.
    struct StubPhase {
        name: &'static str,
        result: fn() -> Result<PhaseResult, PhaseError>,
        runs: AtomicUsize,
    }

    impl StubPhase {
        fn new(name: &'static str, result: fn() -> Result<PhaseResult, PhaseError>) -> Arc<Self> {
            Arc::new(Self {
                name,
                result,
                runs: AtomicUsize::new(0),
            })
        }

        fn runs(&self) -> usize {
            self.runs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Phase for StubPhase {
        fn name(&self) -> &str {
            self.name
        }

        async fn run(&self, test: &TestApi) -> Result<PhaseResult, PhaseError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            test.logger().info(format_args!("running {}", self.name));
            (self.result)()
        }
    }

    /// Phase that never finishes on its own.
    struct HangingPhase;

    #[async_trait]
    impl Phase for HangingPhase {
        fn name(&self) -> &str {
            "hang"
        }

        async fn run(&self, _test: &TestApi) -> Result<PhaseResult, PhaseError> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        records: Mutex<Vec<TestRecord>>,
    }

    impl TestRecordSink for CollectingSink {
        fn name(&self) -> &str {
            "collect"
        }

        fn write(&self, record: &TestRecord) -> Result<(), RecordSinkError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl TestRecordSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        fn write(&self, _record: &TestRecord) -> Result<(), RecordSinkError> {
            Err(RecordSinkError::Serialization("nope".to_string()))
        }
    }

    fn params() -> RunParams {
        RunParams::default().with_dut_id("DUT-1").with_station_id("bench")
    }

    fn ok() -> Result<PhaseResult, PhaseError> {
        Ok(PhaseResult::Continue)
    }

    #[tokio::test]
    async fn test_all_phases_pass() {
        let a = StubPhase::new("a", ok);
        let b = StubPhase::new("b", ok);
        let test = Test::new("demo").with_phase(a.clone()).with_phase(b.clone());

        let record = TestRunner::new().execute(&test, &params()).await;

        assert_eq!(record.outcome, Some(TestOutcome::Pass));
        assert_eq!(record.dut_id, "DUT-1");
        assert_eq!(record.station_id, "bench");
        assert_eq!(record.phases.len(), 2);
        assert_eq!((a.runs(), b.runs()), (1, 1));
        let messages: Vec<_> = record.log_records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["running a", "running b"]);
        assert_eq!(record.log_records[1].phase.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_fail_and_continue_runs_remaining_phases() {
        let a = StubPhase::new("a", || Ok(PhaseResult::FailAndContinue));
        let b = StubPhase::new("b", || Ok(PhaseResult::Skip));
        let test = Test::new("demo").with_phase(a).with_phase(b.clone());

        let record = TestRunner::new().execute(&test, &params()).await;

        assert_eq!(record.outcome, Some(TestOutcome::Fail));
        assert_eq!(record.phases[1].outcome, PhaseOutcome::Skip);
        assert_eq!(b.runs(), 1);
    }

    #[tokio::test]
    async fn test_stop_ends_test() {
        let a = StubPhase::new("a", || Ok(PhaseResult::Stop));
        let b = StubPhase::new("b", ok);
        let test = Test::new("demo").with_phase(a).with_phase(b.clone());

        let record = TestRunner::new().execute(&test, &params()).await;

        assert_eq!(record.outcome, Some(TestOutcome::Fail));
        assert_eq!(record.phases.len(), 1);
        assert_eq!(b.runs(), 0);
    }

    #[tokio::test]
    async fn test_phase_error_stops_with_error_outcome() {
        let a = StubPhase::new("a", || Err(PhaseError::Failed("fixture open".into())));
        let b = StubPhase::new("b", ok);
        let test = Test::new("demo").with_phase(a).with_phase(b.clone());

        let record = TestRunner::new().execute(&test, &params()).await;

        assert_eq!(record.outcome, Some(TestOutcome::Error));
        assert_eq!(record.phases[0].outcome, PhaseOutcome::Error);
        assert_eq!(
            record.phases[0].error.as_deref(),
            Some("Phase failed: fixture open")
        );
        assert_eq!(b.runs(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_prompt_aborts_test() {
        let a = StubPhase::new("a", || Err(UserInputError::Cancelled.into()));
        let test = Test::new("demo").with_phase(a);

        let record = TestRunner::new().execute(&test, &params()).await;

        assert_eq!(record.outcome, Some(TestOutcome::Aborted));
        assert_eq!(record.phases[0].error.as_deref(), Some("Prompt cancelled"));
    }

    #[tokio::test]
    async fn test_cancellation_drops_running_phase() {
        let token = CancellationToken::new();
        let after = StubPhase::new("after", ok);
        let test = Test::new("demo")
            .with_phase(Arc::new(HangingPhase))
            .with_phase(after.clone());
        let runner = TestRunner::new().with_cancellation(token.clone());

        let cancel = tokio::spawn(async move {
            tokio::task::yield_now().await;
            token.cancel();
        });
        let record = runner.execute(&test, &params()).await;
        cancel.await.unwrap();

        assert_eq!(record.outcome, Some(TestOutcome::Aborted));
        assert_eq!(record.phases.len(), 1);
        assert_eq!(record.phases[0].outcome, PhaseOutcome::Error);
        assert_eq!(record.phases[0].error.as_deref(), Some("Test cancelled"));
        assert_eq!(after.runs(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_runs_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let a = StubPhase::new("a", ok);
        let test = Test::new("demo").with_phase(a.clone());

        let record = TestRunner::new()
            .with_cancellation(token)
            .execute(&test, &params())
            .await;

        assert_eq!(record.outcome, Some(TestOutcome::Aborted));
        assert!(record.phases.is_empty());
        assert_eq!(a.runs(), 0);
    }

    #[tokio::test]
    async fn test_sinks_receive_record_even_if_one_fails() {
        let sink = Arc::new(CollectingSink::default());
        let test = Test::new("demo").with_phase(StubPhase::new("a", ok));

        let record = TestRunner::new()
            .with_record_sink(Arc::new(FailingSink))
            .with_record_sink(sink.clone())
            .execute(&test, &params())
            .await;

        let written = sink.records.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0], record);
        assert_eq!(record.outcome, Some(TestOutcome::Pass));
    }
}
