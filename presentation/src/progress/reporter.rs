//! Console progress reporting for test runs

use crate::output::formatter::RecordFormatter;
use crate::output::stream::OutputStream;
use colored::Colorize;
use htf_application::TestProgressNotifier;
use htf_domain::{PhaseRecord, TestRecord};

/// Prints a line per phase start and finish.
pub struct ConsoleProgress {
    stream: OutputStream,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            stream: OutputStream::Stdout,
        }
    }

    pub fn with_stream(mut self, stream: OutputStream) -> Self {
        self.stream = stream;
        self
    }

    pub fn phase_finished_line(phase: &PhaseRecord) -> String {
        let mut line = format!(
            "{} {} {} ({} ms)",
            "◀".cyan(),
            phase.name,
            RecordFormatter::paint_phase(phase.outcome),
            phase.duration_ms()
        );
        if let Some(error) = &phase.error {
            line.push_str(&format!(": {}", error.red()));
        }
        line
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProgressNotifier for ConsoleProgress {
    fn on_test_start(&self, test_name: &str, dut_id: &str) {
        self.stream.println(format_args!(
            "{} {} {}",
            "Starting test".cyan().bold(),
            test_name.bold(),
            format!("(DUT {})", dut_id).dimmed()
        ));
    }

    fn on_phase_start(&self, phase_name: &str) {
        self.stream.println(format_args!("{} {}", "▶".cyan(), phase_name));
    }

    fn on_phase_complete(&self, phase: &PhaseRecord) {
        self.stream.println(Self::phase_finished_line(phase));
    }

    fn on_test_complete(&self, record: &TestRecord) {
        if let Some(outcome) = record.outcome {
            self.stream.println(format_args!(
                "{} {} {}",
                "Test".cyan().bold(),
                record.test_name.bold(),
                RecordFormatter::paint_test(outcome)
            ));
        }
    }
}
