//! Test record formatting for the console

use colored::{ColoredString, Colorize};
use htf_domain::{LogLevel, PhaseOutcome, TestOutcome, TestRecord};

/// Formats finished [`TestRecord`]s
pub struct RecordFormatter;

impl RecordFormatter {
    /// Human-readable summary of a run
    pub fn format_summary(record: &TestRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Test Record"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Test:".cyan().bold(), record.test_name));
        output.push_str(&format!("{} {}\n", "DUT:".cyan().bold(), record.dut_id));
        output.push_str(&format!(
            "{} {}\n",
            "Station:".cyan().bold(),
            record.station_id
        ));
        if let Some(end) = record.end_time {
            let elapsed = (end - record.start_time).num_milliseconds();
            output.push_str(&format!(
                "{} {} ({} ms)\n",
                "Started:".cyan().bold(),
                record.start_time.format("%Y-%m-%d %H:%M:%S UTC"),
                elapsed
            ));
        }

        output.push_str(&Self::section_header("Phases"));
        for phase in &record.phases {
            output.push_str(&format!(
                "  {:<8} {} ({} ms)\n",
                Self::paint_phase(phase.outcome),
                phase.name,
                phase.duration_ms()
            ));
            if let Some(error) = &phase.error {
                output.push_str(&format!("           {}\n", error.red()));
            }
        }

        if !record.log_records.is_empty() {
            output.push_str(&Self::section_header("Log"));
            for log in &record.log_records {
                let level = match log.level {
                    LogLevel::Debug => "DEBUG".dimmed(),
                    LogLevel::Info => "INFO".normal(),
                    LogLevel::Warning => "WARN".yellow(),
                    LogLevel::Error => "ERROR".red(),
                };
                output.push_str(&format!("  {:<5} {}\n", level, log.message));
            }
        }

        let outcome = match record.outcome {
            Some(outcome) => Self::paint_test(outcome),
            None => "UNFINISHED".yellow().bold(),
        };
        output.push_str(&format!("\n{} {}\n", "Outcome:".bold(), outcome));

        output
    }

    /// Format as JSON
    pub fn format_json(record: &TestRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn paint_phase(outcome: PhaseOutcome) -> ColoredString {
        match outcome {
            PhaseOutcome::Pass => outcome.as_str().green().bold(),
            PhaseOutcome::Fail | PhaseOutcome::Error => outcome.as_str().red().bold(),
            PhaseOutcome::Skip => outcome.as_str().yellow(),
        }
    }

    pub fn paint_test(outcome: TestOutcome) -> ColoredString {
        match outcome {
            TestOutcome::Pass => outcome.as_str().green().bold(),
            TestOutcome::Aborted => outcome.as_str().yellow().bold(),
            TestOutcome::Fail | TestOutcome::Error => outcome.as_str().red().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "═".repeat(60);
        format!(
            "\n{}\n{}\n{}\n",
            line.cyan(),
            format!("  {}", title).cyan().bold(),
            line.cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("── {} ──", title).cyan().bold())
    }
}
