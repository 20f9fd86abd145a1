//! CLI command definitions

use crate::output::stream::OutputStream;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Rendering of the final test record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Summary,
    /// Pretty-printed JSON record
    Json,
}

impl OutputFormat {
    /// Stream for prompts and progress, keeping stdout parseable for JSON.
    pub fn status_stream(&self) -> OutputStream {
        match self {
            OutputFormat::Summary => OutputStream::Stdout,
            OutputFormat::Json => OutputStream::Stderr,
        }
    }
}

/// CLI arguments for prompt-html
#[derive(Parser, Debug)]
#[command(name = "prompt-html")]
#[command(author, version, about = "Operator prompt test phase with HTML content")]
#[command(long_about = r#"
Runs a one-phase hardware test that asks the operator to confirm the DUT
status. The prompt shows an HTML banner and two buttons:

  [1] Continue  [2] Abort

Type a number, a button label, or press Enter for the default. The phase
logs the operator's choice and passes either way.

Configuration files are loaded from (in priority order):
1. HTF_PROMPT_* environment variables (e.g. HTF_PROMPT_STATION__DUT_ID)
2. --config <path>       Explicit config file
3. ./htf-prompt.toml     Project-level config
4. ~/.config/htf-prompt/config.toml   Global config

Example:
  prompt-html --dut-id SN-0042
  prompt-html --auto button_1 --record records.jsonl
  prompt-html --timeout 30 -o json
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Identifier of the device under test
    #[arg(long, value_name = "ID")]
    pub dut_id: Option<String>,

    /// Identifier of this test station
    #[arg(long, value_name = "ID")]
    pub station_id: Option<String>,

    /// Answer every prompt with TOKEN instead of asking (e.g. button_1)
    #[arg(long, value_name = "TOKEN")]
    pub auto: Option<String>,

    /// Fail a prompt left unanswered for this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Append the test record to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub record: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Output format for the final record
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Suppress phase progress lines
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["prompt-html"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.output, OutputFormat::Summary);
        assert!(cli.auto.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "prompt-html",
            "-vv",
            "--dut-id",
            "SN-1",
            "--station-id",
            "bench-1",
            "--auto",
            "button_2",
            "--timeout",
            "30",
            "--record",
            "out/records.jsonl",
            "--no-color",
            "-o",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.dut_id.as_deref(), Some("SN-1"));
        assert_eq!(cli.station_id.as_deref(), Some("bench-1"));
        assert_eq!(cli.auto.as_deref(), Some("button_2"));
        assert_eq!(cli.timeout, Some(30));
        assert_eq!(cli.record, Some(PathBuf::from("out/records.jsonl")));
        assert!(cli.no_color);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_json_output_moves_status_to_stderr() {
        assert_eq!(OutputFormat::Summary.status_stream(), OutputStream::Stdout);
        assert_eq!(OutputFormat::Json.status_stream(), OutputStream::Stderr);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["prompt-html", "--timeout", "0"]).is_err());
    }
}
