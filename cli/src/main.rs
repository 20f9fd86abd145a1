//! CLI entrypoint for prompt-html
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use htf_application::{
    FixedResponseInput, PromptCoordinator, RunParams, TestRunner, UserInput,
    operator_prompt_test,
};
use htf_domain::{PromptResponse, Severity};
use htf_infrastructure::{ConfigLoader, FileConfig, JsonlRecordWriter, PromptFrontend};
use htf_presentation::{
    Cli, ConsoleProgress, ConsolePromptFrontend, OutputFormat, RecordFormatter, spawn_stdin_reader,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_config_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    // Flushes buffered file logs when dropped
    let log_guard = init_logging(
        cli.verbose,
        cli.log_file.as_deref().or(config.output.log_file.as_deref()),
    )?;

    info!("Starting prompt-html");
    check_config(&config)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let mut params = config.to_run_params();
    if let Some(dut_id) = &cli.dut_id {
        params = params.with_dut_id(dut_id);
    }
    if let Some(station_id) = &cli.station_id {
        params = params.with_station_id(station_id);
    }
    if let Some(secs) = cli.timeout {
        params = params.with_prompt_timeout(Some(Duration::from_secs(secs)));
    }

    // === Cancellation ===
    let cancellation = CancellationToken::new();
    {
        let cancellation = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling test run");
                cancellation.cancel();
            }
        });
    }

    // === Dependency Injection ===
    let prompts = build_prompts(&cli, &config, &params, &cancellation);

    let mut runner = TestRunner::new().with_cancellation(cancellation.clone());
    if !cli.quiet {
        runner = runner.with_progress(Arc::new(
            ConsoleProgress::new().with_stream(cli.output.status_stream()),
        ));
    }
    if let Some(path) = cli.record.as_ref().or(config.output.record_file.as_ref()) {
        let writer = JsonlRecordWriter::new(path)
            .with_context(|| format!("Failed to open record file {}", path.display()))?;
        info!("Recording test results to {}", writer.path().display());
        runner = runner.with_record_sink(Arc::new(writer));
    }

    let test = operator_prompt_test(prompts);
    let record = runner.execute(&test, &params).await;

    // Stops the console frontend if one is running
    cancellation.cancel();

    let output = match cli.output {
        OutputFormat::Summary => RecordFormatter::format_summary(&record),
        OutputFormat::Json => RecordFormatter::format_json(&record),
    };
    println!("{}", output);

    if !record.outcome.is_some_and(|outcome| outcome.is_pass()) {
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}

/// Log to stderr, filtered by `-v` count, and optionally to a file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let Some(file_name) = path.file_name() else {
                bail!("Invalid log file path: {}", path.display());
            };
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(level)),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print config issues; errors abort startup.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => eprintln!("config warning: {}", issue.message),
        }
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }
    Ok(())
}

/// The operator prompt capability: a fixed answer for unattended runs,
/// otherwise the interactive console frontend.
fn build_prompts(
    cli: &Cli,
    config: &FileConfig,
    params: &RunParams,
    cancellation: &CancellationToken,
) -> Arc<dyn UserInput> {
    let auto_response = match &cli.auto {
        Some(token) => Some(PromptResponse::new(token.trim())),
        None if config.prompt.parse_frontend().0 == PromptFrontend::Auto => {
            config.prompt.auto_response()
        }
        None => None,
    };

    if let Some(response) = auto_response {
        info!("Answering prompts automatically with '{}'", response);
        return Arc::new(FixedResponseInput::new(response));
    }

    let mut coordinator = PromptCoordinator::new().with_cancellation(cancellation.clone());
    if let Some(timeout) = params.prompt_timeout {
        coordinator = coordinator.with_default_timeout(timeout);
    }
    let coordinator = Arc::new(coordinator);

    // JSON output owns stdout, so the prompt view moves to stderr
    let frontend = ConsolePromptFrontend::new(&coordinator, spawn_stdin_reader())
        .with_stream(cli.output.status_stream());
    tokio::spawn(frontend.run());

    coordinator
}
