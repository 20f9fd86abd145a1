//! Presentation layer for htf-prompt
//!
//! This crate contains the CLI definition, the terminal prompt frontend,
//! progress reporting, and test record formatting.

pub mod cli;
pub mod console;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use console::frontend::{ConsolePromptFrontend, parse_operator_input, spawn_stdin_reader};
pub use console::prompt_view::PromptView;
pub use output::formatter::RecordFormatter;
pub use output::stream::OutputStream;
pub use progress::reporter::ConsoleProgress;
