//! Domain layer for htf-prompt
//!
//! This crate contains the prompt model, the prompt HTML sanitizer, and the
//! test record types. It has no dependencies on async runtimes, terminals,
//! or configuration files.
//!
//! # Core Concepts
//!
//! ## Prompts
//!
//! A phase asks the operator something with a [`PromptRequest`]. The
//! capability answering it publishes a [`PromptState`] (with sanitized
//! display HTML) to a frontend and eventually resolves to a
//! [`PromptResponse`], usually a button token such as `button_1`.
//!
//! ## Records
//!
//! Every run produces a [`TestRecord`] holding phase outcomes and the log
//! lines phases emitted.

pub mod config;
pub mod core;
pub mod html;
pub mod prompt;
pub mod record;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::error::DomainError;
pub use html::{plain_text_to_html, sanitize_prompt_html};
pub use prompt::{ButtonId, PromptId, PromptRequest, PromptResponse, PromptState};
pub use record::{
    LogLevel, LogRecord, PhaseOutcome, PhaseRecord, PhaseResult, TestOutcome, TestRecord,
};
