//! User input port: the operator prompt capability phases depend on.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`UserInput`] - defined here in application layer
//! - **Adapters**:
//!   - [`PromptCoordinator`](crate::plugs::user_input::PromptCoordinator) -
//!     publishes the prompt to a frontend and waits for `respond()`
//!   - [`FixedResponseInput`] - answers every prompt with a configured token
//!
//! # Flow
//!
//! ```text
//! Phase::run()
//!        ↓
//! UserInput::prompt(request)      ← suspends here
//!        ↓
//! Frontend shows prompt, operator presses a button
//!        ↓
//! PromptResponse ("button_1")
//! ```

use async_trait::async_trait;
use htf_domain::{DomainError, PromptId, PromptRequest, PromptResponse};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Error type for user input operations.
///
/// These errors represent failures while waiting for the operator,
/// not answers the operator gave.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserInputError {
    /// The prompt was cancelled (test aborted, Ctrl+C, frontend gave up).
    #[error("Prompt cancelled")]
    Cancelled,

    /// The operator did not answer in time.
    #[error("Prompt timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Another prompt is still waiting for an answer.
    #[error("Another prompt is already active ({0})")]
    MultiplePrompts(PromptId),

    /// A response referenced a prompt that is not active.
    #[error("No active prompt with id {0}")]
    UnknownPrompt(PromptId),

    #[error(transparent)]
    InvalidPrompt(#[from] DomainError),

    /// The frontend failed (e.g. terminal read failure).
    #[error("Frontend error: {0}")]
    Frontend(String),
}

impl UserInputError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UserInputError::Cancelled)
    }
}

/// Capability for asking the operator a question.
///
/// `prompt` suspends the calling phase until the operator answers, the
/// implementation times out, or the prompt is cancelled. Timeout and
/// cancellation policy belong to the implementation.
#[async_trait]
pub trait UserInput: Send + Sync {
    async fn prompt(&self, request: PromptRequest) -> Result<PromptResponse, UserInputError>;
}

/// Answers every prompt with the same response, without a human.
///
/// Used for unattended runs (`--auto button_1`).
pub struct FixedResponseInput {
    response: PromptResponse,
}

impl FixedResponseInput {
    pub fn new(response: PromptResponse) -> Self {
        Self { response }
    }
}

#[async_trait]
impl UserInput for FixedResponseInput {
    async fn prompt(&self, request: PromptRequest) -> Result<PromptResponse, UserInputError> {
        request.validate()?;
        info!(
            "Auto-answering prompt '{}' with {}",
            request.message, self.response
        );
        Ok(self.response.clone())
    }
}
