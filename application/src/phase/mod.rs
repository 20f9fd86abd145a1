//! Phase contract.
//!
//! A phase is one named step of a test. Capabilities it needs (plugs) are
//! passed to its constructor; at run time it only receives the [`TestApi`].

pub mod api;

pub use api::{TestApi, TestLogger};

use crate::ports::user_input::UserInputError;
use async_trait::async_trait;
use htf_domain::PhaseResult;
use thiserror::Error;

/// Errors a phase can return to the runner.
///
/// Capability errors pass through unchanged so the runner can tell a
/// cancelled prompt from a genuine failure.
#[derive(Error, Debug)]
pub enum PhaseError {
    #[error(transparent)]
    UserInput(#[from] UserInputError),

    #[error("Phase failed: {0}")]
    Failed(String),
}

impl PhaseError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PhaseError::UserInput(e) if e.is_cancelled())
    }
}

#[async_trait]
pub trait Phase: Send + Sync {
    /// Name recorded in the test record and log lines.
    fn name(&self) -> &str;

    async fn run(&self, test: &TestApi) -> Result<PhaseResult, PhaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_error_is_cancelled() {
        assert!(PhaseError::UserInput(UserInputError::Cancelled).is_cancelled());
        assert!(!PhaseError::UserInput(UserInputError::Frontend("tty".into())).is_cancelled());
        assert!(!PhaseError::Failed("bad".into()).is_cancelled());
    }

    #[test]
    fn test_user_input_error_passes_through() {
        let err = PhaseError::from(UserInputError::Cancelled);
        assert_eq!(err.to_string(), "Prompt cancelled");
    }
}
