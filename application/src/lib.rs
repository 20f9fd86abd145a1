//! Application layer for htf-prompt
//!
//! This crate contains the phase contract, port definitions, the operator
//! prompt plug, and the test runner. It depends only on the domain layer.

pub mod config;
pub mod phase;
pub mod plugs;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RunParams;
pub use phase::{Phase, PhaseError, TestApi, TestLogger};
pub use plugs::user_input::PromptCoordinator;
pub use ports::{
    record_sink::{RecordSinkError, TestRecordSink},
    test_progress::{NoTestProgress, TestProgressNotifier},
    user_input::{FixedResponseInput, UserInput, UserInputError},
};
pub use use_cases::execute_test::{Test, TestRunner};
pub use use_cases::operator_prompt::{OperatorPromptPhase, operator_prompt_test};
