//! Operator prompts: requests, responses, and the published prompt state.
//!
//! - [`request::PromptRequest`]: what a phase asks the operator
//! - [`response::PromptResponse`]: what the operator answered
//! - [`state::PromptState`]: the sanitized snapshot a frontend displays

pub mod request;
pub mod response;
pub mod state;

pub use request::PromptRequest;
pub use response::{ButtonId, PromptResponse};
pub use state::{PromptId, PromptState};
