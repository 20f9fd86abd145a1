//! Operator prompt phase.
//!
//! Shows the operator a large PASS banner and asks them to confirm the DUT
//! status with Continue or Abort. The selected button token is written to the
//! test log; the phase itself always continues.

use crate::phase::{Phase, PhaseError, TestApi};
use crate::ports::user_input::UserInput;
use crate::use_cases::execute_test::Test;
use async_trait::async_trait;
use htf_domain::{PhaseResult, PromptRequest};
use std::sync::Arc;

pub const PHASE_NAME: &str = "operator_prompt_example";

pub const PROMPT_MESSAGE: &str = "Verify the DUT status in the fixture.";

pub const PROMPT_HTML: &str = concat!(
    r#"<div class="prompt-large prompt-pass" style="text-align:center;">"#,
    "PASS",
    "</div>",
    "<div>Click Continue to proceed.</div>",
);

pub const CONTINUE_LABEL: &str = "Continue";
pub const ABORT_LABEL: &str = "Abort";

/// Phase asking the operator to confirm the DUT status.
pub struct OperatorPromptPhase {
    prompts: Arc<dyn UserInput>,
}

impl OperatorPromptPhase {
    pub fn new(prompts: Arc<dyn UserInput>) -> Self {
        Self { prompts }
    }

    /// The request this phase issues.
    pub fn request() -> PromptRequest {
        PromptRequest::new(PROMPT_MESSAGE)
            .with_html(PROMPT_HTML)
            .with_buttons(CONTINUE_LABEL, ABORT_LABEL)
    }
}

#[async_trait]
impl Phase for OperatorPromptPhase {
    fn name(&self) -> &str {
        PHASE_NAME
    }

    async fn run(&self, test: &TestApi) -> Result<PhaseResult, PhaseError> {
        let response = self.prompts.prompt(Self::request()).await?;
        test.logger()
            .info(format_args!("Operator selected: {}", response));
        Ok(PhaseResult::Continue)
    }
}

/// The single-phase operator prompt test.
pub fn operator_prompt_test(prompts: Arc<dyn UserInput>) -> Test {
    Test::new(PHASE_NAME).with_phase(Arc::new(OperatorPromptPhase::new(prompts)))
}
