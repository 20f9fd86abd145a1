//! Prompt requests issued by test phases.

use super::response::ButtonId;
use crate::core::error::DomainError;
use std::time::Duration;

/// A request for operator input.
///
/// Built by a phase, handed to a `UserInput` capability, and dropped once the
/// operator has answered. Button labels that are empty or whitespace-only are
/// treated as absent, so `button_text(..)` returning `Some` always means the
/// button is shown.
///
/// # Example
///
/// ```
/// use htf_domain::PromptRequest;
///
/// let request = PromptRequest::new("Verify the DUT status in the fixture.")
///     .with_html("<div class=\"prompt-large prompt-pass\">PASS</div>")
///     .with_buttons("Continue", "Abort");
/// assert!(request.is_user_question());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// Plain-text message, also used as the fallback display.
    pub message: String,
    /// Markup fragment rendered instead of `message` when present.
    pub prompt_html: Option<String>,
    /// Whether the operator answers with free text.
    pub text_input: bool,
    pub image_url: Option<String>,
    buttons: [Option<String>; 3],
    /// Pre-filled answer, used when the operator submits an empty line.
    pub default_response: Option<String>,
    /// Overrides the capability's default timeout.
    pub timeout: Option<Duration>,
}

impl PromptRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            prompt_html: None,
            text_input: false,
            image_url: None,
            buttons: [None, None, None],
            default_response: None,
            timeout: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.prompt_html = Some(html.into());
        self
    }

    /// Set the primary and secondary button labels.
    pub fn with_buttons(mut self, button_1: impl Into<String>, button_2: impl Into<String>) -> Self {
        self.buttons[0] = non_blank(button_1.into());
        self.buttons[1] = non_blank(button_2.into());
        self
    }

    pub fn with_button_3(mut self, label: impl Into<String>) -> Self {
        self.buttons[2] = non_blank(label.into());
        self
    }

    pub fn with_text_input(mut self) -> Self {
        self.text_input = true;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_default(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(response.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn button_text(&self, id: ButtonId) -> Option<&str> {
        self.buttons[usize::from(id.number() - 1)].as_deref()
    }

    /// Offered buttons in display order.
    pub fn buttons(&self) -> impl Iterator<Item = (ButtonId, &str)> {
        ButtonId::ALL
            .into_iter()
            .filter_map(|id| self.button_text(id).map(|text| (id, text)))
    }

    /// A prompt is a "user question" when it offers at least one button.
    pub fn is_user_question(&self) -> bool {
        self.buttons.iter().any(Option::is_some)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let has_html = self
            .prompt_html
            .as_deref()
            .is_some_and(|html| !html.trim().is_empty());
        if self.message.trim().is_empty() && !has_html {
            return Err(DomainError::InvalidPrompt(
                "prompt has neither a message nor HTML content".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_blank(label: String) -> Option<String> {
    if label.trim().is_empty() {
        None
    } else {
        Some(label)
    }
}
