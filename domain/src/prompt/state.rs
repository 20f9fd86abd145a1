//! Frontend-facing snapshot of the active prompt.

use super::request::PromptRequest;
use super::response::ButtonId;
use crate::html::{plain_text_to_html, sanitize_prompt_html};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one issued prompt. Frontends echo it back when responding so
/// a stale answer cannot complete a newer prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(u64);

impl PromptId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prompt-{}", self.0)
    }
}

/// Serializable prompt state published to frontends.
///
/// `display_html` is always safe to render: it is either the sanitized
/// `prompt_html` or the escaped plain-text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PromptState {
    pub id: PromptId,
    pub message: String,
    pub prompt_html: Option<String>,
    pub text_input: bool,
    pub image_url: Option<String>,
    #[serde(rename = "button-1-text")]
    pub button_1_text: Option<String>,
    #[serde(rename = "button-2-text")]
    pub button_2_text: Option<String>,
    #[serde(rename = "button-3-text")]
    pub button_3_text: Option<String>,
    #[serde(rename = "default")]
    pub default_response: Option<String>,
    pub display_html: String,
}

impl PromptState {
    pub fn from_request(id: PromptId, request: &PromptRequest) -> Self {
        let display_html = match request.prompt_html.as_deref() {
            Some(html) if !html.trim().is_empty() => sanitize_prompt_html(html),
            _ => plain_text_to_html(&request.message),
        };

        Self {
            id,
            message: request.message.clone(),
            prompt_html: request.prompt_html.clone(),
            text_input: request.text_input,
            image_url: request.image_url.clone(),
            button_1_text: request.button_text(ButtonId::Button1).map(str::to_string),
            button_2_text: request.button_text(ButtonId::Button2).map(str::to_string),
            button_3_text: request.button_text(ButtonId::Button3).map(str::to_string),
            default_response: request.default_response.clone(),
            display_html,
        }
    }

    pub fn button_text(&self, id: ButtonId) -> Option<&str> {
        match id {
            ButtonId::Button1 => self.button_1_text.as_deref(),
            ButtonId::Button2 => self.button_2_text.as_deref(),
            ButtonId::Button3 => self.button_3_text.as_deref(),
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = (ButtonId, &str)> {
        ButtonId::ALL
            .into_iter()
            .filter_map(|id| self.button_text(id).map(|text| (id, text)))
    }

    pub fn is_user_question(&self) -> bool {
        self.buttons().next().is_some()
    }
}
