//! Operator responses to a prompt.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the (up to three) buttons a prompt can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonId {
    Button1,
    Button2,
    Button3,
}

impl ButtonId {
    pub const ALL: [ButtonId; 3] = [ButtonId::Button1, ButtonId::Button2, ButtonId::Button3];

    /// 1-based position of the button.
    pub fn number(&self) -> u8 {
        match self {
            ButtonId::Button1 => 1,
            ButtonId::Button2 => 2,
            ButtonId::Button3 => 3,
        }
    }

    pub fn from_number(n: u8) -> Result<Self, DomainError> {
        match n {
            1 => Ok(ButtonId::Button1),
            2 => Ok(ButtonId::Button2),
            3 => Ok(ButtonId::Button3),
            other => Err(DomainError::InvalidButton(other)),
        }
    }

    /// Wire token reported when this button is pressed (`button_1`, ...).
    pub fn as_token(&self) -> &'static str {
        match self {
            ButtonId::Button1 => "button_1",
            ButtonId::Button2 => "button_2",
            ButtonId::Button3 => "button_3",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_token() == token)
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// The value a prompt resolves to.
///
/// For button questions this is the pressed button's token; for text-input
/// prompts it is whatever the operator typed. The token format is owned by
/// the frontend that answered, so this type does not reject unknown values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptResponse(String);

impl PromptResponse {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn button(id: ButtonId) -> Self {
        Self(id.as_token().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The button this response names, if it is a button token.
    pub fn selected_button(&self) -> Option<ButtonId> {
        ButtonId::from_token(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PromptResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ButtonId> for PromptResponse {
    fn from(id: ButtonId) -> Self {
        Self::button(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_tokens() {
        assert_eq!(ButtonId::Button1.as_token(), "button_1");
        assert_eq!(ButtonId::Button3.to_string(), "button_3");
        assert_eq!(ButtonId::from_token("button_2"), Some(ButtonId::Button2));
        assert_eq!(ButtonId::from_token("Button_2"), None);
    }

    #[test]
    fn test_button_from_number() {
        assert_eq!(ButtonId::from_number(1), Ok(ButtonId::Button1));
        assert_eq!(ButtonId::from_number(0), Err(DomainError::InvalidButton(0)));
        assert_eq!(ButtonId::from_number(4), Err(DomainError::InvalidButton(4)));
    }

    #[test]
    fn test_response_selected_button() {
        assert_eq!(
            PromptResponse::button(ButtonId::Button2).selected_button(),
            Some(ButtonId::Button2)
        );
        assert_eq!(PromptResponse::new("SN-0042").selected_button(), None);
    }

    #[test]
    fn test_response_serializes_as_plain_string() {
        let json = serde_json::to_string(&PromptResponse::button(ButtonId::Button1)).unwrap();
        assert_eq!(json, "\"button_1\"");
    }
}
