//! Prompt configuration from TOML (`[prompt]` section)

use htf_domain::{ConfigIssue, ConfigIssueCode, PromptResponse};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Who answers operator prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptFrontend {
    /// A human at the terminal.
    #[default]
    Console,
    /// A fixed response, for unattended runs.
    Auto,
}

impl FromStr for PromptFrontend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "terminal" => Ok(PromptFrontend::Console),
            "auto" => Ok(PromptFrontend::Auto),
            other => Err(format!("unknown prompt frontend '{}'", other)),
        }
    }
}

impl fmt::Display for PromptFrontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptFrontend::Console => f.write_str("console"),
            PromptFrontend::Auto => f.write_str("auto"),
        }
    }
}

/// Raw prompt configuration from TOML
///
/// # Example
///
/// ```toml
/// [prompt]
/// timeout_secs = 120          # omit to wait forever
/// frontend = "console"        # "console" or "auto"
/// auto_response = "button_1"  # required when frontend = "auto"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    pub timeout_secs: Option<u64>,
    pub frontend: String,
    pub auto_response: Option<String>,
}

impl Default for FilePromptConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            frontend: "console".to_string(),
            auto_response: None,
        }
    }
}

impl FilePromptConfig {
    /// Parse the frontend name, falling back to console with a warning.
    pub fn parse_frontend(&self) -> (PromptFrontend, Vec<ConfigIssue>) {
        match self.frontend.parse::<PromptFrontend>() {
            Ok(frontend) => (frontend, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "prompt.frontend".to_string(),
                        value: self.frontend.clone(),
                        valid_values: vec!["console".to_string(), "auto".to_string()],
                    },
                    format!(
                        "prompt.frontend: unknown value '{}', falling back to 'console'",
                        self.frontend
                    ),
                );
                (PromptFrontend::default(), vec![issue])
            }
        }
    }

    /// Parse the timeout; zero is rejected because it would fail every prompt.
    pub fn parse_timeout(&self) -> (Option<Duration>, Vec<ConfigIssue>) {
        match self.timeout_secs {
            Some(0) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: "prompt.timeout_secs".to_string(),
                    },
                    "prompt.timeout_secs: must be at least 1 (omit it to wait forever)",
                );
                (None, vec![issue])
            }
            secs => (secs.map(Duration::from_secs), vec![]),
        }
    }

    /// The configured auto response, if non-blank.
    pub fn auto_response(&self) -> Option<PromptResponse> {
        self.auto_response
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PromptResponse::new)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (frontend, mut issues) = self.parse_frontend();
        issues.extend(self.parse_timeout().1);

        match (frontend, self.auto_response()) {
            (PromptFrontend::Auto, None) => issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "prompt.auto_response".to_string(),
                },
                "prompt.auto_response: required when prompt.frontend = \"auto\"",
            )),
            (PromptFrontend::Console, Some(_)) => issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnusedValue {
                    field: "prompt.auto_response".to_string(),
                },
                "prompt.auto_response: ignored because prompt.frontend = \"console\"",
            )),
            _ => {}
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htf_domain::Severity;

    #[test]
    fn test_parse_frontend() {
        let mut config = FilePromptConfig::default();
        assert_eq!(config.parse_frontend().0, PromptFrontend::Console);

        config.frontend = "AUTO".to_string();
        assert_eq!(config.parse_frontend().0, PromptFrontend::Auto);

        config.frontend = "web".to_string();
        let (frontend, issues) = config.parse_frontend();
        assert_eq!(frontend, PromptFrontend::Console);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_parse_timeout() {
        let mut config = FilePromptConfig::default();
        assert_eq!(config.parse_timeout().0, None);

        config.timeout_secs = Some(30);
        assert_eq!(config.parse_timeout().0, Some(Duration::from_secs(30)));

        config.timeout_secs = Some(0);
        let (timeout, issues) = config.parse_timeout();
        assert_eq!(timeout, None);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_auto_requires_response() {
        let config = FilePromptConfig {
            frontend: "auto".to_string(),
            auto_response: Some(" ".to_string()),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_auto_response_ignored_for_console() {
        let config = FilePromptConfig {
            auto_response: Some("button_1".to_string()),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(
            config.auto_response().map(PromptResponse::into_inner),
            Some("button_1".to_string())
        );
    }

    #[test]
    fn test_frontend_display_roundtrips() {
        for frontend in [PromptFrontend::Console, PromptFrontend::Auto] {
            assert_eq!(frontend.to_string().parse::<PromptFrontend>(), Ok(frontend));
        }
    }
}
