//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types by
//! [`FileConfig::to_run_params`].

mod output;
mod prompt;
mod station;

pub use output::FileOutputConfig;
pub use prompt::{FilePromptConfig, PromptFrontend};
pub use station::FileStationConfig;

use htf_application::RunParams;
use htf_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Station and DUT identity
    pub station: FileStationConfig,
    /// Operator prompt settings
    pub prompt: FilePromptConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.station.validate();
        issues.extend(self.prompt.validate());
        issues
    }

    /// Run parameters from this config, with built-in defaults for unset
    /// (or blank) values.
    pub fn to_run_params(&self) -> RunParams {
        let mut params = RunParams::default().with_prompt_timeout(self.prompt.parse_timeout().0);
        if let Some(station_id) = non_blank(&self.station.station_id) {
            params = params.with_station_id(station_id);
        }
        if let Some(dut_id) = non_blank(&self.station.dut_id) {
            params = params.with_dut_id(dut_id);
        }
        params
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
