//! Station configuration from TOML (`[station]` section)

use htf_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw station configuration from TOML
///
/// # Example
///
/// ```toml
/// [station]
/// station_id = "bench-3"
/// dut_id = "SN-000123"     # usually passed per run with --dut-id
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStationConfig {
    pub station_id: Option<String>,
    pub dut_id: Option<String>,
}

impl FileStationConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("station.station_id", &self.station_id),
            ("station.dut_id", &self.dut_id),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    format!("{}: must not be empty when set", field),
                ));
            }
        }
        issues
    }
}
