//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw output configuration from TOML
///
/// # Example
///
/// ```toml
/// [output]
/// color = true
/// record_file = "records/operator_prompt.jsonl"   # one JSON test record per line
/// log_file = "logs/prompt-html.log"               # tracing output (non-blocking)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Append finished test records to this JSONL file
    pub record_file: Option<PathBuf>,
    /// Also write diagnostic logs to this file
    pub log_file: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            record_file: None,
            log_file: None,
        }
    }
}
