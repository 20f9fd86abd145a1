//! Configuration file loading for htf-prompt
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `HTF_PROMPT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./htf-prompt.toml` or `./.htf-prompt.toml`
//! 4. Global: `$XDG_CONFIG_HOME/htf-prompt/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileOutputConfig, FilePromptConfig, FileStationConfig, PromptFrontend,
};
pub use loader::ConfigLoader;
