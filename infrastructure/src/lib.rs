//! Infrastructure layer for htf-prompt
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod output;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileOutputConfig, FilePromptConfig, FileStationConfig,
    PromptFrontend,
};
pub use output::JsonlRecordWriter;
