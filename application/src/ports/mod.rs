//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod record_sink;
pub mod test_progress;
pub mod user_input;
