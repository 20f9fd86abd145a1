//! Application-level configuration.
//!
//! - [`RunParams`]: DUT/station identity and prompt policy for one run

pub mod run_params;

pub use run_params::RunParams;
