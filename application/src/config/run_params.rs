//! Run parameters: DUT and station identity plus prompt policy.
//!
//! [`RunParams`] groups the values the runner and the prompt plug need for
//! one test run. They are resolved by the binary from CLI flags and the
//! config file; this layer does not read either.

use std::time::Duration;

pub const DEFAULT_STATION_ID: &str = "station";
pub const DEFAULT_DUT_ID: &str = "UNKNOWN_DUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    /// Serial number or other identifier of the device under test.
    pub dut_id: String,
    pub station_id: String,
    /// Default operator prompt timeout; `None` waits forever.
    pub prompt_timeout: Option<Duration>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            dut_id: DEFAULT_DUT_ID.to_string(),
            station_id: DEFAULT_STATION_ID.to_string(),
            prompt_timeout: None,
        }
    }
}

impl RunParams {
    // ==================== Builder Methods ====================

    pub fn with_dut_id(mut self, dut_id: impl Into<String>) -> Self {
        self.dut_id = dut_id.into();
        self
    }

    pub fn with_station_id(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = station_id.into();
        self
    }

    pub fn with_prompt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.prompt_timeout = timeout;
        self
    }
}
