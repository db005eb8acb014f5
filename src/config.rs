//! Watchface configuration parameters
//!
//! All tunable parameters for the watchface core.  The host binary can
//! load an override from a JSON file; everything else uses the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core watchface configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchfaceConfig {
    // --- Weather sync ---
    /// A weather request is due when `minute % interval == 0`.
    pub weather_sync_interval_mins: u8,
    /// Seconds to wait for a terminal outcome before returning to idle.
    /// `0` waits forever.
    pub weather_response_timeout_secs: u32,

    // --- Timing ---
    /// Tick period of the host simulation (milliseconds)
    pub tick_interval_ms: u32,
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self {
            // Weather
            weather_sync_interval_mins: 30,
            weather_response_timeout_secs: 300, // 5 min

            // Timing
            tick_interval_ms: 1000, // 1 Hz
        }
    }
}

impl WatchfaceConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        let interval = self.weather_sync_interval_mins;
        if interval == 0 || interval > 60 {
            return Err(Error::Config("weather_sync_interval_mins must be 1-60"));
        }
        if 60 % interval != 0 {
            return Err(Error::Config("weather_sync_interval_mins must divide 60"));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        let timeout_ms = u64::from(self.weather_response_timeout_secs) * 1000;
        if self.weather_response_timeout_secs != 0 && timeout_ms < u64::from(self.tick_interval_ms) {
            return Err(Error::Config("weather_response_timeout_secs shorter than one tick"));
        }
        Ok(())
    }

    /// Parse and validate a JSON override.  Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }
}
