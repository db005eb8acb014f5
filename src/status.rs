//! Status tracker: phone connectivity and battery level.
//!
//! Two independent sub-trackers, each fed by its own event source.
//! Both must also be fed once at start-up from a peek of the platform
//! state, since the first change event may arrive much later or never.

use log::warn;

use crate::display::{fragment, rewrite, BatteryBlock, ConnectivityBlock};

pub const CONNECTIVITY_PLACEHOLDER: &str = "CONNECTED (Y/N): -";
pub const BATTERY_PLACEHOLDER: &str = "BATTERY LEVEL: --%";

pub struct StatusTracker {
    connected: Option<bool>,
    battery_percent: Option<u8>,
    connectivity_buf: ConnectivityBlock,
    battery_buf: BatteryBlock,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            connected: None,
            battery_percent: None,
            connectivity_buf: fragment(CONNECTIVITY_PLACEHOLDER),
            battery_buf: fragment(BATTERY_PLACEHOLDER),
        }
    }

    /// Record a connectivity reading and re-render its fragment.
    pub fn on_connectivity_changed(&mut self, connected: bool) -> &ConnectivityBlock {
        self.connected = Some(connected);
        rewrite(
            &mut self.connectivity_buf,
            format_args!("CONNECTED (Y/N): {}", if connected { 'Y' } else { 'N' }),
        );
        &self.connectivity_buf
    }

    /// Record a battery reading and re-render its fragment.
    /// Readings above 100 are clamped.
    pub fn on_battery_changed(&mut self, percent: u8) -> &BatteryBlock {
        let percent = if percent > 100 {
            warn!("Battery reading {}% out of range, clamping to 100%", percent);
            100
        } else {
            percent
        };
        self.battery_percent = Some(percent);
        rewrite(
            &mut self.battery_buf,
            format_args!("BATTERY LEVEL: {percent}%"),
        );
        &self.battery_buf
    }

    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    pub fn battery_percent(&self) -> Option<u8> {
        self.battery_percent
    }

    pub fn connectivity_block(&self) -> &ConnectivityBlock {
        &self.connectivity_buf
    }

    pub fn battery_block(&self) -> &BatteryBlock {
        &self.battery_buf
    }
}
