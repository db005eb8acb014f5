//! Simulated platform services.
//!
//! Stands in for the watch's connectivity and battery services on the
//! host.  The battery drains one percent every `drain_every` polls and
//! "recharges" to 100 after reaching zero; the phone link drops and
//! returns every `toggle_every` polls.  Changes are pushed onto the
//! event queue exactly like the device services would notify them.

use log::debug;

use crate::app::ports::PlatformPort;
use crate::error::Result;
use crate::events::{EventQueue, InboundEvent};

pub struct SimulatedPlatform {
    connected: bool,
    battery_percent: u8,
    polls: u64,
    drain_every: u64,
    toggle_every: u64,
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self::new(true, 100)
    }
}

impl SimulatedPlatform {
    pub fn new(connected: bool, battery_percent: u8) -> Self {
        Self {
            connected,
            battery_percent: battery_percent.min(100),
            polls: 0,
            drain_every: 60,
            toggle_every: 0,
        }
    }

    /// Polls between one-percent battery drops.  `0` disables draining.
    pub fn with_drain_every(mut self, polls: u64) -> Self {
        self.drain_every = polls;
        self
    }

    /// Polls between connectivity flips.  `0` keeps the link steady.
    pub fn with_toggle_every(mut self, polls: u64) -> Self {
        self.toggle_every = polls;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Advance the simulation by one poll, queueing any change events.
    pub fn poll(&mut self, queue: &EventQueue) -> Result<()> {
        self.polls += 1;

        if self.drain_every != 0 && self.polls % self.drain_every == 0 {
            self.battery_percent = match self.battery_percent {
                0 => 100,
                n => n - 1,
            };
            debug!("Platform: battery now {}%", self.battery_percent);
            queue.push(InboundEvent::BatteryChanged(self.battery_percent))?;
        }

        if self.toggle_every != 0 && self.polls % self.toggle_every == 0 {
            self.connected = !self.connected;
            debug!("Platform: connected={}", self.connected);
            queue.push(InboundEvent::ConnectivityChanged(self.connected))?;
        }

        Ok(())
    }
}

impl PlatformPort for SimulatedPlatform {
    fn peek_connectivity(&self) -> bool {
        self.connected
    }

    fn peek_battery(&self) -> u8 {
        self.battery_percent
    }
}
