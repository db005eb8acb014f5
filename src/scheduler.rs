//! Aggregation scheduler.
//!
//! Owns the four display components and merges their fragments into a
//! single [`DisplayModel`].  Driven by the one-second tick; the
//! asynchronous handlers (connectivity, battery, weather) refresh only
//! their own fragment and republish.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         on_tick                              │
//! │                                                              │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐   │
//! │  │ 1. Clock  │─▶│ 2. Uptime │─▶│ 3. Weather│─▶│4. Publish│   │
//! │  │  format   │  │ tick+draw │  │   gate    │  │  model   │   │
//! │  └───────────┘  └───────────┘  └─────┬─────┘  └──────────┘   │
//! │                                      │                       │
//! │                                      ▼                       │
//! │                                 OutboundPort                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDateTime, Timelike};
use log::debug;

use crate::app::ports::OutboundPort;
use crate::clock::ClockFormatter;
use crate::config::WatchfaceConfig;
use crate::display::DisplayModel;
use crate::error::ReasonCode;
use crate::status::StatusTracker;
use crate::uptime::UptimeCounter;
use crate::weather::message::Payload;
use crate::weather::{SyncState, Trigger, WeatherReading, WeatherSync};

/// What happened to the weather machine during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Gate evaluation result, `None` if the minute was already evaluated.
    pub trigger: Option<Trigger>,
    /// The outstanding request timed out on this tick.
    pub timed_out: bool,
}

pub struct AggregationScheduler {
    clock: ClockFormatter,
    uptime: UptimeCounter,
    status: StatusTracker,
    weather: WeatherSync,
    model: DisplayModel,
    /// Minute the gate was last evaluated at.
    last_gate_minute: Option<u8>,
}

impl AggregationScheduler {
    pub fn new(config: &WatchfaceConfig) -> Self {
        let mut scheduler = Self {
            clock: ClockFormatter::new(),
            uptime: UptimeCounter::new(),
            status: StatusTracker::new(),
            weather: WeatherSync::new(config),
            model: DisplayModel::default(),
            last_gate_minute: None,
        };
        scheduler.publish();
        scheduler
    }

    /// Run one refresh cycle for the tick carrying `now`.
    ///
    /// Never blocks and never fails; a refused send is folded into the
    /// weather machine and reported through the returned [`TickReport`].
    pub fn on_tick(&mut self, now: &NaiveDateTime, outbound: &mut impl OutboundPort) -> TickReport {
        // 1. Clock
        self.clock.format(now);

        // 2. Uptime
        self.uptime.tick();
        self.uptime.render();

        // 3. Weather: timeout first, then the gate once per minute
        let mut report = TickReport {
            timed_out: self.weather.on_second_elapsed(),
            ..Default::default()
        };
        let minute = now.minute() as u8;
        if self.last_gate_minute != Some(minute) {
            self.last_gate_minute = Some(minute);
            report.trigger = Some(self.weather.maybe_trigger(minute, outbound));
        }

        // 4. Publish
        self.publish();
        report
    }

    pub fn on_connectivity_changed(&mut self, connected: bool) -> &DisplayModel {
        self.status.on_connectivity_changed(connected);
        self.publish()
    }

    pub fn on_battery_changed(&mut self, percent: u8) -> &DisplayModel {
        self.status.on_battery_changed(percent);
        self.publish()
    }

    pub fn on_weather_response(&mut self, payload: &Payload) -> &DisplayModel {
        self.weather.on_response_received(payload);
        self.publish()
    }

    /// Returns `true` if a request was outstanding.
    pub fn on_outbound_failed(&mut self, reason: ReasonCode) -> bool {
        let was_waiting = self.weather.state() == SyncState::AwaitingResponse;
        self.weather.on_outbound_delivery_failed(reason);
        was_waiting
    }

    pub fn on_outbound_sent(&mut self) {
        self.weather.on_outbound_delivery_succeeded();
    }

    /// Returns `true` if a request was outstanding.
    pub fn on_inbound_dropped(&mut self, reason: ReasonCode) -> bool {
        let was_waiting = self.weather.state() == SyncState::AwaitingResponse;
        self.weather.on_response_dropped(reason);
        was_waiting
    }

    pub fn model(&self) -> &DisplayModel {
        &self.model
    }

    pub fn sync_state(&self) -> SyncState {
        self.weather.state()
    }

    pub fn reading(&self) -> &WeatherReading {
        self.weather.reading()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.uptime.elapsed_secs()
    }

    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    /// Rebuild the model from the component buffers and swap it in whole.
    fn publish(&mut self) -> &DisplayModel {
        self.model = DisplayModel {
            time: self.clock.current().clone(),
            uptime: self.uptime.current().clone(),
            connectivity: self.status.connectivity_block().clone(),
            battery: self.status.battery_block().clone(),
            weather: self.weather.block().clone(),
        };
        debug!("Display model published");
        &self.model
    }
}
