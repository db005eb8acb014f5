//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the aggregation scheduler and is the single
//! dispatcher for [`InboundEvent`]s.  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  PlatformPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                   │       AppService       │
//!  OutboundPort ◀── │  Scheduler · Weather   │
//!                   └────────────────────────┘
//! ```

use chrono::Timelike;
use log::{info, warn};

use crate::config::WatchfaceConfig;
use crate::display::DisplayModel;
use crate::events::InboundEvent;
use crate::scheduler::AggregationScheduler;
use crate::weather::{SyncState, Trigger, WeatherReading};

use super::events::{AppEvent, SyncOutcome};
use super::ports::{EventSink, OutboundPort, PlatformPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    scheduler: AggregationScheduler,
    started: bool,
    events_handled: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** query the platform — call [`start`](Self::start) next.
    pub fn new(config: &WatchfaceConfig) -> Self {
        let scheduler = AggregationScheduler::new(config);
        Self {
            scheduler,
            started: false,
            events_handled: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Seed connectivity and battery from the platform and publish the
    /// first model.
    pub fn start(&mut self, platform: &impl PlatformPort, sink: &mut impl EventSink) {
        let connected = platform.peek_connectivity();
        let battery_percent = platform.peek_battery();
        self.scheduler.on_connectivity_changed(connected);
        self.scheduler.on_battery_changed(battery_percent);
        self.started = true;

        sink.emit(&AppEvent::Started {
            connected,
            battery_percent,
        });
        sink.emit(&AppEvent::DisplayUpdated(self.scheduler.model().clone()));
        info!(
            "AppService started (connected={}, battery={}%)",
            connected, battery_percent
        );
    }

    // ── Event dispatch ────────────────────────────────────────

    /// Apply one inbound event.  Events must be fed in arrival order.
    pub fn dispatch(
        &mut self,
        event: InboundEvent,
        outbound: &mut impl OutboundPort,
        sink: &mut impl EventSink,
    ) {
        if !self.started {
            warn!("Event {:?} before start, applying anyway", event);
        }
        self.events_handled += 1;

        match event {
            InboundEvent::Tick(now) => {
                let report = self.scheduler.on_tick(&now, outbound);
                if report.timed_out {
                    sink.emit(&AppEvent::WeatherSyncIdle(SyncOutcome::TimedOut));
                }
                let minute = now.minute() as u8;
                match report.trigger {
                    Some(Trigger::Sent) => {
                        sink.emit(&AppEvent::WeatherRequested { minute });
                    }
                    Some(Trigger::SendFailed(e)) => {
                        sink.emit(&AppEvent::WeatherRequested { minute });
                        sink.emit(&AppEvent::WeatherSyncIdle(SyncOutcome::SendRefused(e)));
                    }
                    Some(Trigger::NotDue | Trigger::Suppressed) | None => {}
                }
                self.publish(sink);
            }
            InboundEvent::ConnectivityChanged(connected) => {
                self.scheduler.on_connectivity_changed(connected);
                self.publish(sink);
            }
            InboundEvent::BatteryChanged(percent) => {
                self.scheduler.on_battery_changed(percent);
                self.publish(sink);
            }
            InboundEvent::WeatherResponse(payload) => {
                let was_waiting = self.scheduler.sync_state() == SyncState::AwaitingResponse;
                self.scheduler.on_weather_response(&payload);
                if was_waiting {
                    sink.emit(&AppEvent::WeatherSyncIdle(SyncOutcome::Received));
                }
                self.publish(sink);
            }
            InboundEvent::OutboundSent => self.scheduler.on_outbound_sent(),
            InboundEvent::OutboundFailed(reason) => {
                if self.scheduler.on_outbound_failed(reason) {
                    sink.emit(&AppEvent::WeatherSyncIdle(SyncOutcome::DeliveryFailed(reason)));
                }
            }
            InboundEvent::InboundDropped(reason) => {
                if self.scheduler.on_inbound_dropped(reason) {
                    sink.emit(&AppEvent::WeatherSyncIdle(SyncOutcome::Dropped(reason)));
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Latest published display model.
    pub fn display(&self) -> &DisplayModel {
        self.scheduler.model()
    }

    pub fn sync_state(&self) -> SyncState {
        self.scheduler.sync_state()
    }

    /// Seconds since activation.
    pub fn uptime_secs(&self) -> u64 {
        self.scheduler.uptime_secs()
    }

    /// Last known weather.
    pub fn reading(&self) -> &WeatherReading {
        self.scheduler.reading()
    }

    pub fn events_handled(&self) -> u64 {
        self.events_handled
    }

    // ── Internal ──────────────────────────────────────────────

    fn publish(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::DisplayUpdated(self.scheduler.model().clone()));
    }
}
