//! Weather sync state machine.
//!
//! ```text
//!            maybe_trigger [gate && Idle] / send request
//!   ┌──────┐ ─────────────────────────────────────────▶ ┌──────────────────┐
//!   │ Idle │                                            │ AwaitingResponse │
//!   └──────┘ ◀───────────────────────────────────────── └──────────────────┘
//!              response · delivery failed · dropped · timeout
//! ```
//!
//! At most one request is outstanding.  A failed or dropped exchange
//! never clears the last reading; the machine just waits for the next
//! gate.

pub mod message;

use log::{debug, info, warn};

use crate::app::ports::OutboundPort;
use crate::config::WatchfaceConfig;
use crate::display::{rewrite, WeatherBlock};
use crate::error::{ReasonCode, TransportError};

use message::{decode_entry, Conditions, Payload, WeatherField};

/// Text shown for a field that has never been received.
pub const LOADING: &str = "Loading...";

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// No outstanding request.
    Idle,
    /// Request sent, no terminal outcome yet.
    AwaitingResponse,
}

impl SyncState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::AwaitingResponse => "AwaitingResponse",
        }
    }
}

/// Result of evaluating the sync gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The minute does not satisfy the gate.
    NotDue,
    /// Gate held but a request is already outstanding.
    Suppressed,
    /// Request handed to the transport.
    Sent,
    /// Request emitted but the transport refused it; back to `Idle`.
    SendFailed(TransportError),
}

impl Trigger {
    /// Whether an outbound request was emitted.
    pub fn emitted(self) -> bool {
        matches!(self, Self::Sent | Self::SendFailed(_))
    }
}

/// Last known weather.  Each field persists until overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherReading {
    pub temperature: Option<i32>,
    pub conditions: Option<Conditions>,
}

impl WeatherReading {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.conditions.is_none()
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

pub struct WeatherSync {
    state: SyncState,
    reading: WeatherReading,
    buf: WeatherBlock,
    interval_mins: u8,
    /// 0 disables the timeout.
    timeout_secs: u32,
    /// Seconds spent in `AwaitingResponse`.
    secs_awaiting: u32,
}

impl WeatherSync {
    pub fn new(config: &WatchfaceConfig) -> Self {
        let mut sync = Self {
            state: SyncState::Idle,
            reading: WeatherReading::default(),
            buf: WeatherBlock::new(),
            interval_mins: config.weather_sync_interval_mins.max(1),
            timeout_secs: config.weather_response_timeout_secs,
            secs_awaiting: 0,
        };
        sync.render();
        sync
    }

    /// Evaluate the gate for `minute` and, if due and idle, send one request.
    pub fn maybe_trigger(&mut self, minute: u8, outbound: &mut impl OutboundPort) -> Trigger {
        if minute % self.interval_mins != 0 {
            return Trigger::NotDue;
        }
        if self.state == SyncState::AwaitingResponse {
            debug!("Weather sync: gate at minute {} suppressed, request outstanding", minute);
            return Trigger::Suppressed;
        }

        self.transition(SyncState::AwaitingResponse);
        match outbound.send(&Payload::weather_request()) {
            Ok(()) => {
                info!("Weather sync: request sent at minute {}", minute);
                Trigger::Sent
            }
            Err(e) => {
                warn!("Weather sync: request not accepted by transport: {}", e);
                self.on_outbound_delivery_failed(e.reason());
                Trigger::SendFailed(e)
            }
        }
    }

    /// Apply every recognised entry of an inbound payload, then go idle.
    pub fn on_response_received(&mut self, payload: &Payload) -> &WeatherBlock {
        if self.state == SyncState::Idle {
            debug!("Weather sync: unsolicited response, applying anyway");
        }

        for entry in payload.iter() {
            match decode_entry(entry) {
                Ok(Some(WeatherField::Temperature(t))) => self.reading.temperature = Some(t),
                Ok(Some(WeatherField::Conditions(c))) => self.reading.conditions = Some(c),
                Ok(None) => warn!("Weather sync: ignoring unrecognised key {}", entry.key.0),
                Err(e) => warn!("Weather sync: skipping key {}: {}", entry.key.0, e),
            }
        }

        self.transition(SyncState::Idle);
        self.render()
    }

    /// The inbound message was dropped by the transport.
    pub fn on_response_dropped(&mut self, reason: ReasonCode) {
        warn!("Weather sync: inbound message dropped (reason {})", reason);
        self.transition(SyncState::Idle);
    }

    /// The outbound request could not be delivered.
    pub fn on_outbound_delivery_failed(&mut self, reason: ReasonCode) {
        warn!("Weather sync: outbound delivery failed (reason {})", reason);
        self.transition(SyncState::Idle);
    }

    /// The outbound request reached the phone.  Informational only.
    pub fn on_outbound_delivery_succeeded(&mut self) {
        debug!("Weather sync: request delivered, state {}", self.state.name());
    }

    /// Account one second of waiting.  Returns `true` if the wait timed out.
    pub fn on_second_elapsed(&mut self) -> bool {
        if self.state != SyncState::AwaitingResponse || self.timeout_secs == 0 {
            return false;
        }
        self.secs_awaiting = self.secs_awaiting.saturating_add(1);
        if self.secs_awaiting < self.timeout_secs {
            return false;
        }
        warn!(
            "Weather sync: no response after {}s, giving up until next gate",
            self.secs_awaiting
        );
        self.transition(SyncState::Idle);
        true
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn reading(&self) -> &WeatherReading {
        &self.reading
    }

    pub fn block(&self) -> &WeatherBlock {
        &self.buf
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: SyncState) {
        if next != self.state {
            info!("Weather sync: {} -> {}", self.state.name(), next.name());
            self.state = next;
        }
        self.secs_awaiting = 0;
    }

    fn render(&mut self) -> &WeatherBlock {
        let conditions = self.reading.conditions.as_deref().unwrap_or(LOADING);
        match self.reading.temperature {
            Some(t) => rewrite(
                &mut self.buf,
                format_args!("TEMPERATURE: {t}C\nWEATHER: {conditions}"),
            ),
            None => rewrite(
                &mut self.buf,
                format_args!("TEMPERATURE: {LOADING}\nWEATHER: {conditions}"),
            ),
        }
        &self.buf
    }
}
