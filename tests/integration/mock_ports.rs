//! Mock port adapters for integration tests.
//!
//! Records every outbound send and every emitted event so tests can
//! assert on the full history without a phone or a screen.

use chrono::{NaiveDate, NaiveDateTime};
use verbose_watchface::app::events::{AppEvent, SyncOutcome};
use verbose_watchface::app::ports::{EventSink, OutboundPort, PlatformPort};
use verbose_watchface::display::DisplayModel;
use verbose_watchface::error::TransportError;
use verbose_watchface::weather::message::{MessageKey, Payload, Value};

// ── MockOutbound ──────────────────────────────────────────────

pub struct MockOutbound {
    pub sent: Vec<Payload>,
    /// Returned from every `send` while set.
    pub refuse_with: Option<TransportError>,
}

#[allow(dead_code)]
impl MockOutbound {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            refuse_with: None,
        }
    }

    pub fn requests(&self) -> usize {
        self.sent.len()
    }
}

impl Default for MockOutbound {
    fn default() -> Self {
        Self::new()
    }
}

impl OutboundPort for MockOutbound {
    fn send(&mut self, payload: &Payload) -> Result<(), TransportError> {
        self.sent.push(payload.clone());
        match self.refuse_with {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── MockPlatform ──────────────────────────────────────────────

pub struct MockPlatform {
    pub connected: bool,
    pub battery: u8,
}

impl PlatformPort for MockPlatform {
    fn peek_connectivity(&self) -> bool {
        self.connected
    }

    fn peek_battery(&self) -> u8 {
        self.battery
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn last_display(&self) -> Option<&DisplayModel> {
        self.events.iter().rev().find_map(|e| match e {
            AppEvent::DisplayUpdated(m) => Some(m),
            _ => None,
        })
    }

    pub fn display_updates(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::DisplayUpdated(_)))
            .count()
    }

    pub fn requests(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::WeatherRequested { minute } => Some(*minute),
                _ => None,
            })
            .collect()
    }

    pub fn outcomes(&self) -> Vec<SyncOutcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::WeatherSyncIdle(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

#[allow(dead_code)]
pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[allow(dead_code)]
pub fn weather(temp: i32, conditions: &str) -> Payload {
    Payload::new()
        .with(MessageKey::TEMPERATURE, Value::Int(temp))
        .unwrap()
        .with(MessageKey::CONDITIONS, Value::text(conditions).unwrap())
        .unwrap()
}
