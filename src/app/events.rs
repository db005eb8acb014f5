//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — draw the fragments, log them, etc.

use crate::display::DisplayModel;
use crate::error::{ReasonCode, TransportError};

/// How an outstanding weather exchange ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A response payload arrived and was applied.
    Received,
    /// The transport refused the request outright.
    SendRefused(TransportError),
    /// The request was sent but not delivered.
    DeliveryFailed(ReasonCode),
    /// The inbound response was dropped.
    Dropped(ReasonCode),
    /// No terminal outcome arrived within the configured timeout.
    TimedOut,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started; carries the peeked platform state.
    Started { connected: bool, battery_percent: u8 },

    /// A new display model was published.
    DisplayUpdated(DisplayModel),

    /// A weather request was emitted at the given minute.
    WeatherRequested { minute: u8 },

    /// The weather exchange reached a terminal outcome; sync is idle again.
    WeatherSyncIdle(SyncOutcome),
}
