//! Inbound event system.
//!
//! Events are produced by:
//! - the platform tick service (one per second, with local time)
//! - the connectivity and battery services (on change)
//! - the phone channel (inbound payloads and delivery outcomes)
//!
//! Events are consumed by the dispatcher, which applies them one at a
//! time in strict arrival order.  Nothing is reordered or coalesced.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Tick service │────▶│              │     │              │
//! │ Connectivity │────▶│  EventQueue  │────▶│  AppService  │
//! │ Battery      │────▶│   (FIFO)     │     │  ::dispatch  │
//! │ Phone channel│────▶│              │     │              │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use chrono::NaiveDateTime;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;

use crate::error::{Error, ReasonCode, Result};
use crate::weather::message::Payload;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 16;

/// Everything the watchface reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// One-second tick carrying the current local time.
    Tick(NaiveDateTime),
    /// Phone connection came up or went down.
    ConnectivityChanged(bool),
    /// Battery charge level changed (0–100).
    BatteryChanged(u8),
    /// Weather payload arrived from the phone.
    WeatherResponse(Payload),
    /// The last outbound message was delivered.
    OutboundSent,
    /// The last outbound message could not be delivered.
    OutboundFailed(ReasonCode),
    /// An inbound message was dropped before it could be read.
    InboundDropped(ReasonCode),
}

/// Bounded FIFO between event sources and the dispatcher.
///
/// Single-threaded: producers and the consumer run on the same thread
/// of control, so the channel uses a no-op mutex.
pub struct EventQueue {
    channel: Channel<NoopRawMutex, InboundEvent, EVENT_QUEUE_CAP>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueue an event.  Fails with [`Error::QueueFull`] when the
    /// dispatcher has fallen [`EVENT_QUEUE_CAP`] events behind.
    pub fn push(&self, event: InboundEvent) -> Result<()> {
        self.channel.try_send(event).map_err(|_| Error::QueueFull)
    }

    /// Dequeue the oldest event.
    pub fn pop(&self) -> Option<InboundEvent> {
        self.channel.try_receive().ok()
    }

    /// Drain all pending events into a handler, oldest first.
    /// Events pushed by the handler itself are drained in the same call.
    pub fn drain(&self, mut handler: impl FnMut(InboundEvent)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
