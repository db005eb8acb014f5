//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (platform services, the phone channel, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches the
//! watch platform directly.

use crate::error::TransportError;
use crate::weather::message::Payload;

// ───────────────────────────────────────────────────────────────
// Outbound port (driven adapter: domain → phone)
// ───────────────────────────────────────────────────────────────

/// The key-value channel to the phone.
///
/// Delivery is asynchronous: `Ok` only means the message was accepted
/// for sending.  The final outcome arrives later as an
/// [`InboundEvent`](crate::events::InboundEvent).  An `Err` is an
/// immediate refusal and counts as a delivery failure.
pub trait OutboundPort {
    fn send(&mut self, payload: &Payload) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Platform port (driven adapter: OS services → domain)
// ───────────────────────────────────────────────────────────────

/// Start-up queries of the platform's connectivity and battery services.
///
/// Change notifications arrive as events; these peeks only seed the
/// fragments so they are not blank until the first change.
pub trait PlatformPort {
    fn peek_connectivity(&self) -> bool;

    /// Charge level, 0–100.
    fn peek_battery(&self) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → presentation / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  The presentation layer listens for
/// `DisplayUpdated`; a log adapter may record everything.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
