//! Simulated phone on the far end of the key-value channel.
//!
//! Accepts at most one request at a time.  The poll after a send
//! reports delivery; `latency` polls later the reply (or, every
//! `drop_every`-th exchange, an inbound drop) is queued.  Replies are
//! drawn from a small table with a deterministic generator so runs are
//! reproducible.

use log::{debug, info};

use crate::app::ports::OutboundPort;
use crate::error::{ReasonCode, Result, TransportError};
use crate::events::{EventQueue, InboundEvent};
use crate::weather::message::{MessageKey, Payload, Value, MAX_ENCODED_LEN};

const CONDITIONS: [&str; 6] = ["Clear", "Clouds", "Rain", "Drizzle", "Snow", "Mist"];

/// Reason reported for a simulated inbound drop.
pub const DROP_REASON: ReasonCode = ReasonCode(0x0040);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    /// Request accepted, delivery not yet reported.
    Sending,
    /// Delivered; polls left before the reply.
    Replying(u32),
}

pub struct SimulatedPhone {
    pending: Pending,
    connected: bool,
    latency: u32,
    drop_every: u32,
    exchanges: u32,
    seed: u32,
}

impl Default for SimulatedPhone {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SimulatedPhone {
    pub fn new(latency: u32) -> Self {
        Self {
            pending: Pending::None,
            connected: true,
            latency,
            drop_every: 0,
            exchanges: 0,
            seed: 0x2545_f491,
        }
    }

    /// Drop every `n`-th reply.  `0` never drops.
    pub fn with_drop_every(mut self, n: u32) -> Self {
        self.drop_every = n;
        self
    }

    /// Follow the platform's link state; sends fail while disconnected.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn is_busy(&self) -> bool {
        self.pending != Pending::None
    }

    /// Advance the exchange by one poll, queueing any outcome.
    pub fn poll(&mut self, queue: &EventQueue) -> Result<()> {
        match self.pending {
            Pending::None => {}
            Pending::Sending => {
                queue.push(InboundEvent::OutboundSent)?;
                self.pending = Pending::Replying(self.latency);
            }
            Pending::Replying(0) => {
                self.pending = Pending::None;
                self.exchanges += 1;
                if self.drop_every != 0 && self.exchanges % self.drop_every == 0 {
                    info!("Phone: dropping reply #{}", self.exchanges);
                    queue.push(InboundEvent::InboundDropped(DROP_REASON))?;
                } else {
                    let reply = self.reply()?;
                    queue.push(InboundEvent::WeatherResponse(reply))?;
                }
            }
            Pending::Replying(n) => self.pending = Pending::Replying(n - 1),
        }
        Ok(())
    }

    /// Build a reply and pass it through the wire codec, as the real
    /// channel would.
    fn reply(&mut self) -> Result<Payload> {
        let r = self.next_random();
        let temperature = (r % 40) as i32 - 5;
        let conditions = CONDITIONS[(r / 40) as usize % CONDITIONS.len()];

        let payload = Payload::new()
            .with(MessageKey::TEMPERATURE, Value::Int(temperature))?
            .with(MessageKey::CONDITIONS, Value::text(conditions)?)?;

        let mut buf = [0u8; MAX_ENCODED_LEN];
        let bytes = payload.encode(&mut buf)?;
        debug!("Phone: reply encoded to {} bytes", bytes.len());
        Ok(Payload::decode(bytes)?)
    }

    /// xorshift32.
    fn next_random(&mut self) -> u32 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = x;
        x
    }
}

impl OutboundPort for SimulatedPhone {
    fn send(&mut self, payload: &Payload) -> core::result::Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::Disconnected);
        }
        if self.is_busy() {
            return Err(TransportError::Busy);
        }
        debug!("Phone: received request with {} entries", payload.len());
        self.pending = Pending::Sending;
        Ok(())
    }
}
