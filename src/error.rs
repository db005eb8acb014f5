//! Unified error types for the watchface core.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! the dispatcher's error handling uniform.  All variants are `Copy` so
//! they can be logged and carried in outbound events without allocation.
//!
//! None of these errors is fatal: the dispatcher logs them and the
//! affected fragment stays at its last known (or placeholder) text.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An inbound weather payload or one of its entries was malformed.
    Weather(WeatherError),
    /// The outbound key-value channel refused a message.
    Transport(TransportError),
    /// The inbound event queue is full; the event was dropped.
    QueueFull,
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weather(e) => write!(f, "weather: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::QueueFull => write!(f, "event queue full"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Weather payload errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherError {
    /// A recognised key carried a value of the wrong type.
    UnexpectedValueType { key: u32 },
    /// Temperature did not fit a signed 32-bit integer.
    TemperatureOutOfRange,
    /// Conditions text longer than the 30 visible bytes the display allows.
    ConditionsTooLong,
    /// More entries than a payload can hold.
    PayloadTooLarge,
    /// Payload bytes could not be encoded into the supplied buffer.
    Encode,
    /// Payload bytes could not be decoded.
    Decode,
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedValueType { key } => write!(f, "unexpected value type for key {key}"),
            Self::TemperatureOutOfRange => write!(f, "temperature out of range"),
            Self::ConditionsTooLong => write!(f, "conditions text too long"),
            Self::PayloadTooLarge => write!(f, "payload has too many entries"),
            Self::Encode => write!(f, "payload encode failed"),
            Self::Decode => write!(f, "payload decode failed"),
        }
    }
}

impl From<WeatherError> for Error {
    fn from(e: WeatherError) -> Self {
        Self::Weather(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Opaque reason code attached to delivery failures and inbound drops.
///
/// The watchface never interprets it beyond logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReasonCode(pub u32);

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The channel is still busy with a previous message.
    Busy,
    /// No peer is connected.
    Disconnected,
    /// The channel rejected the message with a platform reason code.
    Rejected(ReasonCode),
}

impl TransportError {
    /// Reason code to report alongside a delivery failure.
    pub fn reason(self) -> ReasonCode {
        match self {
            Self::Busy => ReasonCode(0x0010),
            Self::Disconnected => ReasonCode(0x0008),
            Self::Rejected(code) => code,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "channel busy"),
            Self::Disconnected => write!(f, "peer disconnected"),
            Self::Rejected(code) => write!(f, "rejected ({code})"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
