//! Key-value messages exchanged with the phone.
//!
//! A message is an ordered list of `(key, value)` entries, the same shape
//! the watch platform's app-message dictionaries have.  On the wire the
//! payload is `postcard`-encoded:
//!
//! ```text
//! ┌──────────┬─────────────┬───────────────┬─────┐
//! │ count    │ key (varint)│ tagged value  │ ... │
//! │ (varint) │             │               │     │
//! └──────────┴─────────────┴───────────────┴─────┘
//! ```
//!
//! The transport itself is opaque; this module only defines the shape
//! and the decode of the two weather fields.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Maximum entries carried by one payload.
///
/// Decoding is all-or-nothing: bytes carrying more entries than this, or a
/// text value longer than [`TEXT_CAP`], fail as a whole with
/// [`WeatherError::Decode`] even if a valid weather field is among them.
pub const MAX_ENTRIES: usize = 8;

/// Capacity of a text value.  See [`MAX_ENTRIES`] for oversized values.
pub const TEXT_CAP: usize = 32;

/// Longest accepted conditions text: 31 bytes including the NUL terminator
/// the phone side appends.
pub const CONDITIONS_MAX_LEN: usize = 30;

/// Upper bound on an encoded payload; generous for [`MAX_ENTRIES`] entries
/// of [`TEXT_CAP`] bytes each.
pub const MAX_ENCODED_LEN: usize = 1 + MAX_ENTRIES * (5 + 1 + 1 + TEXT_CAP);

pub type Conditions = String<TEXT_CAP>;

/// Dictionary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageKey(pub u32);

impl MessageKey {
    /// Outbound "please send weather" trigger.  The phone reacts to the
    /// message arriving, not to its content.
    pub const REQUEST: Self = Self(0);
    /// Inbound temperature in whole degrees Celsius.
    pub const TEMPERATURE: Self = Self(0);
    /// Inbound short conditions text ("Clear", "Rain", ...).
    pub const CONDITIONS: Self = Self(1);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Int(i32),
    UInt(u32),
    Text(String<TEXT_CAP>),
    Bytes(Vec<u8, TEXT_CAP>),
}

impl Value {
    /// Text value; fails if `s` exceeds the text capacity.
    pub fn text(s: &str) -> Result<Self, WeatherError> {
        let mut out = String::new();
        out.push_str(s).map_err(|_| WeatherError::ConditionsTooLong)?;
        Ok(Self::Text(out))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: MessageKey,
    pub value: Value,
}

/// Ordered key-value payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    entries: Vec<Entry, MAX_ENTRIES>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outbound weather request: one entry, a single zero byte.
    pub fn weather_request() -> Self {
        let mut payload = Self::new();
        // A fresh payload always has room for one entry.
        let _ = payload.entries.push(Entry {
            key: MessageKey::REQUEST,
            value: Value::UInt(0),
        });
        payload
    }

    /// Append an entry, preserving arrival order.
    pub fn push(&mut self, key: MessageKey, value: Value) -> Result<(), WeatherError> {
        self.entries
            .push(Entry { key, value })
            .map_err(|_| WeatherError::PayloadTooLarge)
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, key: MessageKey, value: Value) -> Result<Self, WeatherError> {
        self.push(key, value)?;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode into `buf`, returning the used prefix.
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], WeatherError> {
        postcard::to_slice(self, buf).map_err(|_| WeatherError::Encode)
    }

    /// Decode a payload received from the transport.
    pub fn decode(bytes: &[u8]) -> Result<Self, WeatherError> {
        postcard::from_bytes(bytes).map_err(|_| WeatherError::Decode)
    }
}

/// A recognised weather field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherField {
    Temperature(i32),
    Conditions(Conditions),
}

/// Interpret one entry.
///
/// `Ok(None)` means the key is not one the watchface understands; the
/// caller logs and skips it.
pub fn decode_entry(entry: &Entry) -> Result<Option<WeatherField>, WeatherError> {
    match entry.key {
        MessageKey::TEMPERATURE => match &entry.value {
            Value::Int(t) => Ok(Some(WeatherField::Temperature(*t))),
            Value::UInt(t) => i32::try_from(*t)
                .map(|t| Some(WeatherField::Temperature(t)))
                .map_err(|_| WeatherError::TemperatureOutOfRange),
            _ => Err(WeatherError::UnexpectedValueType { key: entry.key.0 }),
        },
        MessageKey::CONDITIONS => match &entry.value {
            Value::Text(text) if text.len() > CONDITIONS_MAX_LEN => {
                Err(WeatherError::ConditionsTooLong)
            }
            Value::Text(text) => Ok(Some(WeatherField::Conditions(text.clone()))),
            _ => Err(WeatherError::UnexpectedValueType { key: entry.key.0 }),
        },
        _ => Ok(None),
    }
}
