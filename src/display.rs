//! Render model handed to the presentation layer.
//!
//! Every fragment is a fixed-capacity string owned by exactly one
//! component.  Capacities are sized to the worst-case formatted length
//! of that fragment; exceeding one is a programming defect, not a
//! runtime condition.

use core::fmt::{self, Write};

use heapless::String;

use crate::weather::message::CONDITIONS_MAX_LEN;

/// Widest rendering of an `i32` (`-2147483648`).
const I32_MAX_WIDTH: usize = 11;

/// Worst case is ~170 bytes; the layout guarantees at least 200.
pub const TIME_BLOCK_CAP: usize = 256;
pub const UPTIME_BLOCK_CAP: usize = 48;
pub const CONNECTIVITY_BLOCK_CAP: usize = 32;
pub const BATTERY_BLOCK_CAP: usize = 32;
/// `TEMPERATURE: {i32}C\nWEATHER: {conditions}` at its widest.
pub const WEATHER_BLOCK_CAP: usize =
    "TEMPERATURE: ".len() + I32_MAX_WIDTH + "C\nWEATHER: ".len() + CONDITIONS_MAX_LEN;

pub type TimeBlock = String<TIME_BLOCK_CAP>;
pub type UptimeBlock = String<UPTIME_BLOCK_CAP>;
pub type ConnectivityBlock = String<CONNECTIVITY_BLOCK_CAP>;
pub type BatteryBlock = String<BATTERY_BLOCK_CAP>;
pub type WeatherBlock = String<WEATHER_BLOCK_CAP>;

/// Snapshot of all five fragments.
///
/// Replaced wholesale on every publish; consumers never observe a
/// half-updated model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayModel {
    pub time: TimeBlock,
    pub uptime: UptimeBlock,
    pub connectivity: ConnectivityBlock,
    pub battery: BatteryBlock,
    pub weather: WeatherBlock,
}

impl DisplayModel {
    /// Fragments in top-to-bottom screen order.
    pub fn fragments(&self) -> [&str; 5] {
        [
            self.time.as_str(),
            self.uptime.as_str(),
            self.connectivity.as_str(),
            self.battery.as_str(),
            self.weather.as_str(),
        ]
    }
}

/// Overwrite `buf` with the formatted arguments.
///
/// The previous content is discarded; the new content stays valid until
/// the next call on the same buffer.
pub(crate) fn rewrite<const N: usize>(buf: &mut String<N>, args: fmt::Arguments<'_>) {
    buf.clear();
    if buf.write_fmt(args).is_err() {
        debug_assert!(false, "fragment overflow: capacity {N} too small");
    }
}

/// Build a fragment from static text.
pub(crate) fn fragment<const N: usize>(text: &str) -> String<N> {
    let mut buf = String::new();
    rewrite(&mut buf, format_args!("{text}"));
    buf
}
