//! Clock formatter.
//!
//! Renders the verbose time block: every way the watchface knows how to
//! say what time it is, one per line.
//!
//! ```text
//! STANDARD TIME: 14:07
//! AMERICAN TIME: 02:07 PM
//! COUNT SECONDS: 09/59
//! DATE: 2024-03-05
//! WEEKDAY: Tuesday (2/7)
//! WEEK NUMBER: 10/53
//! DAY NUMBER: 065/366
//! YEAR PERCENTAGE: 17%
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::display::{fragment, rewrite, TimeBlock};

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Shown until the first tick arrives.
pub const TIME_PLACEHOLDER: &str = "00:00";

/// Owns the time fragment buffer.  Content is valid until the next `format`.
pub struct ClockFormatter {
    buf: TimeBlock,
}

impl Default for ClockFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockFormatter {
    pub fn new() -> Self {
        Self {
            buf: fragment(TIME_PLACEHOLDER),
        }
    }

    /// Render `now` (local time) into the time block.
    pub fn format(&mut self, now: &NaiveDateTime) -> &TimeBlock {
        let (pm, hour12) = now.hour12();
        let weekday = now.weekday();
        let days_in_year = days_in_year(now.year());
        let day_of_year = now.ordinal();

        rewrite(
            &mut self.buf,
            format_args!(
                "STANDARD TIME: {:02}:{:02}\n\
                 AMERICAN TIME: {:02}:{:02} {}\n\
                 COUNT SECONDS: {:02}/59\n\
                 DATE: {:04}-{:02}-{:02}\n\
                 WEEKDAY: {} ({}/7)\n\
                 WEEK NUMBER: {:02}/53\n\
                 DAY NUMBER: {:03}/{}\n\
                 YEAR PERCENTAGE: {}%",
                now.hour(),
                now.minute(),
                hour12,
                now.minute(),
                if pm { "PM" } else { "AM" },
                now.second(),
                now.year(),
                now.month(),
                now.day(),
                WEEKDAY_NAMES[weekday.num_days_from_monday() as usize],
                weekday.number_from_monday(),
                now.iso_week().week(),
                day_of_year,
                days_in_year,
                day_of_year * 100 / days_in_year,
            ),
        );
        &self.buf
    }

    /// Last rendered block (placeholder before the first `format`).
    pub fn current(&self) -> &TimeBlock {
        &self.buf
    }
}

fn days_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |d| d.ordinal())
}
