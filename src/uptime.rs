//! Uptime counter.
//!
//! Seconds since the watchface became active.  Created at zero, advanced
//! by exactly one per accepted tick, discarded on deactivation.  The
//! counter is a `u64`; wraparound is not reachable in any real session
//! and is not handled.

use crate::display::{fragment, rewrite, UptimeBlock};

pub struct UptimeCounter {
    elapsed_secs: u64,
    buf: UptimeBlock,
}

impl Default for UptimeCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeCounter {
    pub fn new() -> Self {
        let mut counter = Self {
            elapsed_secs: 0,
            buf: fragment(""),
        };
        counter.render();
        counter
    }

    /// Advance by one second.  The only mutator of the count.
    pub fn tick(&mut self) -> u64 {
        self.elapsed_secs += 1;
        self.elapsed_secs
    }

    /// Total elapsed seconds.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Split into (hours, minutes, seconds).
    pub fn hms(&self) -> (u64, u8, u8) {
        let secs = self.elapsed_secs;
        (secs / 3600, ((secs % 3600) / 60) as u8, (secs % 60) as u8)
    }

    /// Render the uptime block.
    pub fn render(&mut self) -> &UptimeBlock {
        let (h, m, s) = self.hms();
        rewrite(&mut self.buf, format_args!("UPTIME: {h}h {m:02}m {s:02}s"));
        &self.buf
    }

    pub fn current(&self) -> &UptimeBlock {
        &self.buf
    }
}
