//! Local time adapter.
//!
//! Supplies the wall-clock reading carried by each tick event.
//!
//! - **`LocalClock`** — the host's local time zone via `chrono::Local`.
//! - **`SimulatedClock`** — a fixed start time advanced one second per
//!   call, for deterministic runs and accelerated demos.

use chrono::{Local, NaiveDateTime, TimeDelta};

/// Source of the local time stamped on each tick.
pub trait TimeSource {
    fn now(&mut self) -> NaiveDateTime;
}

/// Host local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl LocalClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for LocalClock {
    fn now(&mut self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Deterministic clock: returns `start`, then advances one second per call.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedClock {
    next: NaiveDateTime,
}

impl SimulatedClock {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self { next: start }
    }
}

impl TimeSource for SimulatedClock {
    fn now(&mut self) -> NaiveDateTime {
        let now = self.next;
        self.next = now
            .checked_add_signed(TimeDelta::seconds(1))
            .unwrap_or(now);
        now
    }
}
