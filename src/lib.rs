//! Verbose Watchface library.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! simulation binary.  Nothing here touches a device; the platform is
//! reached only through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod status;
pub mod uptime;
pub mod weather;
