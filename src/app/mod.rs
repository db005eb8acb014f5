//! Application core — pure domain logic, zero I/O.
//!
//! This module wires the display components behind a single event
//! dispatcher.  All interaction with the watch platform happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without a device.

pub mod events;
pub mod ports;
pub mod service;
