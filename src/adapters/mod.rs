//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                        |
//! |------------|---------------|------------------------------------|
//! | `log_sink` | EventSink     | `log` facade (env_logger on host)  |
//! | `phone`    | OutboundPort  | Simulated phone-side responder     |
//! | `platform` | PlatformPort  | Simulated connectivity + battery   |
//! | `time`     | —             | Local wall clock (chrono)          |

pub mod log_sink;
pub mod phone;
pub mod platform;
pub mod time;
