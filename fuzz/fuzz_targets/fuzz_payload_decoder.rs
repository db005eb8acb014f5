//! Fuzz target: `Payload::decode` and the weather response handler
//!
//! Drives arbitrary byte sequences into the inbound payload decoder and,
//! when they decode, through the weather state machine.  Asserts that
//! nothing panics and the machine always settles back to idle.
//!
//! cargo fuzz run fuzz_payload_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use verbose_watchface::config::WatchfaceConfig;
use verbose_watchface::weather::message::{decode_entry, Payload, MAX_ENTRIES};
use verbose_watchface::weather::{SyncState, WeatherSync};

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = Payload::decode(data) else {
        return;
    };
    assert!(payload.len() <= MAX_ENTRIES, "decoder exceeded entry capacity");

    for entry in payload.iter() {
        let _ = decode_entry(entry);
    }

    let mut sync = WeatherSync::new(&WatchfaceConfig::default());
    let block = sync.on_response_received(&payload);
    assert!(block.starts_with("TEMPERATURE: "), "weather block lost its prefix");
    assert_eq!(sync.state(), SyncState::Idle);
});
