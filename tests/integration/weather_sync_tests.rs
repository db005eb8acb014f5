//! Integration tests for the weather request/response exchange driven
//! through the dispatcher.

use crate::mock_ports::{at, weather, MockOutbound, MockPlatform, RecordingSink};

use verbose_watchface::app::events::SyncOutcome;
use verbose_watchface::app::service::AppService;
use verbose_watchface::config::WatchfaceConfig;
use verbose_watchface::error::{ReasonCode, TransportError};
use verbose_watchface::events::InboundEvent;
use verbose_watchface::weather::message::{MessageKey, Payload, Value};
use verbose_watchface::weather::SyncState;

fn make_app(config: WatchfaceConfig) -> (AppService, MockOutbound, RecordingSink) {
    let mut app = AppService::new(&config);
    let mut sink = RecordingSink::new();
    app.start(
        &MockPlatform {
            connected: true,
            battery: 100,
        },
        &mut sink,
    );
    sink.clear();
    (app, MockOutbound::new(), sink)
}

#[test]
fn request_is_the_single_entry_request_payload() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig::default());
    app.dispatch(InboundEvent::Tick(at(7, 0, 0)), &mut out, &mut sink);
    assert_eq!(out.sent, vec![Payload::weather_request()]);
    let entry = out.sent[0].iter().next().unwrap();
    assert_eq!(entry.key, MessageKey::REQUEST);
    assert_eq!(entry.value, Value::UInt(0));
    assert_eq!(sink.requests(), vec![0]);
}

#[test]
fn response_completes_exchange() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig::default());
    app.dispatch(InboundEvent::Tick(at(7, 30, 0)), &mut out, &mut sink);
    app.dispatch(InboundEvent::OutboundSent, &mut out, &mut sink);
    assert_eq!(app.sync_state(), SyncState::AwaitingResponse);

    app.dispatch(
        InboundEvent::WeatherResponse(weather(19, "Clouds")),
        &mut out,
        &mut sink,
    );
    assert_eq!(app.sync_state(), SyncState::Idle);
    assert_eq!(sink.outcomes(), vec![SyncOutcome::Received]);
    assert_eq!(app.reading().temperature, Some(19));
    assert_eq!(
        sink.last_display().unwrap().weather.as_str(),
        "TEMPERATURE: 19C\nWEATHER: Clouds"
    );
}

#[test]
fn delivery_failure_reports_reason_and_keeps_reading() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig::default());
    app.dispatch(
        InboundEvent::WeatherResponse(weather(5, "Snow")),
        &mut out,
        &mut sink,
    );
    app.dispatch(InboundEvent::Tick(at(8, 0, 0)), &mut out, &mut sink);
    app.dispatch(
        InboundEvent::OutboundFailed(ReasonCode(0x20)),
        &mut out,
        &mut sink,
    );
    assert_eq!(
        sink.outcomes(),
        vec![SyncOutcome::DeliveryFailed(ReasonCode(0x20))]
    );
    assert_eq!(app.sync_state(), SyncState::Idle);
    assert_eq!(
        app.display().weather.as_str(),
        "TEMPERATURE: 5C\nWEATHER: Snow"
    );
}

#[test]
fn inbound_drop_returns_to_idle() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig::default());
    app.dispatch(InboundEvent::Tick(at(8, 30, 0)), &mut out, &mut sink);
    app.dispatch(InboundEvent::InboundDropped(ReasonCode(7)), &mut out, &mut sink);
    assert_eq!(sink.outcomes(), vec![SyncOutcome::Dropped(ReasonCode(7))]);
    assert_eq!(app.sync_state(), SyncState::Idle);
}

#[test]
fn refused_send_is_immediate_failure() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig::default());
    out.refuse_with = Some(TransportError::Disconnected);
    app.dispatch(InboundEvent::Tick(at(9, 0, 0)), &mut out, &mut sink);
    assert_eq!(out.requests(), 1);
    assert_eq!(
        sink.outcomes(),
        vec![SyncOutcome::SendRefused(TransportError::Disconnected)]
    );
    assert_eq!(app.sync_state(), SyncState::Idle);
}

#[test]
fn outstanding_request_blocks_the_next_gate() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig {
        weather_response_timeout_secs: 0,
        ..Default::default()
    });
    app.dispatch(InboundEvent::Tick(at(10, 0, 0)), &mut out, &mut sink);
    app.dispatch(InboundEvent::Tick(at(10, 30, 0)), &mut out, &mut sink);
    app.dispatch(InboundEvent::Tick(at(11, 0, 0)), &mut out, &mut sink);
    assert_eq!(out.requests(), 1);
    assert_eq!(app.sync_state(), SyncState::AwaitingResponse);
}

#[test]
fn timeout_frees_the_next_gate() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig {
        weather_response_timeout_secs: 60,
        ..Default::default()
    });
    app.dispatch(InboundEvent::Tick(at(10, 0, 0)), &mut out, &mut sink);
    for s in 1..60 {
        app.dispatch(InboundEvent::Tick(at(10, 0, s)), &mut out, &mut sink);
    }
    assert_eq!(app.sync_state(), SyncState::AwaitingResponse);
    app.dispatch(InboundEvent::Tick(at(10, 1, 0)), &mut out, &mut sink);
    assert_eq!(sink.outcomes(), vec![SyncOutcome::TimedOut]);
    assert_eq!(app.sync_state(), SyncState::Idle);

    app.dispatch(InboundEvent::Tick(at(10, 30, 0)), &mut out, &mut sink);
    assert_eq!(out.requests(), 2);
}

#[test]
fn unrecognised_and_malformed_entries_are_skipped() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig::default());
    let payload = Payload::new()
        .with(MessageKey(42), Value::text("noise").unwrap())
        .unwrap()
        .with(
            MessageKey::CONDITIONS,
            Value::text("A very long description of rain").unwrap(),
        )
        .unwrap()
        .with(MessageKey::TEMPERATURE, Value::Int(-12))
        .unwrap();
    app.dispatch(InboundEvent::WeatherResponse(payload), &mut out, &mut sink);
    assert_eq!(
        app.display().weather.as_str(),
        "TEMPERATURE: -12C\nWEATHER: Loading..."
    );
}

#[test]
fn duplicate_outcomes_are_harmless() {
    let (mut app, mut out, mut sink) = make_app(WatchfaceConfig::default());
    app.dispatch(InboundEvent::Tick(at(12, 0, 0)), &mut out, &mut sink);
    app.dispatch(InboundEvent::OutboundFailed(ReasonCode(1)), &mut out, &mut sink);
    app.dispatch(InboundEvent::OutboundFailed(ReasonCode(1)), &mut out, &mut sink);
    app.dispatch(InboundEvent::InboundDropped(ReasonCode(2)), &mut out, &mut sink);
    assert_eq!(sink.outcomes().len(), 1);
    assert_eq!(app.sync_state(), SyncState::Idle);
}
