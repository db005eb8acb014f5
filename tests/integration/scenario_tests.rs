//! End-to-end scenario: the host adapters wired to the service through
//! the event queue, exactly as the simulation binary runs them.

use crate::mock_ports::{at, RecordingSink};

use verbose_watchface::adapters::phone::SimulatedPhone;
use verbose_watchface::adapters::platform::SimulatedPlatform;
use verbose_watchface::adapters::time::{SimulatedClock, TimeSource};
use verbose_watchface::app::events::SyncOutcome;
use verbose_watchface::app::service::AppService;
use verbose_watchface::config::WatchfaceConfig;
use verbose_watchface::events::{EventQueue, InboundEvent};
use verbose_watchface::weather::SyncState;

struct Rig {
    app: AppService,
    clock: SimulatedClock,
    platform: SimulatedPlatform,
    phone: SimulatedPhone,
    sink: RecordingSink,
    queue: EventQueue,
}

impl Rig {
    fn new(start: chrono::NaiveDateTime, phone: SimulatedPhone) -> Self {
        let platform = SimulatedPlatform::new(true, 75).with_drain_every(0);
        let mut app = AppService::new(&WatchfaceConfig::default());
        let mut sink = RecordingSink::new();
        app.start(&platform, &mut sink);
        Self {
            app,
            clock: SimulatedClock::starting_at(start),
            platform,
            phone,
            sink,
            queue: EventQueue::new(),
        }
    }

    fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.queue
                .push(InboundEvent::Tick(self.clock.now()))
                .unwrap();
            self.platform.poll(&self.queue).unwrap();
            self.phone.set_connected(self.platform.is_connected());
            self.phone.poll(&self.queue).unwrap();
            let (app, phone, sink) = (&mut self.app, &mut self.phone, &mut self.sink);
            self.queue.drain(|e| app.dispatch(e, phone, sink));
        }
    }
}

#[test]
fn crossing_the_half_hour_fetches_weather() {
    let mut rig = Rig::new(at(13, 29, 50), SimulatedPhone::new(2));
    rig.run(10);
    assert_eq!(rig.sink.requests(), Vec::<u8>::new());
    assert!(rig.app.reading().is_empty());

    rig.run(10);
    assert_eq!(rig.sink.requests(), vec![30]);
    assert_eq!(rig.sink.outcomes(), vec![SyncOutcome::Received]);
    assert_eq!(rig.app.sync_state(), SyncState::Idle);
    assert!(rig.app.reading().temperature.is_some());
    assert!(!rig.app.display().weather.contains("Loading"));
    assert_eq!(rig.app.uptime_secs(), 20);
}

#[test]
fn dropped_reply_keeps_loading_until_next_gate() {
    let mut rig = Rig::new(at(13, 59, 55), SimulatedPhone::new(1).with_drop_every(1));
    rig.run(30);
    assert_eq!(rig.sink.requests(), vec![0]);
    assert_eq!(
        rig.sink.outcomes(),
        vec![SyncOutcome::Dropped(
            verbose_watchface::adapters::phone::DROP_REASON
        )]
    );
    assert_eq!(rig.app.sync_state(), SyncState::Idle);
    assert_eq!(
        rig.app.display().weather.as_str(),
        "TEMPERATURE: Loading...\nWEATHER: Loading..."
    );
}

#[test]
fn disconnected_phone_refuses_request() {
    let mut rig = Rig::new(at(14, 29, 58), SimulatedPhone::new(0));
    // The phone follows the platform link every tick.
    rig.platform = SimulatedPlatform::new(false, 75).with_drain_every(0);
    rig.run(5);
    assert_eq!(rig.sink.requests(), vec![30]);
    assert!(matches!(
        rig.sink.outcomes().as_slice(),
        [SyncOutcome::SendRefused(_)]
    ));
    assert_eq!(rig.app.sync_state(), SyncState::Idle);
}
