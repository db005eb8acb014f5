//! Verbose Watchface — host simulation entry point.
//!
//! Hexagonal architecture with a single serial event dispatcher.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedPlatform  SimulatedPhone   LogEventSink   LocalClock │
//! │  (PlatformPort)     (OutboundPort)   (EventSink)    (ticks)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Clock · Uptime · Status · WeatherSync                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `verbose-watchface [CONFIG.json] [--fast] [--ticks N]`
//!
//! `--fast` stamps ticks from a simulated clock that starts just before a
//! weather gate, so a sync happens within seconds.  `--ticks N` stops
//! after `N` ticks.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use log::{info, warn};

use verbose_watchface::adapters::log_sink::LogEventSink;
use verbose_watchface::adapters::phone::SimulatedPhone;
use verbose_watchface::adapters::platform::SimulatedPlatform;
use verbose_watchface::adapters::time::{LocalClock, SimulatedClock, TimeSource};
use verbose_watchface::app::service::AppService;
use verbose_watchface::config::WatchfaceConfig;
use verbose_watchface::events::{EventQueue, InboundEvent};

struct Options {
    config_path: Option<String>,
    fast: bool,
    max_ticks: Option<u64>,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        config_path: None,
        fast: false,
        max_ticks: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fast" => opts.fast = true,
            "--ticks" => {
                let n = args.next().context("--ticks needs a value")?;
                opts.max_ticks = Some(n.parse().context("--ticks value")?);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => opts.config_path = Some(path.to_owned()),
        }
    }
    Ok(opts)
}

fn load_config(path: Option<&str>) -> Result<WatchfaceConfig> {
    let Some(path) = path else {
        info!("No config file given, using defaults");
        return Ok(WatchfaceConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = WatchfaceConfig::from_json(&text).with_context(|| format!("parsing {path}"))?;
    info!("Loaded config from {}", path);
    Ok(config)
}

/// Ten seconds before the next weather gate.
fn fast_start(config: &WatchfaceConfig) -> NaiveDateTime {
    let now = LocalClock::new().now();
    let interval = i64::from(config.weather_sync_interval_mins.max(1));
    let minute = i64::from(now.minute());
    let mins_to_gate = interval - minute % interval;
    let gate = now
        .with_second(0)
        .unwrap_or(now)
        .checked_add_signed(TimeDelta::minutes(mins_to_gate))
        .unwrap_or(now);
    gate.checked_sub_signed(TimeDelta::seconds(10)).unwrap_or(gate)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  Verbose Watchface v{:<17}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 1. Configuration ──────────────────────────────────────
    let opts = parse_args()?;
    let config = load_config(opts.config_path.as_deref())?;

    // ── 2. Construct adapters ─────────────────────────────────
    let mut clock: Box<dyn TimeSource> = if opts.fast {
        Box::new(SimulatedClock::starting_at(fast_start(&config)))
    } else {
        Box::new(LocalClock::new())
    };
    let mut platform = SimulatedPlatform::new(true, 87)
        .with_drain_every(120)
        .with_toggle_every(600);
    let mut phone = SimulatedPhone::new(2).with_drop_every(5);
    let mut sink = LogEventSink::new();
    let queue = EventQueue::new();

    // ── 3. Construct app service ──────────────────────────────
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));
    let mut app = AppService::new(&config);
    app.start(&platform, &mut sink);

    info!("Watchface ready. Entering event loop.");

    // ── 4. Event loop ─────────────────────────────────────────
    let mut ticks: u64 = 0;
    loop {
        std::thread::sleep(tick);

        if let Err(e) = queue.push(InboundEvent::Tick(clock.now())) {
            warn!("Tick lost: {}", e);
        }
        if let Err(e) = platform.poll(&queue) {
            warn!("Platform event lost: {}", e);
        }
        phone.set_connected(platform.is_connected());
        if let Err(e) = phone.poll(&queue) {
            warn!("Phone event lost: {}", e);
        }

        queue.drain(|event| app.dispatch(event, &mut phone, &mut sink));

        ticks += 1;
        if opts.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
    }

    info!(
        "Stopped after {} ticks ({} events, weather sync {:?})",
        ticks,
        app.events_handled(),
        app.sync_state()
    );
    Ok(())
}
