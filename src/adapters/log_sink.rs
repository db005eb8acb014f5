//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A real screen adapter would implement the same
//! trait and draw the fragments instead.

use log::{debug, info};

use crate::app::events::{AppEvent, SyncOutcome};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink {
    /// Headline of the last model logged at `info`.  Republishes within
    /// the same minute go to `debug`.
    last_headline: Option<heapless::String<32>>,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                connected,
                battery_percent,
            } => {
                info!(
                    "START | connected={} | battery={}%",
                    connected, battery_percent
                );
            }
            AppEvent::DisplayUpdated(model) => {
                let [time, uptime, connectivity, battery, weather] = model.fragments();
                // First time line only; the full block is eight lines.
                let headline = time.lines().next().unwrap_or_default();
                let line = format!(
                    "DISPLAY | {} | {} | {} | {} | {}",
                    headline,
                    uptime,
                    connectivity,
                    battery,
                    weather.replace('\n', " / "),
                );
                let mut key = heapless::String::new();
                for c in headline.chars() {
                    if key.push(c).is_err() {
                        break;
                    }
                }
                if self.last_headline.as_ref() == Some(&key) {
                    debug!("{}", line);
                } else {
                    info!("{}", line);
                    self.last_headline = Some(key);
                }
            }
            AppEvent::WeatherRequested { minute } => {
                info!("WEATHER | request sent at minute {:02}", minute);
            }
            AppEvent::WeatherSyncIdle(outcome) => match outcome {
                SyncOutcome::Received => info!("WEATHER | response applied"),
                SyncOutcome::SendRefused(e) => info!("WEATHER | send refused: {}", e),
                SyncOutcome::DeliveryFailed(r) => info!("WEATHER | delivery failed, reason {}", r),
                SyncOutcome::Dropped(r) => info!("WEATHER | response dropped, reason {}", r),
                SyncOutcome::TimedOut => info!("WEATHER | response timed out"),
            },
        }
    }
}
