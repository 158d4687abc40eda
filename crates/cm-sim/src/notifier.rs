//! Overcrowding notification sink.
//!
//! The notifier stands in for the dashboard's warning tone.  It is an
//! optional capability: a controller built without one (or whose notifier
//! failed to initialise) computes and exposes the alert state exactly the
//! same way and simply skips the side effect.

use tracing::warn;

use crate::TickReport;

/// Receives a call on every tick the trigger mode selects.
///
/// Under the default level trigger this is every tick that ends
/// overcrowded, so implementations must tolerate repeated calls: reuse one
/// long-lived handle (one tone, one connection) and restart it rather than
/// stacking a new one per call.
pub trait AlertNotifier: Send {
    fn notify(&mut self, report: &TickReport);
}

/// Emits a `WARN` log line per notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogNotifier;

impl AlertNotifier for LogNotifier {
    fn notify(&mut self, report: &TickReport) {
        let zones: Vec<&str> = report.over_limit.iter().map(|z| z.as_str()).collect();
        warn!(tick = %report.tick, ?zones, "overcrowding detected");
    }
}
