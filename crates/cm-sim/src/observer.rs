//! Simulation observer trait for progress reporting and data collection.

use cm_core::Tick;

use crate::TickReport;

/// Callbacks invoked by the controller around each tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: alert printer
///
/// ```rust,ignore
/// struct AlertPrinter;
///
/// impl SimObserver for AlertPrinter {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         if report.overcrowded {
///             println!("{}: over limit {:?}", report.tick, report.over_limit);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's state has been published and logged.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once after the final tick of a run (or when a timer stops).
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        (**self).on_tick_end(report);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        (**self).on_sim_end(final_tick);
    }
}

/// Fan out to two observers, left first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.0.on_tick_end(report);
        self.1.on_tick_end(report);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.0.on_sim_end(final_tick);
        self.1.on_sim_end(final_tick);
    }
}

/// An absent observer does nothing.
impl<O: SimObserver> SimObserver for Option<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        if let Some(o) = self {
            o.on_tick_start(tick);
        }
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        if let Some(o) = self {
            o.on_tick_end(report);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        if let Some(o) = self {
            o.on_sim_end(final_tick);
        }
    }
}
