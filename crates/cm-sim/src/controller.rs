//! The `SimulationController` and its public control surface.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info, warn};

use cm_core::{
    AlertTrigger, GateState, RunConfig, SafeLimits, SimClock, SimulationConfig, Tick, ZoneCounts,
    ZoneId,
};
use cm_flow::{
    AlertState, AlertTransition, DeterministicFlow, FlowModel, REDIRECT_SOURCE,
    is_overcrowded, overcrowded_zones, redirect, redirect_shift, should_notify,
};

use crate::{
    AlertNotifier, HistoryEntry, HistoryExport, HistoryLog, NoopObserver, SimObserver, SimResult,
    SimSnapshot, TickReport,
};

/// A controller shared between a [`PeriodicTicker`][crate::PeriodicTicker]
/// and the code issuing control operations.
pub type SharedController<F = DeterministicFlow> = Arc<Mutex<SimulationController<F>>>;

/// Owns the zone state, gate state, configuration and history, and exposes
/// the operations an operator dashboard needs.
///
/// State is private: consumers read copies through the accessors or
/// [`snapshot`][Self::snapshot] and mutate only through the operations below.
/// None of the operations fail; out-of-range rates are coerced to zero by the
/// flow model.
///
/// Create via [`ControllerBuilder`][crate::ControllerBuilder].
pub struct SimulationController<F: FlowModel = DeterministicFlow> {
    pub(crate) clock:         SimClock,
    pub(crate) run:           RunConfig,
    pub(crate) config:        SimulationConfig,
    pub(crate) gates:         GateState,
    pub(crate) zones:         ZoneCounts,
    pub(crate) limits:        SafeLimits,
    pub(crate) history:       HistoryLog,
    pub(crate) flow:          F,
    pub(crate) notifier:      Option<Box<dyn AlertNotifier>>,
    /// Alert state computed by the most recent tick.
    pub(crate) alert:         AlertState,
    pub(crate) notifications: u64,
}

impl<F: FlowModel> SimulationController<F> {
    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance one tick without an observer.
    pub fn tick(&mut self) -> TickReport {
        self.tick_with(&mut NoopObserver)
    }

    /// Advance one tick, calling `observer` hooks around it.
    pub fn tick_with<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> TickReport {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);

        let outcome = self.flow.advance(&self.zones, &self.gates, &self.config);
        self.zones = outcome.zones;

        let over_limit = overcrowded_zones(&self.zones, &self.limits);
        let state = AlertState::from_overcrowded(!over_limit.is_empty());
        let transition = AlertTransition::between(self.alert, state);
        self.alert = state;

        let timestamp = self.clock.timestamp_at(tick);
        self.history.append(HistoryEntry { tick, timestamp, zones: self.zones });

        let report = TickReport {
            tick,
            timestamp,
            zones: self.zones,
            flows: outcome.flows,
            overcrowded: state.is_alert(),
            over_limit,
            transition,
            notify: should_notify(self.run.alert_trigger, transition),
        };

        match transition {
            AlertTransition::Raised  => warn!(%tick, zones = %self.zones, "zone over safe limit"),
            AlertTransition::Cleared => info!(%tick, "all zones back within safe limits"),
            _ => debug!(%tick, zones = %self.zones, "tick"),
        }

        if report.notify {
            if let Some(notifier) = self.notifier.as_mut() {
                notifier.notify(&report);
                self.notifications += 1;
            }
        }

        self.clock.advance();
        observer.on_tick_end(&report);
        report
    }

    /// Run exactly `n` ticks, then call `observer.on_sim_end`.
    pub fn run_ticks<O: SimObserver + ?Sized>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick_with(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    // ── Gates and configuration ───────────────────────────────────────────

    /// Flip the gate of `zone`.  Returns the new state, or `None` for the
    /// Main Hall, which has no gate.
    pub fn toggle_gate(&mut self, zone: ZoneId) -> Option<bool> {
        let open = self.gates.toggle(zone);
        match open {
            Some(open) => info!(%zone, open, "gate toggled"),
            None => debug!(%zone, "zone has no gate"),
        }
        open
    }

    /// Open or close the gate of `zone`.  Returns `false` for the Main Hall.
    pub fn set_gate(&mut self, zone: ZoneId, open: bool) -> bool {
        self.gates.set(zone, open)
    }

    pub fn set_festival_mode(&mut self, on: bool) {
        info!(on, "festival mode");
        self.config.festival_mode = on;
    }

    pub fn set_entry_rate(&mut self, rate: f64) {
        self.config.entry_rate = rate;
    }

    pub fn set_exit_rate(&mut self, rate: f64) {
        self.config.exit_rate = rate;
    }

    pub fn set_parking_evac_rate(&mut self, rate: f64) {
        self.config.parking_evac_rate = rate;
    }

    pub fn set_redirect_target(&mut self, zone: ZoneId) {
        self.config.redirect_target = zone;
    }

    pub fn set_alert_trigger(&mut self, trigger: AlertTrigger) {
        self.run.alert_trigger = trigger;
    }

    // ── Redirect ──────────────────────────────────────────────────────────

    /// Move up to 20 people from the Main Hall to `dest` right now.
    ///
    /// Not tick-gated: the next read of the zones sees the result.  Returns
    /// the number of people moved (0 when `dest` is the Main Hall).
    pub fn redirect(&mut self, dest: ZoneId) -> u32 {
        let shift = redirect_shift(&self.zones, REDIRECT_SOURCE, dest);
        self.zones = redirect(&self.zones, REDIRECT_SOURCE, dest);
        if shift > 0 {
            info!(from = %REDIRECT_SOURCE, to = %dest, shift, "redirected");
        }
        shift
    }

    /// [`redirect`][Self::redirect] to the configured redirect target.
    pub fn redirect_to_target(&mut self) -> u32 {
        self.redirect(self.config.redirect_target)
    }

    /// [`redirect`][Self::redirect] to a zone given by its wire id.  Unknown
    /// ids are a no-op.
    pub fn redirect_named(&mut self, dest: &str) -> u32 {
        match dest.parse::<ZoneId>() {
            Ok(zone) => self.redirect(zone),
            Err(e) => {
                debug!(error = %e, "redirect ignored");
                0
            }
        }
    }

    // ── Export and reads ──────────────────────────────────────────────────

    /// Export the retained history as `crowd_logs_<unix_ms>.csv` content.
    ///
    /// Writes to memory only; in practice this cannot fail.
    pub fn export_history(&self) -> SimResult<HistoryExport> {
        let export = self.history.export(Utc::now().timestamp_millis())?;
        info!(file = %export.filename, rows = export.rows, "history exported");
        Ok(export)
    }

    /// Zone counts and the overcrowding flag, read together.
    ///
    /// The flag is evaluated against the live counts, so it already reflects
    /// a redirect made since the last tick.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            ticks:       self.clock.current_tick,
            timestamp:   self.history.latest().map_or_else(|| self.clock.now(), |e| e.timestamp),
            zones:       self.zones,
            overcrowded: is_overcrowded(&self.zones, &self.limits),
        }
    }

    #[inline]
    pub fn zones(&self) -> ZoneCounts {
        self.zones
    }

    #[inline]
    pub fn gates(&self) -> GateState {
        self.gates
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn run_config(&self) -> &RunConfig {
        &self.run
    }

    #[inline]
    pub fn limits(&self) -> SafeLimits {
        self.limits
    }

    #[inline]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Number of ticks completed.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Alert state as of the most recent tick.
    #[inline]
    pub fn alert_state(&self) -> AlertState {
        self.alert
    }

    /// Whether an alert notifier is attached.
    #[inline]
    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    /// Notifications actually delivered so far.
    #[inline]
    pub fn notifications_sent(&self) -> u64 {
        self.notifications
    }

    /// Wrap in `Arc<Mutex<_>>` for use with a periodic ticker.
    pub fn into_shared(self) -> SharedController<F> {
        Arc::new(Mutex::new(self))
    }
}
