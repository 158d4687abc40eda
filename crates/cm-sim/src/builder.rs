//! Fluent builder for constructing a [`SimulationController`].

use std::fmt::Display;

use tracing::{info, warn};

use cm_core::{GateState, RunConfig, SafeLimits, SimulationConfig, ZoneCounts};
use cm_flow::{AlertState, DeterministicFlow, FlowModel};

use crate::{AlertNotifier, HistoryLog, SimError, SimResult, SimulationController};

/// Fluent builder for [`SimulationController<F>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                 |
/// |------------------------|-----------------------------------------|
/// | `.run_config(r)`       | `RunConfig::default()` (3 s, 200 rows)  |
/// | `.initial_zones(z)`    | `ZoneCounts::initial()`                 |
/// | `.gates(g)`            | all open                                |
/// | `.limits(l)`           | Main Hall 300, others 150               |
/// | `.flow_model(m)`       | `DeterministicFlow`                     |
/// | `.notifier(n)`         | none: alerts are computed but silent   |
///
/// # Example
///
/// ```rust,ignore
/// let ctrl = ControllerBuilder::new(SimulationConfig::default())
///     .initial_zones(ZoneCounts::new(0, 250, 0, 0))
///     .try_notifier(open_audio_device())
///     .build()?;
/// ```
pub struct ControllerBuilder<F: FlowModel = DeterministicFlow> {
    config:   SimulationConfig,
    run:      RunConfig,
    zones:    Option<ZoneCounts>,
    gates:    Option<GateState>,
    limits:   Option<SafeLimits>,
    flow:     F,
    notifier: Option<Box<dyn AlertNotifier>>,
}

impl ControllerBuilder<DeterministicFlow> {
    /// Builder using the deterministic flow model.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            run:      RunConfig::default(),
            zones:    None,
            gates:    None,
            limits:   None,
            flow:     DeterministicFlow::default(),
            notifier: None,
        }
    }
}

impl<F: FlowModel> ControllerBuilder<F> {
    /// Swap the flow model.
    pub fn flow_model<G: FlowModel>(self, flow: G) -> ControllerBuilder<G> {
        ControllerBuilder {
            config:   self.config,
            run:      self.run,
            zones:    self.zones,
            gates:    self.gates,
            limits:   self.limits,
            flow,
            notifier: self.notifier,
        }
    }

    pub fn run_config(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    pub fn initial_zones(mut self, zones: ZoneCounts) -> Self {
        self.zones = Some(zones);
        self
    }

    pub fn gates(mut self, gates: GateState) -> Self {
        self.gates = Some(gates);
        self
    }

    pub fn limits(mut self, limits: SafeLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn notifier<N: AlertNotifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Attach a notifier whose acquisition may have failed.
    ///
    /// An `Err` is logged and the controller is built without a notifier;
    /// alert state is still computed and exposed.
    pub fn try_notifier<N, E>(mut self, notifier: Result<N, E>) -> Self
    where
        N: AlertNotifier + 'static,
        E: Display,
    {
        match notifier {
            Ok(n) => self.notifier = Some(Box::new(n)),
            Err(e) => warn!(error = %e, "alert notifier unavailable; alerts will be silent"),
        }
        self
    }

    /// Validate inputs and return a ready-to-run controller.
    pub fn build(self) -> SimResult<SimulationController<F>> {
        if self.run.tick_period_ms == 0 {
            return Err(SimError::Config("tick_period_ms must be positive".into()));
        }
        if self.run.history_capacity == 0 {
            return Err(SimError::Config("history_capacity must be positive".into()));
        }

        let zones  = self.zones.unwrap_or_else(ZoneCounts::initial);
        let limits = self.limits.unwrap_or_default();

        info!(
            zones = %zones,
            period_ms = self.run.tick_period_ms,
            history = self.run.history_capacity,
            trigger = ?self.run.alert_trigger,
            notifier = self.notifier.is_some(),
            "simulation controller built"
        );

        Ok(SimulationController {
            clock:         self.run.make_clock(),
            history:       HistoryLog::new(self.run.history_capacity),
            run:           self.run,
            config:        self.config,
            gates:         self.gates.unwrap_or_default(),
            // Start Safe so an already-crowded first tick counts as a rising edge.
            alert:         AlertState::Safe,
            zones,
            limits,
            flow:          self.flow,
            notifier:      self.notifier,
            notifications: 0,
        })
    }
}
