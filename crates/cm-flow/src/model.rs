//! The `FlowModel` trait: how zone counts evolve over one tick.

use cm_core::{GateState, SimulationConfig, ZoneCounts};

/// People moved along each edge during one deterministic tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickFlows {
    /// Entry → Main Hall.
    pub entry_flow:     u32,
    /// Exit flow the configuration asked for.
    pub exit_requested: u32,
    /// Main Hall → Exit → Parking, capped by Main Hall occupancy.
    pub exit_flow:      u32,
    /// Parking evacuation the configuration asked for.
    pub evac_requested: u32,
    /// People actually evacuated from Parking.
    pub evac_flow:      u32,
}

/// Result of advancing the zones by one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FlowOutcome {
    pub zones: ZoneCounts,
    /// Edge flows, for models that move people along the graph.  `None` for
    /// models that perturb zones independently.
    pub flows: Option<TickFlows>,
}

/// Pluggable per-tick zone dynamics.
///
/// Implementations read the current counts, gate state and configuration and
/// return the next counts.  They never mutate configuration; persisting the
/// result is the controller's job.
///
/// The controller may be ticked from a timer thread, so implementations must
/// be `Send`.
pub trait FlowModel: Send + 'static {
    fn advance(
        &mut self,
        zones:  &ZoneCounts,
        gates:  &GateState,
        config: &SimulationConfig,
    ) -> FlowOutcome;
}
